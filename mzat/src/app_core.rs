use crate::commands::handlers;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::state::{reducer, AppState};

/// Side-effect seam between commands and the world.
///
/// The production handler spawns background work against the real API;
/// tests plug in a synchronous mock so whole flows run without a runtime
/// or a server.
pub trait DataEventHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState);
}

/// The application minus the terminal: key dispatch, command execution,
/// and data-event reduction over owned state.
///
/// Generic over the handler so the test double is a compile-time choice.
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: DataEventHandler> AppCore<H> {
    pub fn new(handler: H) -> Self {
        Self {
            ui_state: AppState::new(),
            handler,
        }
    }

    /// Translate a key press against the current state and execute
    /// whatever command falls out. Unmapped keys are ignored.
    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            self.execute_command(command);
        }
    }

    /// Execute a command directly, bypassing key translation. Startup
    /// uses this for the initial profile load; tests use it to drive
    /// flows without synthesizing key presses.
    pub fn execute_command(&mut self, command: AppCommand) {
        self.handler
            .execute_with_context(command, &mut self.ui_state);
    }

    /// Fold a data event into state. Results of background work arrive
    /// here; tests inject events to stand in for completed requests.
    pub fn handle_data_event(&mut self, event: DataEvent) {
        reducer::reduce_data_event(&mut self.ui_state, event);
    }

    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }
}
