use std::sync::Arc;

use metazapp_api::{MemorySessionStore, SessionStore, User};

use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent};
use crate::input::{Key, KeyEvent};
use crate::state::AppState;
use crate::ui::screens::Screen;

/// Synchronous stand-in for the production handler.
///
/// Commands run through `execute_command_sync` against an in-memory
/// session store, so session-dependent commands (LoadProfile, Logout)
/// keep their semantics without disk, network, or a runtime. Commands
/// that would start a request do only their state transition; tests
/// inject the matching `DataEvent` by hand.
pub struct MockDataHandler {
    session: Arc<MemorySessionStore>,
}

impl MockDataHandler {
    pub fn new() -> Self {
        Self {
            session: Arc::new(MemorySessionStore::new()),
        }
    }

    pub fn session(&self) -> Arc<MemorySessionStore> {
        self.session.clone()
    }
}

impl Default for MockDataHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        executor::execute_command_sync(command, state, self.session.as_ref());
    }
}

/// Whole-app harness for tests: key presses in, state assertions out.
pub struct TestApp {
    core: AppCore<MockDataHandler>,
    session: Arc<MemorySessionStore>,
}

impl TestApp {
    /// App with an empty session store, as after a first launch.
    pub fn new() -> Self {
        let handler = MockDataHandler::new();
        let session = handler.session();
        Self {
            core: AppCore::new(handler),
            session,
        }
    }

    /// App with a persisted session already on record.
    pub fn signed_in(user: &User, token: &str) -> Self {
        let app = Self::new();
        app.session
            .set_session(token, user)
            .expect("memory store never fails");
        app
    }

    /// Run the same startup decision as the real app: with a stored
    /// session, kick off the initial profile load; without one, stay on
    /// sign-in.
    pub fn start(&mut self) {
        if self.session.is_authenticated() {
            self.core.execute_command(AppCommand::LoadProfile {
                force_refresh: false,
            });
        }
    }

    /// Press a single unmodified key.
    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    /// Press a key carrying modifiers.
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    /// Press a sequence of keys in order.
    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Deliver a data event as if a background request had completed.
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    /// Run a command directly, without synthesizing a key press.
    pub fn execute_command(&mut self, command: AppCommand) {
        self.core.execute_command(command);
    }

    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    /// The in-memory session store backing this app.
    pub fn session(&self) -> &MemorySessionStore {
        &self.session
    }

    /// Assert the current screen variant, ignoring its payload.
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "wrong screen, currently: {:?}",
            current
        );
    }

    pub fn assert_should_quit(&self) {
        assert!(self.core.should_quit(), "expected should_quit to be set");
    }

    pub fn assert_not_quit(&self) {
        assert!(!self.core.should_quit(), "expected should_quit to be clear");
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
