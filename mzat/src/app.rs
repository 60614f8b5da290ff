use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};

use metazapp_api::{Client, SessionStore};
use mzat_session::Settings;

use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::commands::{executor, handlers, AppCommand};
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::logging::init_logging_with_buffer;
use crate::state::AppState;
use crate::ui::screens::Screen;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub struct App {
    settings: Settings,
    session: Arc<dyn SessionStore>,
}

impl App {
    pub fn new(settings: Settings, session: Arc<dyn SessionStore>) -> Self {
        Self { settings, session }
    }

    pub async fn run(&self) -> Result<()> {
        // The buffer must exist before logging init so the in-app layer
        // catches startup lines
        let log_buffer = LogBuffer::new(5000);
        let log_path = init_logging_with_buffer(log_buffer.clone())?;

        tracing::info!("mzat starting, log file: {}", log_path.display());

        let mut terminal = setup_terminal()?;

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();
        let mut state = AppState::new();
        let mut task_manager = BackgroundTaskManager::new();

        let api_client = Arc::new(Client::with_base_url(
            self.settings.api_url.clone(),
            self.session.clone(),
        ));
        let data_loader = DataLoader::new(api_client, self.session.clone(), data_tx.clone());

        // A stored session boots straight to the dashboard, where the cached
        // user renders while the fresh profile is fetched
        if self.session.is_authenticated() {
            tracing::info!("Found stored session, loading profile");
            executor::execute_command(
                AppCommand::LoadProfile {
                    force_refresh: false,
                },
                &mut state,
                &mut task_manager,
                &data_loader,
            );
        } else {
            tracing::info!("No stored session, starting on sign-in");
        }

        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(Duration::from_millis(100));

        tracing::info!("Event loop running");
        loop {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.total_entries = log_buffer.len();
            }

            terminal.draw(|f| crate::ui::render_app(f, &state, &log_buffer))?;

            tokio::select! {
                _ = tick.tick() => {
                    if let Some(throbber_state) = state.loading_state() {
                        throbber_state.calc_next();
                    }
                }
                Some(Ok(event)) = events.next() => {
                    if let Event::Key(key) = event {
                        if matches!(key.kind, KeyEventKind::Press) {
                            if let Some(command) = handlers::handle_key_input(KeyEvent::from(key), &state) {
                                if should_log_command(&state, &command) {
                                    tracing::info!("Command: {:?}", command);
                                }
                                executor::execute_command(command, &mut state, &mut task_manager, &data_loader);
                            }
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Data event: {:?}", data_event);
                    crate::state::reducer::reduce_data_event(&mut state, data_event);
                }
            }

            if state.should_quit {
                tracing::info!("Quit requested, leaving event loop");
                break;
            }
        }

        task_manager.cancel_all();
        restore_terminal(terminal)?;

        Ok(())
    }
}

/// Whether executing `command` should appear in the log stream.
///
/// Two exclusions: commands issued on the logs screen (each logged line
/// would append an entry and feed back into the view), and form field
/// edits (the typed character may belong to a password).
fn should_log_command(state: &AppState, command: &AppCommand) -> bool {
    if matches!(state.current_screen(), Screen::Logs(_)) {
        return false;
    }
    !matches!(
        command,
        AppCommand::AppendFormFieldChar { .. } | AppCommand::DeleteFormFieldChar
    )
}

fn setup_terminal() -> Result<Tui, std::io::Error> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(mut terminal: Tui) -> Result<(), std::io::Error> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LogsState;

    #[test]
    fn test_field_edits_are_kept_out_of_the_log() {
        let state = AppState::new();
        assert!(should_log_command(&state, &AppCommand::Quit));
        assert!(!should_log_command(
            &state,
            &AppCommand::AppendFormFieldChar { c: 'x' }
        ));
        assert!(!should_log_command(&state, &AppCommand::DeleteFormFieldChar));
    }

    #[test]
    fn test_commands_on_logs_screen_are_not_logged() {
        let mut state = AppState::new();
        state.navigate_to(Screen::Logs(LogsState::default()));
        assert!(!should_log_command(&state, &AppCommand::ScrollLogsDown));
    }
}
