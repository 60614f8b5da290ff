use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::*;
use crate::ui::screens::Screen;

/// Translate a key press into a command, given where the UI currently is.
/// Keys that mean nothing in the current context map to None.
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Ctrl+C always quits, even while a form is capturing input
    if event.ctrl && matches!(key, Key::Char('c')) {
        return Some(AppCommand::Quit);
    }

    // Priority 1: The auth screen is one big form, every key goes to it
    if let Screen::Auth(auth_state) = state.current_screen() {
        return handle_auth_keys(event, auth_state);
    }

    // Priority 2: Profile edit form on the dashboard
    if let Screen::Dashboard(dashboard_state) = state.current_screen() {
        if dashboard_state.input_mode == InputMode::ProfileEdit {
            return handle_profile_form_keys(event, dashboard_state);
        }
    }

    // Priority 3: Check if we're currently showing the help popup
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // A pending key means we're mid-sequence and this press is the second half
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            // gl -> jump to the log viewer
            ('g', Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            // gg -> oldest log entry
            ('g', Key::Char('g')) => Some(AppCommand::ScrollLogsToTop),
            // Anything else abandons the sequence
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.current_screen(), key) {
        // Bindings shared by every screen
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),
        (_, Key::Char('q')) => Some(AppCommand::Quit),

        // 'g' arms a two-key sequence
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),

        // Back, vim-style h or the left arrow
        (_, Key::Left | Key::Char('h')) => Some(AppCommand::NavigateBack),

        // Dashboard screen
        (Screen::Dashboard(..), Key::Char('r')) => Some(AppCommand::LoadProfile {
            force_refresh: true,
        }),
        (Screen::Dashboard(dashboard_state), Key::Char('e')) => {
            // Edit profile - only with user data on screen
            if dashboard_state.user.is_some() {
                Some(AppCommand::EnterProfileEditMode)
            } else {
                None
            }
        }
        (Screen::Dashboard(..), Key::Char('l')) => Some(AppCommand::Logout),

        // Log viewer scrolling
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Screen::Logs(..), Key::Char('G')) => Some(AppCommand::ScrollLogsToBottom),

        // Everything else falls through
        _ => None,
    }
}

/// Handle keyboard input on the auth card
fn handle_auth_keys(event: KeyEvent, auth_state: &AuthState) -> Option<AppCommand> {
    let key = event.key;

    // Inputs are disabled while a submission is in flight
    if auth_state.is_submitting() {
        return None;
    }

    // Ctrl+T to switch between login and register tabs
    if event.ctrl && matches!(key, Key::Char('t')) {
        return Some(AppCommand::SwitchAuthTab);
    }

    // Ctrl+L wipes the focused field
    if event.ctrl && matches!(key, Key::Char('l')) {
        return Some(AppCommand::ClearFormField);
    }

    match key {
        // Escape to dismiss a submit error
        Key::Esc => {
            if matches!(auth_state.submit_loading, LoadingState::Error(..)) {
                Some(AppCommand::DismissAuthError)
            } else {
                None
            }
        }

        // Tab/Down to navigate to next field
        Key::Tab | Key::Down => Some(AppCommand::NavigateFormField { forward: true }),

        // Shift+Tab/Up to navigate to previous field
        Key::BackTab | Key::Up => Some(AppCommand::NavigateFormField { forward: false }),

        // Enter to submit the active tab
        Key::Enter => Some(AppCommand::SubmitAuth),

        // Backspace deletes behind the cursor
        Key::Backspace => Some(AppCommand::DeleteFormFieldChar),

        // Anything printable goes into the field
        Key::Char(c) => Some(AppCommand::AppendFormFieldChar { c }),

        // Nothing else is bound
        _ => None,
    }
}

/// Handle keyboard input when the profile edit form is open
fn handle_profile_form_keys(
    event: KeyEvent,
    dashboard_state: &DashboardState,
) -> Option<AppCommand> {
    let key = event.key;

    // Inputs are disabled while the update is in flight
    if matches!(dashboard_state.update_loading, LoadingState::Loading(..)) {
        return None;
    }

    // Ctrl+L empties the focused field
    if event.ctrl && matches!(key, Key::Char('l')) {
        return Some(AppCommand::ClearFormField);
    }

    match key {
        // Esc throws the edits away
        Key::Esc => Some(AppCommand::ExitProfileEditMode),

        // Tab/Down and Shift+Tab/Up cycle between the two fields
        Key::Tab | Key::Down => Some(AppCommand::NavigateFormField { forward: true }),
        Key::BackTab | Key::Up => Some(AppCommand::NavigateFormField { forward: false }),

        // Enter saves
        Key::Enter => Some(AppCommand::SubmitProfileEdit),

        Key::Backspace => Some(AppCommand::DeleteFormFieldChar),
        Key::Char(c) => Some(AppCommand::AppendFormFieldChar { c }),

        _ => None,
    }
}
