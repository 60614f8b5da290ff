pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;

use crate::log_buffer::LogBuffer;
use crate::state::{AppState, InputMode};
use ratatui::Frame;
use screens::*;

/// Draw whatever screen sits on top of the stack, then its overlays.
/// Rendering only reads state.
pub fn render_app(f: &mut Frame, state: &AppState, log_buffer: &LogBuffer) {
    match state.current_screen() {
        Screen::Auth(auth_state) => {
            auth_screen::render(f, auth_state);
        }
        Screen::Dashboard(dashboard_state) => {
            dashboard_screen::render(f, dashboard_state);

            // Render profile edit popup if active
            if dashboard_state.input_mode == InputMode::ProfileEdit {
                if let Some(ref form) = dashboard_state.form_state {
                    components::profile_edit_form::render_profile_edit_form(
                        f,
                        form,
                        &dashboard_state.update_loading,
                    );
                }
            }
        }
        Screen::Logs(logs_state) => {
            logs_screen::render(f, logs_state, log_buffer);
        }
    }

    // Help sits above everything, including an open form
    if state.help_visible {
        components::help_popup::render_help_popup(f, state.current_screen());
    }
}
