use super::{AppState, AuthState, DashboardState, InputMode, LoadingState, ProfileState};
use crate::events::DataEvent;
use crate::ui::screens::Screen;
use metazapp_api::ErrorKind;
use throbber_widgets_tui::ThrobberState;

/// Fold a background result into the UI state. No I/O happens here.
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        // Signed in - replace the auth screen with a fresh dashboard
        DataEvent::LoggedIn { user } => {
            tracing::info!("Signed in as {}", user.email);
            state.reset_to(Screen::Dashboard(DashboardState::with_user(user)));
        }

        DataEvent::LoginFailed { kind, message } => {
            tracing::warn!("Login failed ({:?}): {}", kind, message);
            if let Screen::Auth(auth_state) = state.current_screen_mut() {
                auth_state.submit_loading = LoadingState::Error(message);
            }
        }

        // Registration signs the user straight in
        DataEvent::Registered { user } => {
            tracing::info!("Registered and signed in as {}", user.email);
            state.reset_to(Screen::Dashboard(DashboardState::with_user(user)));
        }

        DataEvent::RegisterFailed { kind, message } => {
            tracing::warn!("Registration failed ({:?}): {}", kind, message);
            if let Screen::Auth(auth_state) = state.current_screen_mut() {
                auth_state.submit_loading = LoadingState::Error(message);
            }
        }

        // Profile cache loaded (rendered immediately, fetch still in flight)
        DataEvent::ProfileCacheLoaded { user } => {
            if let Screen::Dashboard(dashboard_state) = state.current_screen_mut() {
                dashboard_state.user = Some(user);
                dashboard_state.profile = ProfileState::Cached(ThrobberState::default());
            }
        }

        // Profile loaded from API (replaces any cached copy)
        DataEvent::ProfileLoaded { user } => {
            if let Screen::Dashboard(dashboard_state) = state.current_screen_mut() {
                dashboard_state.user = Some(user);
                dashboard_state.profile = ProfileState::Loaded;
            }
        }

        DataEvent::ProfileLoadFailed { kind, message } => {
            if kind == ErrorKind::InvalidToken {
                expire_session(state, message);
            } else if let Screen::Dashboard(dashboard_state) = state.current_screen_mut() {
                tracing::error!("Profile load failed: {}", message);
                // Whatever copy was rendered stays visible alongside the error
                dashboard_state.profile = ProfileState::Errored(message);
            }
        }

        // Profile updated - the server copy replaces the rendered one
        DataEvent::ProfileUpdated { user } => {
            if let Screen::Dashboard(dashboard_state) = state.current_screen_mut() {
                tracing::info!("Profile updated, form closed");
                dashboard_state.user = Some(user);
                dashboard_state.profile = ProfileState::Loaded;
                dashboard_state.update_loading = LoadingState::Loaded;
                dashboard_state.input_mode = InputMode::Normal;
                dashboard_state.form_state = None;
            }
        }

        // Profile update failed - keep the form open with the error
        DataEvent::ProfileUpdateFailed { kind, message } => {
            if kind == ErrorKind::InvalidToken {
                expire_session(state, message);
            } else if let Screen::Dashboard(dashboard_state) = state.current_screen_mut() {
                tracing::error!("Profile update failed: {}", message);
                dashboard_state.update_loading = LoadingState::Error(message);
            }
        }
    }
}

/// The server rejected the session token. The background loader has already
/// cleared the stored session; all that is left is putting the user back on
/// the sign-in card with the server's message visible.
fn expire_session(state: &mut AppState, message: String) {
    tracing::warn!("Session rejected by server, returning to sign-in");
    let mut auth_state = AuthState::prefilled();
    auth_state.submit_loading = LoadingState::Error(message);
    // A help popup left open would otherwise sit on top of the sign-in card
    state.help_visible = false;
    state.reset_to(Screen::Auth(auth_state));
}
