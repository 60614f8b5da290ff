use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::events::AppCommand;
use crate::state::*;
use crate::ui::screens::Screen;
use metazapp_api::{LoginRequest, SessionStore};
use throbber_widgets_tui::ThrobberState;

/// Execute a command by mutating state and spawning background tasks
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    // Remember up front whether this command arms a sequence, so the
    // cleanup at the bottom doesn't immediately disarm it
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    match command {
        AppCommand::SwitchAuthTab => {
            if let Screen::Auth(auth_state) = state.current_screen_mut() {
                auth_state.switch_tab();
            }
        }

        AppCommand::DismissAuthError => {
            if let Screen::Auth(auth_state) = state.current_screen_mut() {
                if matches!(auth_state.submit_loading, LoadingState::Error(_)) {
                    auth_state.submit_loading = LoadingState::NotStarted;
                }
            }
        }

        AppCommand::SubmitAuth => {
            if let Screen::Auth(auth_state) = state.current_screen_mut() {
                match auth_state.tab {
                    AuthTab::Login => {
                        let credentials = LoginRequest {
                            email: auth_state.email.clone(),
                            password: auth_state.password.clone(),
                        };
                        auth_state.submit_loading = LoadingState::Loading(ThrobberState::default());

                        let data_loader = data_loader.clone();
                        let future = async move {
                            data_loader.login(credentials).await;
                        };
                        task_manager.spawn_load_task("auth", future);
                    }
                    AuthTab::Register => {
                        match validators::validate_and_build_registration(auth_state) {
                            Ok(new_user) => {
                                auth_state.submit_loading =
                                    LoadingState::Loading(ThrobberState::default());

                                let data_loader = data_loader.clone();
                                let future = async move {
                                    data_loader.register(new_user).await;
                                };
                                task_manager.spawn_load_task("auth", future);
                            }
                            Err(message) => {
                                // Local validation failures surface exactly
                                // like server rejections
                                auth_state.submit_loading = LoadingState::Error(message);
                            }
                        }
                    }
                }
            }
        }

        AppCommand::NavigateFormField { forward } => match state.current_screen_mut() {
            Screen::Auth(auth_state) => {
                if forward {
                    auth_state.focus_next_field();
                } else {
                    auth_state.focus_prev_field();
                }
            }
            Screen::Dashboard(dashboard_state) => {
                if let Some(ref mut form) = dashboard_state.form_state {
                    // Two fields, so forward and backward land on the same one
                    form.focus_next_field();
                }
            }
            _ => {}
        },

        AppCommand::AppendFormFieldChar { c } => match state.current_screen_mut() {
            Screen::Auth(auth_state) => {
                auth_state.current_value_mut().push(c);
            }
            Screen::Dashboard(dashboard_state) => {
                if let Some(ref mut form) = dashboard_state.form_state {
                    form.current_value_mut().push(c);
                }
            }
            _ => {}
        },

        AppCommand::DeleteFormFieldChar => match state.current_screen_mut() {
            Screen::Auth(auth_state) => {
                auth_state.current_value_mut().pop();
            }
            Screen::Dashboard(dashboard_state) => {
                if let Some(ref mut form) = dashboard_state.form_state {
                    form.current_value_mut().pop();
                }
            }
            _ => {}
        },

        AppCommand::ClearFormField => match state.current_screen_mut() {
            Screen::Auth(auth_state) => {
                auth_state.current_value_mut().clear();
            }
            Screen::Dashboard(dashboard_state) => {
                if let Some(ref mut form) = dashboard_state.form_state {
                    form.current_value_mut().clear();
                }
            }
            _ => {}
        },

        AppCommand::LoadProfile { force_refresh } => {
            // A load without a stored token can only come back 401, so go
            // straight to sign-in instead
            if !data_loader.session.is_authenticated() {
                tracing::warn!("Profile load requested without a session, returning to sign-in");
                state.reset_to(Screen::Auth(AuthState::prefilled()));
            } else {
                match state.current_screen_mut() {
                    Screen::Dashboard(dashboard_state) => {
                        tracing::debug!("Refreshing profile");
                        dashboard_state.profile = if dashboard_state.user.is_some() {
                            // Keep the current copy on screen while refreshing
                            ProfileState::Cached(ThrobberState::default())
                        } else {
                            ProfileState::Loading(ThrobberState::default())
                        };
                    }
                    _ => {
                        tracing::debug!("Navigating to dashboard");
                        state.reset_to(Screen::Dashboard(DashboardState {
                            profile: ProfileState::Loading(ThrobberState::default()),
                            ..Default::default()
                        }));
                    }
                }

                let data_loader = data_loader.clone();
                let future = async move {
                    data_loader.load_profile(force_refresh).await;
                };
                task_manager.spawn_load_task("load_profile", future);
            }
        }

        AppCommand::Logout => {
            // A profile response landing after the reset would surface a
            // bogus expired-token error on the sign-in screen
            task_manager.cancel_all();
            data_loader.api_client.logout();
            tracing::info!("Signed out, returning to sign-in");
            state.reset_to(Screen::Auth(AuthState::prefilled()));
        }

        AppCommand::EnterProfileEditMode => {
            if let Screen::Dashboard(dashboard_state) = state.current_screen_mut() {
                if let Some(ref user) = dashboard_state.user {
                    dashboard_state.form_state = Some(ProfileFormState::from_user(user));
                    dashboard_state.input_mode = InputMode::ProfileEdit;
                    dashboard_state.update_loading = LoadingState::NotStarted;
                }
            }
        }

        AppCommand::ExitProfileEditMode => {
            if let Screen::Dashboard(dashboard_state) = state.current_screen_mut() {
                dashboard_state.input_mode = InputMode::Normal;
                dashboard_state.form_state = None;
                dashboard_state.update_loading = LoadingState::NotStarted;
            }
        }

        AppCommand::SubmitProfileEdit => {
            if let Screen::Dashboard(dashboard_state) = state.current_screen_mut() {
                let changes = match (&dashboard_state.form_state, &dashboard_state.user) {
                    (Some(form), Some(user)) => validators::build_profile_update(form, user),
                    _ => None,
                };

                match changes {
                    Some(changes) => {
                        dashboard_state.update_loading =
                            LoadingState::Loading(ThrobberState::default());

                        let data_loader = data_loader.clone();
                        let future = async move {
                            data_loader.update_profile(changes).await;
                        };
                        task_manager.spawn_load_task("update_profile", future);
                    }
                    None => {
                        // Nothing changed, close the form without a request
                        tracing::debug!("Profile edit submitted without changes");
                        dashboard_state.input_mode = InputMode::Normal;
                        dashboard_state.form_state = None;
                    }
                }
            }
        }

        AppCommand::NavigateBack => {
            state.navigate_back();
        }

        AppCommand::NavigateToLogs => {
            state.navigate_to(Screen::Logs(LogsState::default()));
        }

        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                // The offset counts backwards from the newest entry, so
                // scrolling up (into history) increases it
                if logs_state.scroll_offset < logs_state.total_entries.saturating_sub(1) {
                    logs_state.scroll_offset += 1;
                }
            }
        }

        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                // and down walks back toward the live tail
                logs_state.scroll_offset = logs_state.scroll_offset.saturating_sub(1);
            }
        }

        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                let page_size = 20;
                logs_state.scroll_offset = (logs_state.scroll_offset + page_size)
                    .min(logs_state.total_entries.saturating_sub(1));
            }
        }

        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                let page_size = 20;
                logs_state.scroll_offset = logs_state.scroll_offset.saturating_sub(page_size);
            }
        }

        AppCommand::ScrollLogsToTop => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.total_entries.saturating_sub(1);
            }
        }

        AppCommand::ScrollLogsToBottom => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = 0;
            }
        }

        AppCommand::SetPendingKey(c) => {
            state.pending_key = Some(c);
        }

        AppCommand::ClearPendingKey => {
            state.pending_key = None;
        }

        AppCommand::ToggleHelp => {
            state.help_visible = !state.help_visible;
        }

        AppCommand::Quit => {
            state.should_quit = true;
        }
    }

    // Every command except SetPendingKey consumes an armed sequence
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }
}

/// Pure-state twin of [`execute_command`] for tests.
///
/// Every pure state transition behaves exactly as in [`execute_command`].
/// Commands that normally spawn an API request (SubmitAuth, LoadProfile,
/// SubmitProfileEdit) move the state into its loading shape but skip the
/// request; tests inject the corresponding DataEvents directly.
///
/// Public so the testing module can reach it; production code goes through
/// [`execute_command`].
pub fn execute_command_sync(command: AppCommand, state: &mut AppState, session: &dyn SessionStore) {
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    match command {
        // Flag flips
        AppCommand::Quit => state.should_quit = true,
        AppCommand::ToggleHelp => state.help_visible = !state.help_visible,
        AppCommand::SetPendingKey(c) => state.pending_key = Some(c),
        AppCommand::ClearPendingKey => state.pending_key = None,

        // Auth screen
        AppCommand::SwitchAuthTab => {
            if let Screen::Auth(auth_state) = state.current_screen_mut() {
                auth_state.switch_tab();
            }
        }
        AppCommand::DismissAuthError => {
            if let Screen::Auth(auth_state) = state.current_screen_mut() {
                if matches!(auth_state.submit_loading, LoadingState::Error(_)) {
                    auth_state.submit_loading = LoadingState::NotStarted;
                }
            }
        }
        AppCommand::SubmitAuth => {
            if let Screen::Auth(auth_state) = state.current_screen_mut() {
                match auth_state.tab {
                    AuthTab::Login => {
                        auth_state.submit_loading = LoadingState::Loading(ThrobberState::default());
                    }
                    AuthTab::Register => {
                        match validators::validate_and_build_registration(auth_state) {
                            Ok(_) => {
                                auth_state.submit_loading =
                                    LoadingState::Loading(ThrobberState::default());
                            }
                            Err(message) => {
                                auth_state.submit_loading = LoadingState::Error(message);
                            }
                        }
                    }
                }
            }
        }

        // Form editing
        AppCommand::NavigateFormField { forward } => match state.current_screen_mut() {
            Screen::Auth(auth_state) => {
                if forward {
                    auth_state.focus_next_field();
                } else {
                    auth_state.focus_prev_field();
                }
            }
            Screen::Dashboard(dashboard_state) => {
                if let Some(ref mut form) = dashboard_state.form_state {
                    form.focus_next_field();
                }
            }
            _ => {}
        },
        AppCommand::AppendFormFieldChar { c } => match state.current_screen_mut() {
            Screen::Auth(auth_state) => {
                auth_state.current_value_mut().push(c);
            }
            Screen::Dashboard(dashboard_state) => {
                if let Some(ref mut form) = dashboard_state.form_state {
                    form.current_value_mut().push(c);
                }
            }
            _ => {}
        },
        AppCommand::DeleteFormFieldChar => match state.current_screen_mut() {
            Screen::Auth(auth_state) => {
                auth_state.current_value_mut().pop();
            }
            Screen::Dashboard(dashboard_state) => {
                if let Some(ref mut form) = dashboard_state.form_state {
                    form.current_value_mut().pop();
                }
            }
            _ => {}
        },
        AppCommand::ClearFormField => match state.current_screen_mut() {
            Screen::Auth(auth_state) => {
                auth_state.current_value_mut().clear();
            }
            Screen::Dashboard(dashboard_state) => {
                if let Some(ref mut form) = dashboard_state.form_state {
                    form.current_value_mut().clear();
                }
            }
            _ => {}
        },

        // Profile
        AppCommand::LoadProfile { .. } => {
            if !session.is_authenticated() {
                state.reset_to(Screen::Auth(AuthState::prefilled()));
            } else {
                match state.current_screen_mut() {
                    Screen::Dashboard(dashboard_state) => {
                        dashboard_state.profile = if dashboard_state.user.is_some() {
                            ProfileState::Cached(ThrobberState::default())
                        } else {
                            ProfileState::Loading(ThrobberState::default())
                        };
                    }
                    _ => {
                        state.reset_to(Screen::Dashboard(DashboardState {
                            profile: ProfileState::Loading(ThrobberState::default()),
                            ..Default::default()
                        }));
                    }
                }
            }
        }
        AppCommand::Logout => {
            if let Err(e) = session.clear_session() {
                tracing::warn!("Failed to clear session: {}", e);
            }
            state.reset_to(Screen::Auth(AuthState::prefilled()));
        }

        // Profile edit form
        AppCommand::EnterProfileEditMode => {
            if let Screen::Dashboard(dashboard_state) = state.current_screen_mut() {
                if let Some(ref user) = dashboard_state.user {
                    dashboard_state.form_state = Some(ProfileFormState::from_user(user));
                    dashboard_state.input_mode = InputMode::ProfileEdit;
                    dashboard_state.update_loading = LoadingState::NotStarted;
                }
            }
        }
        AppCommand::ExitProfileEditMode => {
            if let Screen::Dashboard(dashboard_state) = state.current_screen_mut() {
                dashboard_state.input_mode = InputMode::Normal;
                dashboard_state.form_state = None;
                dashboard_state.update_loading = LoadingState::NotStarted;
            }
        }
        AppCommand::SubmitProfileEdit => {
            if let Screen::Dashboard(dashboard_state) = state.current_screen_mut() {
                let changes = match (&dashboard_state.form_state, &dashboard_state.user) {
                    (Some(form), Some(user)) => validators::build_profile_update(form, user),
                    _ => None,
                };

                if changes.is_some() {
                    dashboard_state.update_loading = LoadingState::Loading(ThrobberState::default());
                } else {
                    dashboard_state.input_mode = InputMode::Normal;
                    dashboard_state.form_state = None;
                }
            }
        }

        // Screen stack
        AppCommand::NavigateBack => {
            state.navigate_back();
        }
        AppCommand::NavigateToLogs => {
            state.navigate_to(Screen::Logs(LogsState::default()));
        }
        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                if s.scroll_offset < s.total_entries.saturating_sub(1) {
                    s.scroll_offset += 1;
                }
            }
        }
        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = (s.scroll_offset + 20).min(s.total_entries.saturating_sub(1));
            }
        }
        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(20);
            }
        }
        AppCommand::ScrollLogsToTop => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.total_entries.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsToBottom => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = 0;
            }
        }
    }

    // Same sequence cleanup as the real executor
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }
}
