pub mod reducer;
pub mod validators;

use crate::ui::screens::Screen;
use metazapp_api::User;
use throbber_widgets_tui::ThrobberState;

/// Demo account email pre-filled on the login tab
pub const DEMO_EMAIL: &str = "demo@metazapp.com";
/// Demo account password paired with [`DEMO_EMAIL`]
pub const DEMO_PASSWORD: &str = "password";

/// Lifecycle of a submit or update request, kept apart from the data it
/// eventually produces
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

/// Whether a screen is in plain navigation or capturing form input
#[derive(Default, Debug, Clone, PartialEq)]
pub enum InputMode {
    #[default]
    Normal,
    ProfileEdit,
}

/// Which tab of the auth card is active
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

impl AuthTab {
    /// Display name for the tab bar
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }
}

/// Form field on the auth card
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

/// State for the login/register card
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub tab: AuthTab,
    pub current_field: AuthField,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub submit_loading: LoadingState,
}

impl AuthState {
    /// Login tab with the demo credentials pre-filled
    pub fn prefilled() -> Self {
        Self {
            tab: AuthTab::Login,
            current_field: AuthField::Email,
            name: String::new(),
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
            confirm_password: String::new(),
            submit_loading: LoadingState::NotStarted,
        }
    }

    /// Switch between the login and register tabs.
    ///
    /// Any submit error is dropped on the way over. Entering the login tab
    /// restores the demo credentials; the register tab keeps whatever email
    /// and password were already typed so a half-filled form survives a
    /// round trip.
    pub fn switch_tab(&mut self) {
        self.submit_loading = LoadingState::NotStarted;
        match self.tab {
            AuthTab::Login => {
                self.tab = AuthTab::Register;
                self.current_field = AuthField::Name;
            }
            AuthTab::Register => {
                self.tab = AuthTab::Login;
                self.email = DEMO_EMAIL.to_string();
                self.password = DEMO_PASSWORD.to_string();
                self.current_field = AuthField::Email;
            }
        }
    }

    /// Fields the active tab shows, in traversal order
    pub fn fields(&self) -> &'static [AuthField] {
        match self.tab {
            AuthTab::Login => &[AuthField::Email, AuthField::Password],
            AuthTab::Register => &[
                AuthField::Name,
                AuthField::Email,
                AuthField::Password,
                AuthField::ConfirmPassword,
            ],
        }
    }

    /// Move focus to the next field, wrapping at the end
    pub fn focus_next_field(&mut self) {
        let fields = self.fields();
        let index = fields
            .iter()
            .position(|f| *f == self.current_field)
            .unwrap_or(0);
        self.current_field = fields[(index + 1) % fields.len()];
    }

    /// Move focus to the previous field, wrapping at the start
    pub fn focus_prev_field(&mut self) {
        let fields = self.fields();
        let index = fields
            .iter()
            .position(|f| *f == self.current_field)
            .unwrap_or(0);
        self.current_field = fields[(index + fields.len() - 1) % fields.len()];
    }

    /// Mutable access to the value of the focused field
    pub fn current_value_mut(&mut self) -> &mut String {
        match self.current_field {
            AuthField::Name => &mut self.name,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
            AuthField::ConfirmPassword => &mut self.confirm_password,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submit_loading, LoadingState::Loading(..))
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::prefilled()
    }
}

/// Form field for profile editing
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum ProfileField {
    #[default]
    Name,
    Email,
}

/// State for the profile edit form on the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFormState {
    pub current_field: ProfileField,
    pub name: String,
    pub email: String,
}

impl ProfileFormState {
    pub fn from_user(user: &User) -> Self {
        Self {
            current_field: ProfileField::Name,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }

    /// Mutable access to the value of the focused field
    pub fn current_value_mut(&mut self) -> &mut String {
        match self.current_field {
            ProfileField::Name => &mut self.name,
            ProfileField::Email => &mut self.email,
        }
    }

    pub fn focus_next_field(&mut self) {
        self.current_field = match self.current_field {
            ProfileField::Name => ProfileField::Email,
            ProfileField::Email => ProfileField::Name,
        };
    }
}

/// Lifecycle of the signed-in user's profile on the dashboard.
///
/// `Cached` means a copy from the session store is on screen while a fresh
/// fetch is still in flight; `Errored` keeps whatever copy was already
/// rendered visible alongside the error.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum ProfileState {
    #[default]
    Uninitialized,
    Loading(ThrobberState),
    Cached(ThrobberState),
    Loaded,
    Errored(String),
}

impl ProfileState {
    /// True while a fetch is in flight, with or without a cached copy on screen
    pub fn is_fetching(&self) -> bool {
        matches!(self, Self::Loading(..) | Self::Cached(..))
    }
}

/// State for the dashboard screen
#[derive(Default, Debug, Clone)]
pub struct DashboardState {
    pub user: Option<User>,
    pub profile: ProfileState,
    pub input_mode: InputMode,

    // Profile edit form
    pub form_state: Option<ProfileFormState>,
    pub update_loading: LoadingState,
}

impl DashboardState {
    /// Dashboard entered with the login response already in hand.
    ///
    /// The response user doubles as the cached copy while the follow-up
    /// profile fetch confirms it.
    pub fn with_user(user: User) -> Self {
        Self {
            user: Some(user),
            profile: ProfileState::Cached(ThrobberState::default()),
            ..Default::default()
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,

    // UI state
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            history: vec![Screen::Auth(AuthState::prefilled())],

            help_visible: false,
            pending_key: None,

            should_quit: false,
        }
    }

    /// Screen on top of the navigation stack
    pub fn current_screen(&self) -> &Screen {
        self.history.last().expect("navigation stack is never empty")
    }

    /// Mutable access to the top screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history
            .last_mut()
            .expect("navigation stack is never empty")
    }

    /// Push a screen onto the stack
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Screen pushed, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Pop the top screen. Returns false when already at the root.
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            tracing::debug!(
                "Screen popped, stack depth: {} -> {}",
                self.history.len(),
                self.history.len() - 1
            );
            self.history.pop();
            true
        } else {
            tracing::debug!("Back ignored, already at the root screen");
            false
        }
    }

    /// Replace the whole navigation stack with a single screen.
    ///
    /// Used when crossing the auth boundary (login, logout, expired session)
    /// where navigating back into the previous surface would make no sense.
    pub fn reset_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Resetting navigation stack, depth: {} -> 1",
            self.history.len()
        );
        self.history.clear();
        self.history.push(screen);
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        match self.current_screen_mut() {
            Screen::Auth(state) => {
                if let LoadingState::Loading(ref mut throbber_state) = state.submit_loading {
                    return Some(throbber_state);
                }
            }
            Screen::Dashboard(state) => {
                if let LoadingState::Loading(ref mut throbber_state) = state.update_loading {
                    return Some(throbber_state);
                }
                match state.profile {
                    ProfileState::Loading(ref mut throbber_state)
                    | ProfileState::Cached(ref mut throbber_state) => {
                        return Some(throbber_state);
                    }
                    _ => {}
                }
            }
            Screen::Logs(_) => {
                // Nothing spins on the logs screen
            }
        }
        None
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
