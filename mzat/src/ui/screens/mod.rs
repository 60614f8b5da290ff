pub mod auth_screen;
pub mod dashboard_screen;
pub mod logs_screen;

use crate::state::{AuthState, DashboardState, LogsState};

#[derive(Debug, Clone)]
pub enum Screen {
    Auth(AuthState),
    Dashboard(DashboardState),
    Logs(LogsState),
}
