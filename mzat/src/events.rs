use metazapp_api::{ErrorKind, User};

/// Commands to execute (user actions → state changes and background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Auth screen
    SwitchAuthTab,
    DismissAuthError,
    SubmitAuth,

    // Shared form editing (auth fields, profile edit form)
    NavigateFormField {
        forward: bool,
    },
    AppendFormFieldChar {
        c: char,
    },
    DeleteFormFieldChar,
    ClearFormField,

    // Profile
    LoadProfile {
        force_refresh: bool,
    },
    Logout,

    // Profile editing (dashboard)
    EnterProfileEditMode,
    ExitProfileEditMode,
    SubmitProfileEdit,

    // Screen stack
    NavigateBack,

    // Log viewer
    NavigateToLogs,
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Two-key sequences
    SetPendingKey(char),
    ClearPendingKey,

    // System
    ToggleHelp,
    Quit,
}

/// Messages background tasks send back to the UI loop.
#[derive(Debug, Clone)]
pub enum DataEvent {
    // Auth results
    LoggedIn {
        user: User,
    },
    LoginFailed {
        kind: ErrorKind,
        message: String,
    },
    Registered {
        user: User,
    },
    RegisterFailed {
        kind: ErrorKind,
        message: String,
    },

    // From the stored session, before any request returns
    ProfileCacheLoaded {
        user: User,
    },

    // From the server
    ProfileLoaded {
        user: User,
    },
    ProfileLoadFailed {
        kind: ErrorKind,
        message: String,
    },

    // Profile updates
    ProfileUpdated {
        user: User,
    },
    ProfileUpdateFailed {
        kind: ErrorKind,
        message: String,
    },
}
