//! Colors, layout constants, and style helpers shared by every screen.
//!
//! Screens and components never build ad-hoc `Style` values; they pull
//! from here so the palette can change in one place.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Colors
// =============================================================================

/// Success markers and INFO log lines
pub const COLOR_SUCCESS: Color = Color::Green;

/// Error messages and ERROR log lines
pub const COLOR_ERROR: Color = Color::Red;

/// De-emphasized text: placeholders, TRACE log lines
pub const COLOR_MUTED: Color = Color::DarkGray;

/// Field labels and table headers
pub const COLOR_HEADER: Color = Color::Yellow;

/// Key hints and other secondary text
pub const COLOR_HELP_TEXT: Color = Color::Gray;

/// Screen titles and accent text
pub const COLOR_TITLE: Color = Color::Cyan;

/// In-flight status messages; also WARN log lines
pub const COLOR_LOADING: Color = Color::Yellow;

/// Border of a surface showing an error
pub const COLOR_BORDER_DANGER: Color = Color::Red;

/// Border of informational popups
pub const COLOR_BORDER_INFO: Color = Color::Blue;

/// Border of accented surfaces
pub const COLOR_BORDER_ACCENT: Color = Color::Cyan;

/// Background behind the focused form field
pub const COLOR_FORM_FIELD_BG: Color = Color::DarkGray;

// =============================================================================
// Layout
// =============================================================================

/// Margin between the terminal edge and screen content
pub const SCREEN_MARGIN: u16 = 2;

/// Height of the title row
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the bottom hint bar
pub const HELP_BAR_HEIGHT: u16 = 3;

// =============================================================================
// Styles
// =============================================================================

/// Field labels and table headers
pub fn header_style() -> Style {
    Style::default()
        .fg(COLOR_HEADER)
        .add_modifier(Modifier::BOLD)
}

/// Key hints in the bottom bar and popups
pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

/// Screen titles
pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD)
}

/// In-flight status messages and placeholders
pub fn loading_style() -> Style {
    Style::default().fg(COLOR_LOADING)
}

/// Inline error messages: submit failures, load errors
pub fn error_text_style() -> Style {
    Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD)
}

/// The form field holding focus
pub fn form_field_focused_style() -> Style {
    Style::default()
        .bg(COLOR_FORM_FIELD_BG)
        .add_modifier(Modifier::BOLD)
}

/// Unfocused form fields
pub fn form_field_style() -> Style {
    Style::default().fg(Color::White)
}

/// The selected tab in the sign-in card's tab bar
pub fn tab_active_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// The unselected tab
pub fn tab_inactive_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

/// Border of a surface showing an error
pub fn danger_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_DANGER)
        .add_modifier(Modifier::BOLD)
}

/// Border of informational popups
pub fn info_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_INFO)
        .add_modifier(Modifier::BOLD)
}

/// Border of accented surfaces
pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_BORDER_ACCENT)
}
