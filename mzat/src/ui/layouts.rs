//! Screen-level layout builders.
//!
//! Every screen splits the terminal the same way, so margins and bar
//! positions stay put while navigating between screens.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{HELP_BAR_HEIGHT, SCREEN_MARGIN, TITLE_HEIGHT};

/// Title row, content region, help bar. The content region absorbs
/// whatever height is left over.
pub fn screen_layout(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(10),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (rows[0], rows[1], rows[2])
}

/// Title text on the left, one cell on the right for the fetch
/// indicator.
pub fn split_title_row(area: Rect) -> (Rect, Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(100), Constraint::Length(1)])
        .split(area);

    (cols[0], cols[1])
}

/// Center a fixed-size rectangle inside `area`.
///
/// Form cards size themselves by field count rather than by terminal
/// size; when the terminal is smaller than the requested card, the card
/// shrinks to fit.
pub fn centered_card(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}
