//! Centered modal frame shared by the overlay components.

use ratatui::prelude::Rect;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders, Clear},
    Frame,
};

/// Relative footprint of a modal within the terminal.
#[derive(Debug, Clone, Copy)]
pub enum PopupSize {
    /// Compact dialog, sized for a short form.
    Medium,
    /// Nearly full screen, for reference content like the help overlay.
    Large,
}

impl PopupSize {
    fn percentages(self) -> (u16, u16) {
        match self {
            PopupSize::Medium => (60, 30),
            PopupSize::Large => (80, 80),
        }
    }
}

/// Clear a centered region, draw the titled border, and hand back the
/// interior for the caller to fill.
///
/// The border style doubles as the modal's severity cue, so callers pass
/// one of the `theme::*_border_style()` helpers.
pub fn render_popup_frame(
    f: &mut Frame,
    parent_area: Rect,
    size: PopupSize,
    title: &str,
    border_style: Style,
) -> Rect {
    let area = centered(size, parent_area);
    f.render_widget(Clear, area);

    let frame = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = frame.inner(area);
    f.render_widget(frame, area);

    inner
}

fn centered(size: PopupSize, parent: Rect) -> Rect {
    let (width_pct, height_pct) = size.percentages();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height_pct) / 2),
            Constraint::Percentage(height_pct),
            Constraint::Percentage((100 - height_pct) / 2),
        ])
        .split(parent);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_pct) / 2),
            Constraint::Percentage(width_pct),
            Constraint::Percentage((100 - width_pct) / 2),
        ])
        .split(rows[1])[1]
}
