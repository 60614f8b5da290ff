//! Bottom key-hint bar.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Draw the bordered hint bar that anchors every screen.
///
/// Callers assemble the pipe-separated "key: action" pairs; the muted
/// styling and centering live here so the bar reads the same everywhere.
pub fn render_help_bar(f: &mut Frame, area: Rect, hints: &str) {
    let bar = Paragraph::new(hints)
        .style(theme::help_text_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(bar, area);
}
