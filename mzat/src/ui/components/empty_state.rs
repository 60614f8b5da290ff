//! Bordered placeholder for screens with nothing to show.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Fill `area` with a titled border around a centered message, plus an
/// optional key hint underneath.
///
/// Covers every "no content" body: the initial fetch before a cached
/// copy exists, an empty log buffer, and load errors where nothing was
/// ever rendered.
pub fn render_empty_state(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    hint: Option<&str>,
) {
    let mut body = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::loading_style())),
    ];
    if let Some(hint) = hint {
        body.push(Line::from(""));
        body.push(Line::from(Span::styled(hint, theme::help_text_style())));
    }

    let placeholder = Paragraph::new(body)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(placeholder, area);
}
