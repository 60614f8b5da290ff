use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::state::ProfileState;
use crate::ui::theme;

/// Render a fetch indicator in the top-right corner.
///
/// Spins while a profile fetch is in flight (with or without a cached copy
/// on screen), then settles into a check mark or an error marker.
pub fn render_loading_indicator(f: &mut Frame, area: Rect, profile: &ProfileState) {
    let (text, color) = match profile {
        ProfileState::Uninitialized => return, // Don't show anything
        ProfileState::Loading(throbber_state) | ProfileState::Cached(throbber_state) => {
            let simple = throbber_widgets_tui::Throbber::default()
                .throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
            f.render_stateful_widget(simple, area, &mut throbber_state.clone());
            return;
        }
        ProfileState::Loaded => ("✓", theme::COLOR_SUCCESS),
        ProfileState::Errored(_) => ("x", theme::COLOR_ERROR),
    };

    let indicator =
        Paragraph::new(Span::styled(text, Style::default().fg(color))).alignment(Alignment::Right);

    f.render_widget(indicator, area);
}
