//! Title row every screen renders, with an activity throbber on the right.

use ratatui::prelude::Rect;
use ratatui::{widgets::Paragraph, Frame};

use crate::state::ProfileState;
use crate::ui::{layouts, theme};

use super::loading_indicator;

/// Render a screen title with the profile fetch indicator on the right.
///
/// The title text sits on the left in the accent style; the spinner (or
/// its settled marker) occupies the top-right corner.
pub fn render_screen_title(f: &mut Frame, area: Rect, title: &str, profile: &ProfileState) {
    let (title_area, indicator_area) = layouts::split_title_row(area);

    let paragraph = Paragraph::new(title).style(theme::title_style());
    f.render_widget(paragraph, title_area);

    loading_indicator::render_loading_indicator(f, indicator_area, profile);
}
