use ratatui::{prelude::*, widgets::Paragraph, Frame};
use throbber_widgets_tui::Throbber;

use crate::state::{LoadingState, ProfileField, ProfileFormState};
use crate::ui::theme;

use super::popup::{self, PopupSize};

const PLACEHOLDER: &str = "_____________";

/// Renders the profile edit popup over the dashboard. Fields left empty
/// submit as unchanged.
pub fn render_profile_edit_form(
    f: &mut Frame,
    form: &ProfileFormState,
    update_loading: &LoadingState,
) {
    let inner = popup::render_popup_frame(
        f,
        f.area(),
        PopupSize::Medium,
        " Edit Profile ",
        theme::info_border_style(),
    );

    let rows = Layout::vertical([
        Constraint::Length(1), // name
        Constraint::Length(1), // email
        Constraint::Length(1),
        Constraint::Min(1), // status line
    ])
    .horizontal_margin(1)
    .split(inner);

    render_field(
        f,
        rows[0],
        "Name",
        &form.name,
        form.current_field == ProfileField::Name,
    );
    render_field(
        f,
        rows[1],
        "Email",
        &form.email,
        form.current_field == ProfileField::Email,
    );
    render_status(f, rows[3], update_loading);
}

fn render_field(f: &mut Frame, area: Rect, label: &'static str, value: &str, focused: bool) {
    let display = if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    };

    let value_style = if focused {
        theme::form_field_focused_style()
    } else if value.is_empty() {
        Style::default().fg(theme::COLOR_MUTED)
    } else {
        theme::form_field_style()
    };

    let line = Line::from(vec![
        Span::styled(format!("{:8}", label), theme::header_style()),
        Span::styled(display, value_style),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_status(f: &mut Frame, area: Rect, update_loading: &LoadingState) {
    match update_loading {
        LoadingState::Loading(throbber_state) => {
            let throbber = Throbber::default()
                .label("Saving...")
                .style(theme::loading_style())
                .throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
            f.render_stateful_widget(throbber, area, &mut throbber_state.clone());
        }
        LoadingState::Error(message) => {
            let error = Paragraph::new(message.as_str()).style(theme::error_text_style());
            f.render_widget(error, area);
        }
        _ => {
            let hint = Paragraph::new("Enter: save | Esc: cancel | Tab: switch field")
                .style(theme::help_text_style());
            f.render_widget(hint, area);
        }
    }
}
