use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use throbber_widgets_tui::Throbber;

use crate::state::{AuthField, AuthState, AuthTab, LoadingState};
use crate::ui::{components::help_bar, layouts, theme};

const CARD_WIDTH: u16 = 46;
const PLACEHOLDER: &str = "_____________";

pub fn render(f: &mut Frame, state: &AuthState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let title = Paragraph::new("Metazapp").style(theme::title_style());
    f.render_widget(title, title_area);

    render_card(f, content_area, state);

    help_bar::render_help_bar(f, help_area, &help_text(state));
}

fn help_text(state: &AuthState) -> String {
    let base =
        "Enter: submit | Tab: next field | Ctrl+T: switch tab | Ctrl+L: clear field | Ctrl+C: quit";
    if matches!(state.submit_loading, LoadingState::Error(_)) {
        format!("Esc: dismiss error | {}", base)
    } else {
        base.to_string()
    }
}

fn render_card(f: &mut Frame, area: Rect, state: &AuthState) {
    let fields = state.fields();
    // Tab bar, subtitle and spacer above the fields, status line below,
    // three rows per field, plus the card borders.
    let height = 3 * fields.len() as u16 + 6;
    let card_area = layouts::centered_card(CARD_WIDTH, height, area);

    let border_style = if matches!(state.submit_loading, LoadingState::Error(_)) {
        theme::danger_border_style()
    } else {
        theme::accent_border_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Metazapp Accounts ")
        .title_alignment(Alignment::Center)
        .border_style(border_style);
    let inner = block.inner(card_area);
    f.render_widget(block, card_area);

    let mut constraints = vec![
        Constraint::Length(1), // tab bar
        Constraint::Length(1), // subtitle
        Constraint::Length(1),
    ];
    for _ in fields {
        constraints.push(Constraint::Length(1)); // label
        constraints.push(Constraint::Length(1)); // input
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1)); // status line

    let rows = Layout::vertical(constraints)
        .horizontal_margin(2)
        .split(inner);

    f.render_widget(tab_bar(state.tab), rows[0]);
    f.render_widget(subtitle(state.tab), rows[1]);

    for (i, field) in fields.iter().enumerate() {
        let label = Paragraph::new(field_label(*field)).style(theme::header_style());
        f.render_widget(label, rows[3 + i * 3]);
        render_input(f, rows[4 + i * 3], state, *field);
    }

    render_status(f, rows[rows.len() - 1], state);
}

fn tab_bar(active: AuthTab) -> Paragraph<'static> {
    let style_for = |tab: AuthTab| {
        if tab == active {
            theme::tab_active_style()
        } else {
            theme::tab_inactive_style()
        }
    };

    Paragraph::new(Line::from(vec![
        Span::styled(" Login ", style_for(AuthTab::Login)),
        Span::raw("│"),
        Span::styled(" Register ", style_for(AuthTab::Register)),
    ]))
}

fn subtitle(tab: AuthTab) -> Paragraph<'static> {
    let text = match tab {
        AuthTab::Login => "Login to your account",
        AuthTab::Register => "Create a new account",
    };
    Paragraph::new(text).style(theme::help_text_style())
}

fn render_input(f: &mut Frame, area: Rect, state: &AuthState, field: AuthField) {
    let value = field_value(state, field);
    let focused = state.current_field == field;

    let display = if value.is_empty() {
        PLACEHOLDER.to_string()
    } else if is_masked(field) {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let style = if focused {
        theme::form_field_focused_style()
    } else if value.is_empty() {
        Style::default().fg(theme::COLOR_MUTED)
    } else {
        theme::form_field_style()
    };

    f.render_widget(Paragraph::new(display).style(style), area);
}

fn render_status(f: &mut Frame, area: Rect, state: &AuthState) {
    match &state.submit_loading {
        LoadingState::Loading(throbber_state) => {
            let label = match state.tab {
                AuthTab::Login => "Signing in...",
                AuthTab::Register => "Creating account...",
            };
            let throbber = Throbber::default()
                .label(label)
                .style(theme::loading_style())
                .throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
            f.render_stateful_widget(throbber, area, &mut throbber_state.clone());
        }
        LoadingState::Error(message) => {
            let error = Paragraph::new(message.as_str()).style(theme::error_text_style());
            f.render_widget(error, area);
        }
        _ => {}
    }
}

fn field_label(field: AuthField) -> &'static str {
    match field {
        AuthField::Name => "Name",
        AuthField::Email => "Email",
        AuthField::Password => "Password",
        AuthField::ConfirmPassword => "Confirm Password",
    }
}

fn field_value(state: &AuthState, field: AuthField) -> &str {
    match field {
        AuthField::Name => &state.name,
        AuthField::Email => &state.email,
        AuthField::Password => &state.password,
        AuthField::ConfirmPassword => &state.confirm_password,
    }
}

fn is_masked(field: AuthField) -> bool {
    matches!(field, AuthField::Password | AuthField::ConfirmPassword)
}
