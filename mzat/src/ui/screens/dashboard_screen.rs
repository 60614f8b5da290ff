use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use metazapp_api::User;

use crate::state::{DashboardState, ProfileState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme,
};
use crate::utils::dates;

const HELP_TEXT: &str = "r: refresh | e: edit profile | l: logout | g-l: logs | ?: help | q: quit";

pub fn render(f: &mut Frame, state: &DashboardState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, "Dashboard", &state.profile);
    render_content(f, content_area, state);
    help_bar::render_help_bar(f, help_area, HELP_TEXT);
}

fn render_content(f: &mut Frame, area: Rect, state: &DashboardState) {
    match (&state.user, &state.profile) {
        // A cached or freshly loaded user renders immediately, even while a
        // refresh is still in flight.
        (Some(user), profile) => render_profile(f, area, user, profile),
        (None, ProfileState::Uninitialized | ProfileState::Loading(..)) => {
            empty_state::render_empty_state(f, area, "Profile", "Loading profile...", None);
        }
        (None, ProfileState::Errored(message)) => {
            empty_state::render_empty_state(f, area, "Profile", message, Some("Press r to retry"));
        }
        (None, _) => {
            empty_state::render_empty_state(f, area, "Profile", "No user data available", None);
        }
    }
}

fn render_profile(f: &mut Frame, area: Rect, user: &User, profile: &ProfileState) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // welcome line
        Constraint::Length(1),
        Constraint::Length(6), // profile card
        Constraint::Length(1), // status line
        Constraint::Min(0),
    ])
    .split(area);

    let welcome = Paragraph::new(format!("Welcome back, {}!", user.name))
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(welcome, chunks[0]);

    render_profile_card(f, chunks[2], user);

    // A failed refresh keeps the stale copy on screen with an inline notice
    if let ProfileState::Errored(message) = profile {
        let status = Paragraph::new(Line::from(vec![
            Span::styled(message.clone(), theme::error_text_style()),
            Span::styled(
                " (press r to retry)",
                Style::default().fg(theme::COLOR_MUTED),
            ),
        ]));
        f.render_widget(status, chunks[3]);
    }
}

fn render_profile_card(f: &mut Frame, area: Rect, user: &User) {
    let rows = vec![
        profile_row("Name", user.name.clone()),
        profile_row("Email", user.email.clone()),
        profile_row(
            "Member Since",
            dates::format_long_date(&user.created_at.with_timezone(&chrono::Local)),
        ),
        profile_row(
            "Last Updated",
            dates::format_long_date(&user.updated_at.with_timezone(&chrono::Local)),
        ),
    ];

    let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(20)]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Profile Information "),
    );

    f.render_widget(table, area);
}

fn profile_row(label: &'static str, value: String) -> Row<'static> {
    Row::new(vec![
        Cell::from(label).style(theme::header_style()),
        Cell::from(value),
    ])
}
