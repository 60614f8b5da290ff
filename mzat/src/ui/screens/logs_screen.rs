use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use tracing::Level;

use crate::log_buffer::{LogBuffer, LogEntry};
use crate::state::LogsState;
use crate::ui::{
    components::{empty_state, help_bar},
    layouts, theme,
};

const TARGET_WIDTH: usize = 25;

pub fn render(f: &mut Frame, state: &LogsState, log_buffer: &LogBuffer) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let title = format!("Logs ({} entries)", state.total_entries);
    f.render_widget(Paragraph::new(title).style(theme::title_style()), title_area);

    render_logs(f, content_area, state, log_buffer);
    render_help(f, help_area, state);
}

fn render_logs(f: &mut Frame, area: Rect, state: &LogsState, log_buffer: &LogBuffer) {
    let entries = log_buffer.get_entries();
    if entries.is_empty() {
        empty_state::render_empty_state(f, area, "Logs", "No log entries yet", None);
        return;
    }

    // Two rows of the table's own border sit inside `area`
    let page = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_range(entries.len(), state.scroll_offset, page);

    let rows: Vec<Row> = entries[start..end].iter().map(log_row).collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(5),
            Constraint::Length(TARGET_WIDTH as u16),
            Constraint::Min(30),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(format!(
        " Logs [{}-{} of {}] ",
        start + 1,
        end,
        entries.len()
    )))
    .header(
        Row::new(vec!["Time", "Level", "Target", "Message"])
            .style(theme::header_style())
            .bottom_margin(1),
    );

    f.render_widget(table, area);
}

fn render_help(f: &mut Frame, area: Rect, state: &LogsState) {
    let mut hints =
        String::from("j/k: scroll | G: bottom | gg: top | PgUp/PgDn: page | h: back | ?: help");
    if state.scroll_offset > 0 {
        hints.push_str(&format!(" (scrolled {} from bottom)", state.scroll_offset));
    }

    help_bar::render_help_bar(f, area, &hints);
}

/// Half-open `[start, end)` window of the buffer to show. The offset
/// counts entries back from the newest, so offset 0 pins the window to
/// the bottom of the buffer.
fn visible_range(total: usize, offset: usize, page: usize) -> (usize, usize) {
    let end = total.saturating_sub(offset);
    let start = end.saturating_sub(page);
    (start, end)
}

fn log_row(entry: &LogEntry) -> Row<'static> {
    Row::new(vec![
        entry.timestamp.format("%H:%M:%S%.3f").to_string(),
        level_label(entry.level).to_string(),
        truncate_target(&entry.target, TARGET_WIDTH),
        entry.message.clone(),
    ])
    .style(level_style(entry.level))
}

fn level_style(level: Level) -> Style {
    match level {
        Level::ERROR => theme::error_text_style(),
        Level::WARN => Style::default().fg(theme::COLOR_LOADING),
        Level::INFO => Style::default().fg(theme::COLOR_SUCCESS),
        Level::DEBUG => Style::default().fg(Color::Blue),
        Level::TRACE => Style::default().fg(theme::COLOR_MUTED),
    }
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN ",
        Level::INFO => "INFO ",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// Module paths longer than the column keep their tail, which carries
/// the distinguishing segments.
fn truncate_target(target: &str, width: usize) -> String {
    if target.len() <= width {
        return target.to_string();
    }
    format!("...{}", &target[target.len() - (width - 3)..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_pins_newest_at_offset_zero() {
        assert_eq!(visible_range(100, 0, 20), (80, 100));
    }

    #[test]
    fn test_visible_range_scrolls_back_in_history() {
        assert_eq!(visible_range(100, 30, 20), (50, 70));
    }

    #[test]
    fn test_visible_range_clamps_at_the_oldest_entry() {
        assert_eq!(visible_range(10, 0, 20), (0, 10));
        assert_eq!(visible_range(10, 50, 20), (0, 0));
    }

    #[test]
    fn test_truncate_target_keeps_the_tail() {
        assert_eq!(truncate_target("mzat::ui", 25), "mzat::ui");
        assert_eq!(
            truncate_target("mzat::background::data_loader", 25),
            "...ackground::data_loader"
        );
    }
}
