use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use crate::ui::{screens::Screen, theme};

use super::popup::{self, PopupSize};

pub fn render_help_popup(f: &mut Frame, screen: &Screen) {
    let help_items = get_help_items(screen);

    let inner = popup::render_popup_frame(
        f,
        f.area(),
        PopupSize::Large,
        " Help (? or Esc closes) ",
        theme::accent_border_style(),
    );

    // One row per binding, key column padded for alignment
    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

fn get_help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    // Bindings for the screen under the popup first
    match screen {
        Screen::Auth(..) => {
            items.push(("Tab/↓", "Next field"));
            items.push(("Shift+Tab/↑", "Previous field"));
            items.push(("Enter", "Submit the active tab"));
            items.push(("Ctrl+T", "Switch between login and register"));
            items.push(("Ctrl+L", "Clear the focused field"));
            items.push(("Esc", "Dismiss an error message"));
            items.push(("Ctrl+C", "Quit"));
        }
        Screen::Dashboard(..) => {
            items.push(("r", "Refresh profile from the server"));
            items.push(("e", "Edit name and email"));
            items.push(("l", "Log out"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Older entries"));
            items.push(("↓/j", "Newer entries"));
            items.push(("Page Up", "Page back through history"));
            items.push(("Page Down", "Page forward"));
            items.push(("g then g", "Jump to the oldest entry"));
            items.push(("G", "Jump to the newest entry"));
        }
    }

    // then the bindings that work everywhere
    items.push(("", ""));
    items.push(("--- Global keys ---", ""));
    items.push(("h/←", "Back"));
    items.push(("g then l", "Open the log viewer"));
    items.push(("?", "Show or hide this help"));
    items.push(("q", "Quit"));

    items
}
