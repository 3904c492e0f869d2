//! Device list screen. One card per device, Enter opens the detail view.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};

use kinetic_core::{Device, ListView, LoadState};

use crate::action::Action;
use crate::theme;
use crate::widgets::{status_indicator, time_fmt};

pub const LOADING_LABEL: &str = "Loading devices...";

/// Map a key to an action while the list is mounted.
pub fn handle_key_event(view: &ListView, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollToTop),
        KeyCode::Char('G') | KeyCode::End => Some(Action::ScrollToBottom),
        KeyCode::Enter => view.select_current().map(Action::SelectDevice),
        _ => None,
    }
}

pub fn render(frame: &mut Frame, area: Rect, view: &ListView, throbber: &ThrobberState) {
    let title = match view.state() {
        LoadState::Ready(devices) => format!(" Devices ({}) ", devices.len()),
        _ => " Devices ".to_owned(),
    };
    let block = Block::default()
        .title(title)
        .title_style(theme::heading())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::panel_border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::vertical([
        Constraint::Min(1),    // cards
        Constraint::Length(1), // hints
    ])
    .split(inner);

    match view.state() {
        LoadState::Loading => {
            let spinner = Throbber::default()
                .label(LOADING_LABEL)
                .style(theme::spinner_label())
                .throbber_style(theme::spinner());
            frame.render_stateful_widget(spinner, layout[0], &mut throbber.clone());
        }
        LoadState::Failed(message) => {
            frame.render_widget(
                Paragraph::new(format!("Error: {message}")).style(theme::error()),
                layout[0],
            );
        }
        LoadState::Ready(devices) => {
            let items: Vec<ListItem> = devices
                .iter()
                .enumerate()
                .map(|(i, device)| device_card(device, i == view.cursor()))
                .collect();
            let list = List::new(items).highlight_style(theme::card_selected());
            let mut state = ListState::default().with_selected(Some(view.cursor()));
            frame.render_stateful_widget(list, layout[0], &mut state);
        }
    }

    let hints = Line::from(vec![
        Span::styled("  j/k ", theme::hint_key()),
        Span::styled("navigate  ", theme::hint()),
        Span::styled("Enter ", theme::hint_key()),
        Span::styled("metrics  ", theme::hint()),
        Span::styled("? ", theme::hint_key()),
        Span::styled("help", theme::hint()),
    ]);
    frame.render_widget(Paragraph::new(hints), layout[1]);
}

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("   {label} "), theme::card_label()),
        Span::styled(value, theme::card_value()),
    ])
}

/// One device as a multi-line card. Absent optional values print empty.
fn device_card(device: &Device, selected: bool) -> ListItem<'_> {
    let class = device.connection_class();
    let marker = if selected { "▸" } else { " " };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(marker, theme::heading()),
            status_indicator::status_span(&class),
            Span::styled(" Order: ", theme::card_label()),
            Span::styled(device.id.as_str(), theme::heading()),
        ]),
        field("Description:", device.name.clone().unwrap_or_default()),
        field("Production Status:", device.status.clone()),
        Line::from(vec![
            Span::styled("   Release Status: ", theme::card_label()),
            Span::styled(
                device.connection_state.as_str(),
                Style::default().fg(status_indicator::status_color(&class)),
            ),
        ]),
    ];

    if let Some(last_seen) = device.last_seen.as_deref() {
        lines.push(field("Build Plan Date:", time_fmt::fmt_local(last_seen)));
    }

    if let Some(extra) = &device.extra_info {
        let text = |value: Option<&str>| value.unwrap_or_default().to_owned();
        lines.push(field("Assembly Line:", text(extra.assembly_line.as_deref())));
        lines.push(field("Job Number:", text(extra.job_num.as_deref())));
        lines.push(field("Materials:", text(extra.material_status.as_deref())));
        lines.push(field(
            "Clear to Build:",
            if extra.clear_to_build { "Yes" } else { "No" }.to_owned(),
        ));
        lines.push(field("Remaining Time:", text(extra.remaining_time.as_deref())));
        lines.push(field(
            "Unit Price:",
            format!("${}", extra.unit_price.map(|p| p.to_string()).unwrap_or_default()),
        ));
    }

    lines.push(Line::from(""));
    ListItem::new(Text::from(lines))
}
