//! Device detail screen. Device header plus the trailing 24h metrics, one
//! table per metric type.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use throbber_widgets_tui::{Throbber, ThrobberState};

use kinetic_core::{DetailView, MetricGroup, MetricsDisplay};

use crate::action::Action;
use crate::theme;
use crate::widgets::{status_indicator, time_fmt};

pub const BACK_LABEL: &str = "← Back to Devices";
pub const METRICS_HEADING: &str = "Device Metrics (Last 24 Hours)";
pub const LOADING_LABEL: &str = "Loading metrics...";

/// Map a key to an action while a detail view is mounted.
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h' | 'b') => {
            Some(Action::Back)
        }
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollToTop),
        KeyCode::Char('G') | KeyCode::End => Some(Action::ScrollToBottom),
        _ => None,
    }
}

/// Render the detail screen. `scroll` is the number of metric groups
/// skipped from the top.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    view: &DetailView,
    throbber: &ThrobberState,
    scroll: usize,
) {
    let device = view.device();
    let title = format!(" {} ", device.name.as_deref().unwrap_or(&device.id));
    let block = Block::default()
        .title(title)
        .title_style(theme::heading())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::panel_border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let info_height = if device.last_seen.is_some() { 3 } else { 2 };
    let layout = Layout::vertical([
        Constraint::Length(2),           // back control + blank
        Constraint::Length(1),           // status
        Constraint::Length(info_height), // id / state / last seen
        Constraint::Length(2),           // blank + metrics heading
        Constraint::Min(1),              // metrics
    ])
    .split(inner);

    let back = Line::from(vec![
        Span::styled(format!(" {BACK_LABEL} "), theme::hint_key()),
        Span::styled("(Esc)", theme::hint()),
    ]);
    frame.render_widget(Paragraph::new(back), layout[0]);

    let class = device.connection_class();
    let status = Line::from(vec![
        Span::raw(" "),
        status_indicator::status_span(&class),
        Span::styled(format!(" {}", device.status), theme::card_value()),
    ]);
    frame.render_widget(Paragraph::new(status), layout[1]);

    let mut info = vec![
        info_line("ID:", device.id.clone()),
        info_line("Connection State:", device.connection_state.clone()),
    ];
    if let Some(last_seen) = device.last_seen.as_deref() {
        info.push(info_line("Last Seen:", time_fmt::fmt_local(last_seen)));
    }
    frame.render_widget(Paragraph::new(info), layout[2]);

    let heading = vec![
        Line::from(""),
        Line::from(Span::styled(format!(" {METRICS_HEADING}"), theme::heading())),
    ];
    frame.render_widget(Paragraph::new(heading), layout[3]);

    render_metrics(frame, layout[4], view, throbber, scroll);
}

fn info_line(label: &str, value: String) -> Line<'_> {
    Line::from(vec![
        Span::styled(format!(" {label} "), theme::card_label()),
        Span::styled(value, theme::card_value()),
    ])
}

fn render_metrics(
    frame: &mut Frame,
    area: Rect,
    view: &DetailView,
    throbber: &ThrobberState,
    scroll: usize,
) {
    match view.display() {
        MetricsDisplay::Loading => {
            let spinner = Throbber::default()
                .label(LOADING_LABEL)
                .style(theme::spinner_label())
                .throbber_style(theme::spinner());
            frame.render_stateful_widget(spinner, area, &mut throbber.clone());
        }
        MetricsDisplay::Error(message) => {
            frame.render_widget(
                Paragraph::new(format!(" Error: {message}")).style(theme::error()),
                area,
            );
        }
        MetricsDisplay::Empty(message) => {
            frame.render_widget(
                Paragraph::new(format!(" {message}")).style(theme::table_cell()),
                area,
            );
        }
        MetricsDisplay::Groups(groups) => {
            let visible = groups.get(scroll..).unwrap_or_default();
            let mut constraints: Vec<Constraint> = visible
                .iter()
                .map(|g| Constraint::Length(table_height(g)))
                .collect();
            constraints.push(Constraint::Min(0));
            let slots = Layout::vertical(constraints).split(area);

            for (group, slot) in visible.iter().zip(slots.iter()) {
                render_group(frame, *slot, group);
            }
        }
    }
}

/// Borders plus header plus one row per metric.
fn table_height(group: &MetricGroup) -> u16 {
    u16::try_from(group.metrics.len())
        .unwrap_or(u16::MAX)
        .saturating_add(3)
}

fn render_group(frame: &mut Frame, area: Rect, group: &MetricGroup) {
    let header = Row::new(vec![
        Cell::from("Timestamp").style(theme::table_header()),
        Cell::from("Value").style(theme::table_header()),
        Cell::from("Unit").style(theme::table_header()),
    ]);

    let rows: Vec<Row> = group
        .metrics
        .iter()
        .map(|metric| {
            Row::new(vec![
                Cell::from(time_fmt::fmt_local(&metric.timestamp)),
                Cell::from(metric.value.to_string()).style(theme::metric_value()),
                Cell::from(metric.unit.clone()),
            ])
            .style(theme::table_cell())
        })
        .collect();

    let widths = [
        Constraint::Length(21),
        Constraint::Length(14),
        Constraint::Min(6),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!(" {} ", group.metric_type))
            .title_style(theme::heading())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::table_border()),
    );
    frame.render_widget(table, area);
}
