//! Application core. Event loop, root view state, action dispatch.

use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc;
use tracing::{debug, info};

use kinetic_core::{DeviceService, Root, Screen};

use crate::action::Action;
use crate::event::{Event, Events};
use crate::screens::{device_detail, device_list};
use crate::theme;
use crate::tui::Tui;

pub const APP_TITLE: &str = "Kinetic Device Manager";

/// Top-level application state and event loop.
pub struct App<S: DeviceService> {
    service: Arc<S>,
    /// Selected device and the mounted view.
    root: Root,
    /// Whether the app should keep running.
    running: bool,
    help_visible: bool,
    /// Spinner frame shared by both loading states.
    throbber: ThrobberState,
    /// Metric groups scrolled past in the detail view.
    detail_scroll: usize,
    /// Endpoint shown in the status bar.
    endpoint: String,
    /// Action sender. Fetch tasks deliver their results through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver. The main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl<S: DeviceService> App<S> {
    pub fn new(service: Arc<S>, endpoint: String, metrics_fetch_enabled: bool) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            service,
            root: Root::new(metrics_fetch_enabled),
            running: true,
            help_visible: false,
            throbber: ThrobberState::default(),
            detail_scroll: 0,
            endpoint,
            action_tx,
            action_rx,
        }
    }

    /// Start the fetch for whichever view is mounted. Views fetch once per
    /// mount, so repeated calls are no-ops.
    fn start_mounted_view(&mut self) {
        if let Some(list) = self.root.list_mut() {
            let tx = self.action_tx.clone();
            list.start(&self.service, move |mount, result| {
                let _ = tx.send(Action::DevicesLoaded { mount, result });
            });
        } else if let Some(detail) = self.root.detail_mut() {
            let tx = self.action_tx.clone();
            detail.start(&self.service, move |mount, result| {
                let _ = tx.send(Action::MetricsLoaded { mount, result });
            });
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.start_mounted_view();
        let mut events = Events::new();

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key) {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Spin => self.action_tx.send(Action::Tick)?,
                Event::Redraw => self.action_tx.send(Action::Render)?,
            }

            // Drain everything queued, including fetch results
            while let Ok(action) = self.action_rx.try_recv() {
                let render = matches!(action, Action::Render);
                self.process_action(action);

                if render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        info!("TUI event loop ended");
        tui.leave()
    }

    /// Map a key event to an action. Global keys first, then the mounted
    /// screen's bindings.
    fn handle_key_event(&self, key: KeyEvent) -> Option<Action> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                return Some(Action::ToggleHelp);
            }
            _ => {}
        }

        match self.root.screen() {
            Screen::List(list) => device_list::handle_key_event(list, key),
            Screen::Detail(_) => device_detail::handle_key_event(key),
        }
    }

    /// Process a single action.
    fn process_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,

            Action::Tick => self.throbber.calc_next(),

            Action::Render => {}

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::SelectDevice(device) => {
                debug!(device_id = %device.id, "device selected");
                self.root.select(device, Utc::now());
                self.detail_scroll = 0;
                self.start_mounted_view();
            }

            Action::Back => {
                debug!("back to device list");
                self.root.back();
                self.start_mounted_view();
            }

            Action::DevicesLoaded { mount, result } => {
                self.root.apply_devices(mount, result);
            }

            Action::MetricsLoaded { mount, result } => {
                self.root.apply_metrics(mount, result);
            }

            Action::ScrollUp => {
                if let Some(list) = self.root.list_mut() {
                    list.select_prev();
                } else {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1);
                }
            }

            Action::ScrollDown => {
                if let Some(list) = self.root.list_mut() {
                    list.select_next();
                } else {
                    let last = self.group_count().saturating_sub(1);
                    self.detail_scroll = (self.detail_scroll + 1).min(last);
                }
            }

            Action::ScrollToTop => {
                if let Some(list) = self.root.list_mut() {
                    list.select_first();
                } else {
                    self.detail_scroll = 0;
                }
            }

            Action::ScrollToBottom => {
                if let Some(list) = self.root.list_mut() {
                    list.select_last();
                } else {
                    self.detail_scroll = self.group_count().saturating_sub(1);
                }
            }
        }
    }

    fn group_count(&self) -> usize {
        match self.root.screen() {
            Screen::Detail(detail) => detail.state().ready().map_or(0, Vec::len),
            Screen::List(_) => 0,
        }
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Min(1),    // screen content
            Constraint::Length(1), // status bar
        ])
        .split(area);

        let title = Line::from(Span::styled(format!(" {APP_TITLE}"), theme::heading()));
        frame.render_widget(Paragraph::new(title), layout[0]);

        match self.root.screen() {
            Screen::List(list) => device_list::render(frame, layout[1], list, &self.throbber),
            Screen::Detail(detail) => device_detail::render(
                frame,
                layout[1],
                detail,
                &self.throbber,
                self.detail_scroll,
            ),
        }

        self.render_status_bar(frame, layout[2]);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    /// Endpoint on the left, key hints on the right.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(self.endpoint.as_str(), theme::endpoint()),
        ];
        if !self.root.metrics_fetch_enabled() {
            spans.push(Span::styled("  metrics off", theme::notice()));
        }
        spans.push(Span::styled(" │ ? help  q quit", theme::hint()));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 46u16.min(area.width.saturating_sub(4));
        let help_height = 13u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        frame.render_widget(Block::default().style(theme::overlay()), help_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::heading())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::panel_border());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let key = |k: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {k:<10}"), theme::hint_key()),
                Span::styled(what, theme::hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            key("j/k ↑/↓", "Move up/down"),
            key("g/G", "Top / bottom"),
            key("Enter", "Open device metrics"),
            key("Esc", "Back to devices"),
            key("?", "This help"),
            key("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled("        Esc or ? to close", theme::hint())),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
