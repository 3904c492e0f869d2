//! Terminal input and timers, multiplexed in the caller's task.
//!
//! The app only needs three things: key presses, a reason to redraw, and
//! a slower beat to advance the loading spinner.

use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::warn;

const SPIN_EVERY: Duration = Duration::from_millis(250);
const REDRAW_EVERY: Duration = Duration::from_millis(33);

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Frame timer fired or the terminal was resized.
    Redraw,
    /// Advance the spinner.
    Spin,
}

pub struct Events {
    input: EventStream,
    spin: Interval,
    redraw: Interval,
}

impl Events {
    pub fn new() -> Self {
        let mut spin = interval(SPIN_EVERY);
        let mut redraw = interval(REDRAW_EVERY);
        spin.set_missed_tick_behavior(MissedTickBehavior::Skip);
        redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            input: EventStream::new(),
            spin,
            redraw,
        }
    }

    /// Next event, or `None` once terminal input has closed or failed.
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            tokio::select! {
                biased;

                input = self.input.next() => match input? {
                    Ok(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        return Some(Event::Key(key));
                    }
                    Ok(TermEvent::Resize(..)) => return Some(Event::Redraw),
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "terminal input failed");
                        return None;
                    }
                },
                _ = self.spin.tick() => return Some(Event::Spin),
                _ = self.redraw.tick() => return Some(Event::Redraw),
            }
        }
    }
}
