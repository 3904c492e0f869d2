//! Colors and named styles for the device cards, metric tables and chrome.
//!
//! Palette is SilkCircuit Neon. Screens ask for a role (`card_label`,
//! `table_cell`, `spinner`) and never pick colors themselves, except the
//! connection-state indicator which maps states onto the palette directly.

use ratatui::style::{Color, Modifier, Style};

pub const PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const MUTED: Color = Color::Rgb(98, 114, 164); // #6272a4

const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
const YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
const RED: Color = Color::Rgb(255, 99, 99); // #ff6363
const TEXT: Color = Color::Rgb(189, 193, 207); // #bdc1cf
const HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
const OVERLAY: Color = Color::Rgb(30, 31, 41); // #1e1f29

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

// ── Chrome ───────────────────────────────────────────────────────────

/// App title, panel titles, section headings.
pub fn heading() -> Style {
    fg(CYAN).add_modifier(Modifier::BOLD)
}

/// Outer border of the mounted screen and the help overlay.
pub fn panel_border() -> Style {
    fg(PURPLE)
}

pub fn overlay() -> Style {
    Style::default().bg(OVERLAY)
}

pub fn endpoint() -> Style {
    fg(TEXT)
}

/// "metrics off" marker in the status bar.
pub fn notice() -> Style {
    fg(YELLOW)
}

pub fn hint() -> Style {
    fg(MUTED)
}

pub fn hint_key() -> Style {
    fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn spinner_label() -> Style {
    fg(CYAN)
}

pub fn spinner() -> Style {
    fg(PURPLE)
}

pub fn error() -> Style {
    fg(RED).add_modifier(Modifier::BOLD)
}

// ── Device cards ─────────────────────────────────────────────────────

pub fn card_label() -> Style {
    fg(MUTED)
}

pub fn card_value() -> Style {
    fg(TEXT)
}

pub fn card_selected() -> Style {
    fg(PURPLE).bg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

// ── Metric tables ────────────────────────────────────────────────────

pub fn table_border() -> Style {
    fg(MUTED)
}

pub fn table_header() -> Style {
    heading().add_modifier(Modifier::UNDERLINED)
}

pub fn table_cell() -> Style {
    fg(TEXT)
}

pub fn metric_value() -> Style {
    fg(CORAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_header_is_an_underlined_heading() {
        let header = table_header();
        assert_eq!(header.fg, heading().fg);
        assert!(header.add_modifier.contains(Modifier::BOLD | Modifier::UNDERLINED));
    }

    #[test]
    fn selected_card_stands_out() {
        assert!(card_selected().bg.is_some());
        assert_ne!(card_selected().fg, card_value().fg);
    }
}
