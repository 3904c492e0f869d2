//! Connection state indicator. ●/◉/○ with color mapping.

use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::theme;

/// Symbol and color for a lower-cased connection state.
fn symbol_and_color(connection_class: &str) -> (&'static str, Color) {
    match connection_class {
        "open" => ("●", theme::GREEN),
        "released" => ("◉", theme::PURPLE),
        _ => ("○", theme::MUTED),
    }
}

/// Returns a styled `Span` with the appropriate status dot and color.
pub fn status_span(connection_class: &str) -> Span<'static> {
    let (symbol, color) = symbol_and_color(connection_class);
    Span::styled(symbol, Style::default().fg(color))
}

/// Color alone, for styling text next to the dot.
pub fn status_color(connection_class: &str) -> Color {
    symbol_and_color(connection_class).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_states_have_distinct_symbols() {
        assert_eq!(status_span("open").content, "●");
        assert_eq!(status_span("released").content, "◉");
        assert_eq!(status_span("on hold").content, "○");
        assert_eq!(status_color("open"), theme::GREEN);
    }
}
