//! Screen renderers and key maps.
//!
//! Screens hold no data of their own: state lives in the `kinetic-core`
//! views, and each screen renders one of them and maps keys to actions.

pub mod device_detail;
pub mod device_list;

#[cfg(test)]
pub(crate) mod test_helpers {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    pub fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    /// The whole buffer as text, one line per row.
    pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn assert_buffer_contains(terminal: &Terminal<TestBackend>, needle: &str) {
        let text = buffer_text(terminal);
        assert!(text.contains(needle), "expected {needle:?} in:\n{text}");
    }

    pub fn assert_buffer_lacks(terminal: &Terminal<TestBackend>, needle: &str) {
        let text = buffer_text(terminal);
        assert!(!text.contains(needle), "unexpected {needle:?} in:\n{text}");
    }
}
