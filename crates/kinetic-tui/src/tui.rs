//! Terminal session. Raw mode and the alternate screen live exactly as long
//! as a [`Tui`] does; panics restore the terminal before the report prints.

use std::io::{self, Stdout, stdout};

use color_eyre::eyre::Result;
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tracing::warn;

/// An entered terminal. Restores itself on [`Tui::leave`] or on drop.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl Tui {
    /// Switch to raw mode on the alternate screen with the cursor hidden.
    pub fn enter() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        terminal::enable_raw_mode()?;
        // Dropped on any later failure, which undoes raw mode.
        let mut tui = Self {
            terminal,
            active: true,
        };
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        tui.terminal.clear()?;
        Ok(tui)
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Restore the terminal, reporting failures instead of swallowing them.
    pub fn leave(mut self) -> Result<()> {
        self.active = false;
        Ok(restore()?)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        if let Err(e) = restore() {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

fn restore() -> io::Result<()> {
    execute!(stdout(), cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

/// Install color-eyre with a panic hook that restores the terminal first.
///
/// Call before [`Tui::enter`] so panics during setup print cleanly too.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Outside raw mode this is a harmless no-op.
        let _ = restore();
        panic_hook(info);
    }));
    Ok(())
}
