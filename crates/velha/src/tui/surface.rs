//! Crossterm-backed implementation of the presentation contract.

use std::io::{self, Stdout};

use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use velha::{Position, Presenter, SessionView};

use super::input::{self, Action, SetupForm};
use super::ui;

/// The terminal plus the widget state a page would keep in its DOM: the
/// board cursor and the name inputs.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    cursor: Position,
    form: SetupForm,
}

impl TerminalSurface {
    /// Switches the terminal to raw mode on the alternate screen.
    pub fn enter() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let terminal = open_terminal().inspect_err(|_| {
            let _ = disable_raw_mode();
        })?;
        Ok(Self {
            terminal,
            cursor: Position::Center,
            form: SetupForm::default(),
        })
    }

    /// Restores the terminal.
    pub fn leave(&mut self) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Applies a key to the surface state, returning what the session
    /// should do.
    pub fn handle_key(&mut self, key: KeyEvent, view: &SessionView) -> Action {
        input::translate(key, view, &mut self.cursor, &mut self.form)
    }
}

/// Raw mode must already be on; the caller turns it back off on failure.
fn open_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

impl Presenter for TerminalSurface {
    type Error = anyhow::Error;

    fn present(&mut self, view: &SessionView) -> Result<(), Self::Error> {
        let (cursor, form) = (self.cursor, &self.form);
        self.terminal.draw(|f| ui::render(f, view, cursor, form))?;
        Ok(())
    }
}
