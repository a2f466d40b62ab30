//! Keyboard handling: cursor movement, the name form and key translation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use velha::{Gesture, Phase, Position, SessionView};

/// What the event loop should do with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing for the session; surface state may have changed.
    None,
    /// Leave the program.
    Quit,
    /// Forward to the session.
    Gesture(Gesture),
}

/// Which name field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    /// Name for mark `O`.
    #[default]
    NameA,
    /// Name for mark `X`.
    NameB,
}

/// The two player-name inputs of the setup panel.
///
/// Values survive between games, like a form that is hidden and shown
/// again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupForm {
    name_a: String,
    name_b: String,
    focus: Field,
}

impl SetupForm {
    /// Name typed for mark `O`.
    pub fn name_a(&self) -> &str {
        &self.name_a
    }

    /// Name typed for mark `X`.
    pub fn name_b(&self) -> &str {
        &self.name_b
    }

    /// Focused field.
    pub fn focus(&self) -> Field {
        self.focus
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::NameA => &mut self.name_a,
            Field::NameB => &mut self.name_b,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::NameA => Field::NameB,
            Field::NameB => Field::NameA,
        };
    }

    fn submit(&self) -> Gesture {
        Gesture::Start {
            name_a: self.name_a.clone(),
            name_b: self.name_b.clone(),
        }
    }
}

/// Moves cursor based on arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => row.checked_sub(1).map(|r| (r, col)),
        KeyCode::Down => Some((row + 1, col)),
        KeyCode::Left => col.checked_sub(1).map(|c| (row, c)),
        KeyCode::Right => Some((row, col + 1)),
        _ => None,
    };
    target
        .and_then(|(r, c)| Position::from_row_col(r, c))
        .unwrap_or(cursor)
}

/// Translates a key press given what is on screen.
pub fn translate(
    key: KeyEvent,
    view: &SessionView,
    cursor: &mut Position,
    form: &mut SetupForm,
) -> Action {
    if key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return Action::Quit;
    }

    match view.phase {
        Phase::NotStarted => match key.code {
            KeyCode::Enter => Action::Gesture(form.submit()),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                form.toggle_focus();
                Action::None
            }
            KeyCode::Backspace => {
                form.focused_mut().pop();
                Action::None
            }
            KeyCode::Char(c) => {
                form.focused_mut().push(c);
                Action::None
            }
            _ => Action::None,
        },
        Phase::InProgress => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Enter | KeyCode::Char(' ') => Action::Gesture(Gesture::Cell(cursor.to_index())),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(pos) = Position::from_index(index) {
                    *cursor = pos;
                }
                Action::Gesture(Gesture::Cell(index))
            }
            code => {
                *cursor = move_cursor(*cursor, code);
                Action::None
            }
        },
        Phase::Finished => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('r') | KeyCode::Enter => Action::Gesture(Gesture::Restart),
            _ => Action::None,
        },
    }
}
