//! Key handling for select mode.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
}

/// Edits and moves available while select mode is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKey {
    Insert(char),
    Backspace,
    DeleteWord,
    Next,
    Previous,
    Confirm,
    Cancel,
}

impl SelectKey {
    /// Classifies a key press. Returns `None` for keys select mode ignores,
    /// including key releases reported by some terminals.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        Some(match key.code {
            KeyCode::Esc => Self::Cancel,
            KeyCode::Char('g' | 'c') if ctrl => Self::Cancel,
            KeyCode::Enter => Self::Confirm,
            KeyCode::Down | KeyCode::Tab => Self::Next,
            KeyCode::Up | KeyCode::BackTab => Self::Previous,
            KeyCode::Char('n') if ctrl => Self::Next,
            KeyCode::Char('p') if ctrl => Self::Previous,
            KeyCode::Char('h' | 'w') if ctrl => Self::DeleteWord,
            KeyCode::Backspace if ctrl || alt => Self::DeleteWord,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Char(_) if ctrl || alt => return None,
            KeyCode::Char(c) => Self::Insert(c),
            _ => return None,
        })
    }
}
