use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// Commands the sidebar reacts to outside of select mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Quit,

    // Channel switching
    NextChannel,
    PreviousChannel,
    NextUnreadChannel,
    RecentChannel,

    // Viewport
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // Select mode
    EnterSelectMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
    pub key_display: Option<Cow<'static, str>>,
    pub visible_in_bar: bool,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            key_display: None,
            visible_in_bar: true,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }

    #[must_use]
    pub fn display(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.key_display = Some(text.into());
        self
    }
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

/// Built-in bindings, in footer display order.
#[must_use]
pub fn default_keybinds() -> Vec<Keybind> {
    vec![
        Keybind::new(
            key(KeyCode::Char('j'), KeyModifiers::NONE),
            Action::NextChannel,
            "Next",
        ),
        Keybind::new(
            key(KeyCode::Char('k'), KeyModifiers::NONE),
            Action::PreviousChannel,
            "Prev",
        ),
        Keybind::new(
            key(KeyCode::Down, KeyModifiers::NONE),
            Action::NextChannel,
            "Next",
        )
        .hidden(),
        Keybind::new(
            key(KeyCode::Up, KeyModifiers::NONE),
            Action::PreviousChannel,
            "Prev",
        )
        .hidden(),
        Keybind::new(
            key(KeyCode::Char('a'), KeyModifiers::ALT),
            Action::NextUnreadChannel,
            "Unread",
        ),
        Keybind::new(
            key(KeyCode::Char('s'), KeyModifiers::ALT),
            Action::RecentChannel,
            "Recent",
        ),
        Keybind::new(
            key(KeyCode::Char('/'), KeyModifiers::NONE),
            Action::EnterSelectMode,
            "Find",
        ),
        Keybind::new(
            key(KeyCode::Char('g'), KeyModifiers::CONTROL),
            Action::EnterSelectMode,
            "Find",
        )
        .hidden(),
        Keybind::new(
            key(KeyCode::Char('e'), KeyModifiers::CONTROL),
            Action::ScrollDown,
            "Scroll",
        )
        .hidden(),
        Keybind::new(
            key(KeyCode::Char('y'), KeyModifiers::CONTROL),
            Action::ScrollUp,
            "Scroll",
        )
        .hidden(),
        Keybind::new(
            key(KeyCode::PageDown, KeyModifiers::NONE),
            Action::PageDown,
            "Page",
        )
        .display("PgUp/PgDn"),
        Keybind::new(
            key(KeyCode::PageUp, KeyModifiers::NONE),
            Action::PageUp,
            "Page",
        )
        .hidden(),
        Keybind::new(
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            Action::Quit,
            "Quit",
        ),
        Keybind::new(
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Action::Quit,
            "Quit",
        )
        .hidden(),
    ]
}

/// Parses strings like `"Ctrl+n"`, `"Alt+Enter"` or `"PageDown"`.
#[must_use]
pub fn parse_key(spec: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::NONE;
    let parts: Vec<&str> = spec.split('+').map(str::trim).collect();
    let (code_part, modifier_parts) = parts.split_last()?;

    for part in modifier_parts {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" | "c" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" | "a" => modifiers |= KeyModifiers::ALT,
            "shift" | "s" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match code_part.to_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = code_part.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };

    Some(KeyEvent::new(code, modifiers))
}

/// Resolves key presses to actions, with user overrides layered on defaults.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<Keybind>,
}

impl Keymap {
    /// Builds a keymap from the defaults plus `overrides` (key string to action).
    /// Unparseable key strings are skipped with a warning.
    #[must_use]
    pub fn new(overrides: &HashMap<String, Action>) -> Self {
        let mut bindings = default_keybinds();

        for (spec, action) in overrides {
            let Some(key) = parse_key(spec) else {
                tracing::warn!(key = %spec, "Ignoring unparseable keybinding");
                continue;
            };
            bindings.retain(|binding| !same_key(&binding.key, &key));
            bindings.push(Keybind::new(key, *action, format!("{action:?}")).hidden());
        }

        Self { bindings }
    }

    #[must_use]
    pub fn action_for(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .find(|binding| same_key(&binding.key, event))
            .map(|binding| binding.action)
    }

    #[must_use]
    pub fn bindings(&self) -> &[Keybind] {
        &self.bindings
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new(&HashMap::new())
    }
}

fn same_key(a: &KeyEvent, b: &KeyEvent) -> bool {
    let strip = |m: KeyModifiers, code: KeyCode| {
        if matches!(code, KeyCode::Char(_)) {
            m - KeyModifiers::SHIFT
        } else {
            m
        }
    };
    a.code == b.code && strip(a.modifiers, a.code) == strip(b.modifiers, b.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Ctrl+n", KeyCode::Char('n'), KeyModifiers::CONTROL ; "ctrl_char")]
    #[test_case("Alt+Enter", KeyCode::Enter, KeyModifiers::ALT ; "alt_enter")]
    #[test_case("PageDown", KeyCode::PageDown, KeyModifiers::NONE ; "named_key")]
    #[test_case("j", KeyCode::Char('j'), KeyModifiers::NONE ; "plain_char")]
    fn test_parse_key(spec: &str, code: KeyCode, modifiers: KeyModifiers) {
        assert_eq!(parse_key(spec), Some(KeyEvent::new(code, modifiers)));
    }

    #[test]
    fn test_parse_key_rejects_garbage() {
        assert_eq!(parse_key("Hyper+x"), None);
        assert_eq!(parse_key("abc"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn test_default_keymap_resolves_actions() {
        let keymap = Keymap::default();
        let j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        let slash = KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE);
        assert_eq!(keymap.action_for(&j), Some(Action::NextChannel));
        assert_eq!(keymap.action_for(&slash), Some(Action::EnterSelectMode));
    }

    #[test]
    fn test_override_replaces_default_binding() {
        let mut overrides = HashMap::new();
        overrides.insert("j".to_string(), Action::NextUnreadChannel);
        let keymap = Keymap::new(&overrides);

        let j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(keymap.action_for(&j), Some(Action::NextUnreadChannel));
    }

    #[test]
    fn test_shift_is_ignored_for_characters() {
        let keymap = Keymap::default();
        let shifted_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::SHIFT);
        assert_eq!(keymap.action_for(&shifted_q), Some(Action::Quit));
    }
}
