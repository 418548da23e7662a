//! Key → action resolution
//!
//! Built-in bindings are installed first, then config overrides replace them
//! key by key. Entries that fail to parse are logged and skipped.

use super::actions::Action;
use crate::config::Keybinding;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Resolves key events to actions.
#[derive(Debug, Clone)]
pub struct KeybindingResolver {
    bindings: HashMap<(KeyCode, KeyModifiers), Action>,
}

impl Default for KeybindingResolver {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl KeybindingResolver {
    /// Create a resolver with the default bindings plus `overrides`.
    pub fn new(overrides: &[Keybinding]) -> Self {
        let mut resolver = Self {
            bindings: HashMap::new(),
        };
        resolver.load_defaults();

        for binding in overrides {
            let Some(key) = parse_key(&binding.key) else {
                tracing::warn!("Ignoring keybinding with unknown key {:?}", binding.key);
                continue;
            };
            let Some(modifiers) = parse_modifiers(&binding.modifiers) else {
                tracing::warn!(
                    "Ignoring keybinding with unknown modifiers {:?}",
                    binding.modifiers
                );
                continue;
            };
            let Some(action) = Action::from_name(&binding.action) else {
                tracing::warn!("Ignoring keybinding with unknown action {:?}", binding.action);
                continue;
            };
            resolver.bind(key, modifiers, action);
        }

        resolver
    }

    fn load_defaults(&mut self) {
        use KeyCode::*;
        let none = KeyModifiers::NONE;

        self.bind(Char('q'), none, Action::Quit);
        self.bind(Char('c'), KeyModifiers::CONTROL, Action::Quit);

        self.bind(Tab, none, Action::FocusNext);
        self.bind(BackTab, none, Action::FocusPrev);

        self.bind(Char('p'), none, Action::TogglePin);
        self.bind(Char('m'), none, Action::ToggleMinimize);
        self.bind(Char('e'), none, Action::ToggleExpand);

        for n in 1..=9u8 {
            self.bind(
                Char((b'0' + n) as char),
                none,
                Action::RestorePinned(n as usize - 1),
            );
        }

        self.bind(Up, none, Action::ScrollUp);
        self.bind(Char('k'), none, Action::ScrollUp);
        self.bind(Down, none, Action::ScrollDown);
        self.bind(Char('j'), none, Action::ScrollDown);
        self.bind(PageUp, none, Action::PageUp);
        self.bind(PageDown, none, Action::PageDown);
        self.bind(Char(' '), none, Action::PageDown);
        self.bind(Home, none, Action::ScrollTop);
        self.bind(Char('g'), none, Action::ScrollTop);
        self.bind(End, none, Action::ScrollBottom);
        self.bind(Char('G'), none, Action::ScrollBottom);

        self.bind(Char(']'), none, Action::NextLink);
        self.bind(Char('['), none, Action::PrevLink);
        self.bind(Enter, none, Action::OpenLink);
        self.bind(Char('d'), none, Action::DownloadResume);
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        self.bindings.insert(normalize(code, modifiers), action);
    }

    /// Resolve a key event to an action.
    pub fn resolve(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings
            .get(&normalize(event.code, event.modifiers))
            .copied()
    }
}

/// Shift is implied by the character itself (and by BackTab), so it is
/// dropped to make `G` and `Shift+g` the same binding.
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    match code {
        KeyCode::Char(_) | KeyCode::BackTab => (code, modifiers - KeyModifiers::SHIFT),
        _ => (code, modifiers),
    }
}

/// Parse a key name ("a", "Enter", "F5", "Esc", ...).
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    Some(match name.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        other => {
            let n: u8 = other.strip_prefix('f')?.parse().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
    })
}

/// Parse modifier names ("ctrl", "alt", "shift").
pub fn parse_modifiers(names: &[String]) -> Option<KeyModifiers> {
    names.iter().try_fold(KeyModifiers::NONE, |acc, name| {
        let modifier = match name.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "meta" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return None,
        };
        Some(acc | modifier)
    })
}
