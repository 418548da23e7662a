//! Global key listeners with scoped subscriptions
//!
//! A listener fires for its key regardless of focus or overlay state, and is
//! consulted before the regular keybindings. `subscribe` hands back a
//! [`Subscription`] guard; dropping the guard removes the listener, so a view
//! that is deactivated (or re-activated) can never leave a stale one behind.

use super::actions::Action;
use crossterm::event::{KeyCode, KeyEvent};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Debug, Clone)]
struct ListenerEntry {
    id: u64,
    code: KeyCode,
    action: Action,
}

type Entries = RefCell<Vec<ListenerEntry>>;

/// Registry of global key listeners.
///
/// Clones are handles to the same registry.
#[derive(Debug, Default, Clone)]
pub struct KeyListeners {
    entries: Rc<Entries>,
    next_id: Rc<Cell<u64>>,
}

/// Keeps a listener registered for as long as it is alive.
#[derive(Debug)]
#[must_use = "dropping a Subscription immediately removes the listener"]
pub struct Subscription {
    id: u64,
    entries: Weak<Entries>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(entries) = self.entries.upgrade() {
            entries.borrow_mut().retain(|entry| entry.id != self.id);
        }
    }
}

impl KeyListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` for every press of `code`.
    pub fn subscribe(&self, code: KeyCode, action: Action) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries
            .borrow_mut()
            .push(ListenerEntry { id, code, action });
        Subscription {
            id,
            entries: Rc::downgrade(&self.entries),
        }
    }

    /// The action of the first listener registered for this key, if any.
    pub fn dispatch(&self, event: &KeyEvent) -> Option<Action> {
        self.entries
            .borrow()
            .iter()
            .find(|entry| entry.code == event.code)
            .map(|entry| entry.action)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_subscription_dispatches_until_dropped() {
        let listeners = KeyListeners::new();
        let subscription = listeners.subscribe(KeyCode::Esc, Action::Cancel);

        assert_eq!(listeners.dispatch(&key(KeyCode::Esc)), Some(Action::Cancel));
        assert_eq!(listeners.dispatch(&key(KeyCode::Enter)), None);

        drop(subscription);
        assert!(listeners.is_empty());
        assert_eq!(listeners.dispatch(&key(KeyCode::Esc)), None);
    }

    #[test]
    fn test_replacing_subscription_does_not_leak() {
        let listeners = KeyListeners::new();
        let mut active = Some(listeners.subscribe(KeyCode::Esc, Action::Cancel));
        for _ in 0..3 {
            // Re-activation: the old guard is dropped when replaced
            active = Some(listeners.subscribe(KeyCode::Esc, Action::Cancel));
        }
        assert_eq!(listeners.len(), 1);

        active.take();
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let listeners = KeyListeners::new();
        let handle = listeners.clone();
        let first = listeners.subscribe(KeyCode::Esc, Action::Cancel);
        let second = handle.subscribe(KeyCode::Char('x'), Action::Quit);
        assert_eq!(handle.len(), 2);

        drop(first);
        assert_eq!(listeners.len(), 1);
        drop(second);
        assert!(handle.is_empty());
    }

    #[test]
    fn test_subscription_outliving_registry_is_harmless() {
        let listeners = KeyListeners::new();
        let subscription = listeners.subscribe(KeyCode::Esc, Action::Cancel);
        drop(listeners);
        drop(subscription);
    }
}
