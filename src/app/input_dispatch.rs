//! Key and mouse event dispatch

use super::{App, WHEEL_STEP};
use crate::view::card::Control;
use crate::view::overlay::OverlayHit;
use crate::view::page::Hit;
use crate::card::CardId;
use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

impl App {
    /// Handle one terminal event. Returns true if a redraw is needed.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                tracing::debug!("resized to {}x{}", width, height);
                true
            }
            _ => false,
        }
    }

    /// Global listeners first, then the keymap.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        if event.kind != KeyEventKind::Press {
            return false;
        }
        // A transient message lasts until the next key press
        self.status = None;

        let action = self
            .listeners
            .dispatch(&event)
            .or_else(|| self.keybindings.resolve(&event));
        match action {
            Some(action) => self.handle_action(action),
            None => tracing::trace!("unbound key {:?}", event.code),
        }
        true
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        match event.kind {
            MouseEventKind::ScrollUp => {
                self.scroll_by(-WHEEL_STEP);
                true
            }
            MouseEventKind::ScrollDown => {
                self.scroll_by(WHEEL_STEP);
                true
            }
            MouseEventKind::Down(MouseButton::Left) => self.click(event.column, event.row),
            _ => false,
        }
    }

    fn click(&mut self, col: u16, row: u16) -> bool {
        self.status = None;

        if let Some(card) = self.state.expanded() {
            match self.overlay_layout.hit_test(col, row) {
                Some(OverlayHit::Control(control)) => self.press_control(card, control),
                Some(OverlayHit::Link(index)) => self.click_link(card, index),
                None => return false,
            }
            return true;
        }

        if let Some(card) = self.header_layout.hit_test(col, row) {
            self.restore(card);
            return true;
        }

        match self
            .page_layout
            .hit_test(col, row, self.navigator.scroll())
        {
            Some(Hit::Control(card, control)) => {
                self.focus = Some(card);
                self.press_control(card, control);
            }
            Some(Hit::Link(card, index)) => {
                self.focus = Some(card);
                self.click_link(card, index);
            }
            Some(Hit::Card(card)) => {
                if self.focus != Some(card) {
                    self.selected_link = None;
                }
                self.focus = Some(card);
            }
            None => return false,
        }
        true
    }

    fn press_control(&mut self, card: CardId, control: Control) {
        match control {
            Control::Pin => self.toggle_pin(card),
            Control::Minimize => self.toggle_minimize(card),
            Control::Expand => self.toggle_expand(card),
        }
    }

    fn click_link(&mut self, card: CardId, index: usize) {
        self.selected_link = Some(index);
        let target = if self.state.is_expanded(card) {
            self.overlay_layout.links.get(index).cloned()
        } else {
            self.page_layout
                .slot(card)
                .and_then(|slot| slot.links.get(index).cloned())
        };
        if let Some(target) = target {
            self.activate_link(&target);
        }
    }
}
