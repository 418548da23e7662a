//! Interaction state for the portfolio view
//!
//! All card visibility and sizing lives in a single serializable record owned
//! by the root view:
//! - a per-card status (`Normal`, `Minimized`, `Pinned`)
//! - a single nullable expanded-card reference
//!
//! Rendering never combines booleans ad hoc. It asks for a [`CardView`], which
//! is derived here and resolves the expanded/minimized conflict in one place:
//! an expanded card always shows its content.

use crate::card::CardId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-card status. A card that has no entry in the state record is `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum CardStatus {
    #[default]
    Normal,
    /// Title bar visible, content hidden
    Minimized,
    /// Removed from the main flow and represented by a header restore button.
    /// `seq` orders the header buttons by insertion.
    Pinned { seq: u64 },
}

/// How a card should be drawn, derived from the state record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardView {
    /// Pinned: not part of the main flow
    Hidden,
    /// Title bar only
    Collapsed,
    /// Title bar and content, in the main flow
    Open,
    /// Drawn in the full-viewport overlay with content visible
    Expanded,
}

/// A header restore button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedCard {
    pub id: CardId,
    pub title: &'static str,
}

/// The interaction state record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ViewState {
    #[serde(default)]
    statuses: BTreeMap<CardId, CardStatus>,

    #[serde(default)]
    expanded: Option<CardId>,

    /// Next pin sequence number (monotonic for the lifetime of the record)
    #[serde(default)]
    next_pin_seq: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, id: CardId) -> CardStatus {
        self.statuses.get(&id).copied().unwrap_or_default()
    }

    pub fn expanded(&self) -> Option<CardId> {
        self.expanded
    }

    pub fn is_expanded(&self, id: CardId) -> bool {
        self.expanded == Some(id)
    }

    pub fn is_pinned(&self, id: CardId) -> bool {
        matches!(self.status(id), CardStatus::Pinned { .. })
    }

    pub fn is_minimized(&self, id: CardId) -> bool {
        self.status(id) == CardStatus::Minimized
    }

    /// The pinned registry as header buttons, in pin order.
    pub fn pinned(&self) -> Vec<PinnedCard> {
        let mut pinned: Vec<(u64, CardId)> = self
            .statuses
            .iter()
            .filter_map(|(id, status)| match status {
                CardStatus::Pinned { seq } => Some((*seq, *id)),
                _ => None,
            })
            .collect();
        pinned.sort_unstable();
        pinned
            .into_iter()
            .map(|(_, id)| PinnedCard {
                id,
                title: id.title(),
            })
            .collect()
    }

    /// Cards that remain in the main flow, in flow order.
    pub fn in_flow(&self) -> Vec<CardId> {
        CardId::ALL
            .into_iter()
            .filter(|id| !self.is_pinned(*id))
            .collect()
    }

    /// Derive how a card should be drawn.
    pub fn view(&self, id: CardId) -> CardView {
        if self.is_expanded(id) {
            return CardView::Expanded;
        }
        match self.status(id) {
            CardStatus::Normal => CardView::Open,
            CardStatus::Minimized => CardView::Collapsed,
            CardStatus::Pinned { .. } => CardView::Hidden,
        }
    }

    /// Whether the card's content region is visible.
    pub fn is_content_visible(&self, id: CardId) -> bool {
        matches!(self.view(id), CardView::Open | CardView::Expanded)
    }

    /// Whether the minimize control is live for this card.
    pub fn can_minimize(&self, id: CardId) -> bool {
        !self.is_expanded(id) && !self.is_pinned(id)
    }

    /// Pin or unpin a card. Returns true if the state changed (always).
    ///
    /// Pinning the expanded card also clears the expanded reference. Unpinning
    /// returns the card to `Normal`.
    pub fn toggle_pin(&mut self, id: CardId) -> bool {
        if self.is_pinned(id) {
            self.statuses.remove(&id);
        } else {
            let seq = self.next_pin_seq;
            self.next_pin_seq += 1;
            self.statuses.insert(id, CardStatus::Pinned { seq });
            if self.expanded == Some(id) {
                self.expanded = None;
            }
        }
        true
    }

    /// Flip the minimized flag. Inert while the card is expanded or pinned.
    pub fn toggle_minimize(&mut self, id: CardId) -> bool {
        if !self.can_minimize(id) {
            return false;
        }
        if self.is_minimized(id) {
            self.statuses.remove(&id);
        } else {
            self.statuses.insert(id, CardStatus::Minimized);
        }
        true
    }

    /// Expand a card, or collapse it if it is already the expanded one.
    ///
    /// Single slot: expanding a card replaces any previously expanded card.
    /// Expanding clears a minimized status, so the card comes back at its
    /// default size once the overlay closes. Pinned cards cannot be expanded.
    pub fn toggle_expand(&mut self, id: CardId) -> bool {
        if self.expanded == Some(id) {
            self.expanded = None;
            return true;
        }
        if self.is_pinned(id) {
            return false;
        }
        if self.is_minimized(id) {
            self.statuses.remove(&id);
        }
        self.expanded = Some(id);
        true
    }

    /// Clear the expanded reference. Returns true if something was expanded.
    pub fn cancel(&mut self) -> bool {
        self.expanded.take().is_some()
    }

    /// Remove a card from the pinned registry. Returns true if it was pinned.
    pub fn restore(&mut self, id: CardId) -> bool {
        if !self.is_pinned(id) {
            return false;
        }
        self.statuses.remove(&id);
        true
    }
}
