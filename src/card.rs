//! Card identity
//!
//! Every content section of the portfolio is a "card" with a stable string id
//! and a display title. The set of cards is closed, so the id is an enum whose
//! declaration order is also the order cards appear in the main flow.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a portfolio card.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CardId {
    Whoami,
    Education,
    Projects,
    Experience,
    Contact,
}

impl CardId {
    /// All cards in main-flow order.
    pub const ALL: [CardId; 5] = [
        CardId::Whoami,
        CardId::Education,
        CardId::Projects,
        CardId::Experience,
        CardId::Contact,
    ];

    /// The stable string id (same as the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            CardId::Whoami => "whoami",
            CardId::Education => "education",
            CardId::Projects => "projects",
            CardId::Experience => "experience",
            CardId::Contact => "contact",
        }
    }

    /// Title shown in the card's title bar and on its header restore button.
    pub fn title(self) -> &'static str {
        self.as_str()
    }

    /// Parse a string id, returning None for unknown ids.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|card| card.as_str() == id)
    }

    /// Position of this card in the main flow.
    pub fn flow_index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
