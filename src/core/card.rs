//! Card value type.
//!
//! A `Card` is an immutable face value. Cards are created once while the
//! pack is parsed and afterwards only move between containers (hand, deck)
//! by removal followed by insertion; they are never duplicated or mutated.

use serde::{Deserialize, Serialize};

/// Face value of a card. Pack files only ever contain non-negative integers.
pub type CardValue = u32;

/// A single card.
///
/// Equality and ordering are by face value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card(CardValue);

impl Card {
    /// Create a card with the given face value.
    #[must_use]
    pub const fn new(value: CardValue) -> Self {
        Self(value)
    }

    /// Get the face value.
    #[must_use]
    pub const fn value(self) -> CardValue {
        self.0
    }
}

impl From<CardValue> for Card {
    fn from(value: CardValue) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Format a run of cards as space-separated values (`"1 1 3 7"`).
pub fn format_cards<'a>(cards: impl IntoIterator<Item = &'a Card>) -> String {
    cards
        .into_iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
