//! A player's hand.
//!
//! Four cards between cycles, five between a draw and the following
//! discard. Backed by a `SmallVec` so a hand never allocates.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{format_cards, Card, CardValue, NoDiscardCandidate, HAND_SIZE};

/// Cards held by one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[Card; HAND_SIZE + 1]>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand holding `cards` in order.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in the order they were received.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Add a card to the end of the hand.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove and return the card at `index`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Card {
        self.cards.remove(index)
    }

    /// Replace the whole hand.
    pub fn replace(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.clear();
        self.cards.extend(cards);
    }

    /// Four cards, all of one value.
    #[must_use]
    pub fn is_winning(&self) -> bool {
        self.cards.len() == HAND_SIZE && self.cards.windows(2).all(|w| w[0] == w[1])
    }

    /// Position of the card to give away.
    ///
    /// The highest-valued card that differs from `preference`; among equal
    /// values the one held longest. A preferred card is never chosen.
    /// Errors only when every card matches the preference.
    pub fn discard_index(&self, preference: CardValue) -> Result<usize, NoDiscardCandidate> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.value() != preference)
            .max_by(|(i, a), (j, b)| a.cmp(b).then(j.cmp(i)))
            .map(|(i, _)| i)
            .ok_or(NoDiscardCandidate { preference })
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_cards(self.cards.iter()))
    }
}
