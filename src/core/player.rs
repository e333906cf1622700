//! Player and deck identification.
//!
//! ## PlayerId / DeckId
//!
//! Both are 0-based ring positions. Human-readable output uses the 1-based
//! seat number (`number()`), so `PlayerId(0)` prints as "player 1".
//!
//! ## Ring wiring
//!
//! Player `i` draws from deck `i` and discards into deck `(i + 1) mod n`;
//! the last player's discards wrap around to deck 0.

use serde::{Deserialize, Serialize};

use super::card::CardValue;

/// Player identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The 1-based seat number used in output.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0 + 1
    }

    /// The card value this player collects.
    ///
    /// Seat `k` (1-based) prefers cards of value `k`.
    #[must_use]
    pub const fn preference(self) -> CardValue {
        self.number()
    }

    /// The deck this player draws from.
    #[must_use]
    pub const fn draw_deck(self) -> DeckId {
        DeckId(self.0)
    }

    /// The deck this player discards into, wrapping at the end of the ring.
    #[must_use]
    pub fn discard_deck(self, player_count: usize) -> DeckId {
        debug_assert!(player_count > 0, "ring needs at least one player");
        DeckId(((self.index() + 1) % player_count) as u32)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use ring_cards::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u32).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// Deck identifier (0-based ring position).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeckId(pub u32);

impl DeckId {
    /// Create a new deck ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw deck index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The 1-based deck number used in output.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0 + 1
    }

    /// Iterate over all deck IDs for a ring of `deck_count` decks.
    pub fn all(deck_count: usize) -> impl Iterator<Item = DeckId> {
        (0..deck_count as u32).map(DeckId)
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "deck {}", self.number())
    }
}
