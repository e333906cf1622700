//! # ring-cards
//!
//! A concurrent simulation of a ring card game.
//!
//! `n` players sit in a ring with `n` decks between them. Player `i` draws
//! from deck `i` and discards into deck `i + 1` (wrapping to deck 0). Every
//! player collects cards matching its seat number and passes on the rest;
//! the first player to hold four cards of one value wins and everybody
//! else stops.
//!
//! ## Modules
//!
//! - `core`: cards, player/deck ids, errors, configuration, RNG
//! - `cards`: the pack, hands, and the shared decks
//! - `game`: players, the table, event sinks, and the `CardGame` driver
//!
//! ## Example
//!
//! ```
//! use ring_cards::{CardGame, GameRng, MemorySink, Pack};
//!
//! let mut rng = GameRng::new(42);
//! let pack = Pack::generate(3, &mut rng).unwrap();
//!
//! let mut game = CardGame::from_pack(pack);
//! game.setup().unwrap();
//! assert!(game.pack().is_empty());
//!
//! let winner = game.run_with(&MemorySink::new()).unwrap();
//! assert!(game.player(winner).has_winning_hand());
//! ```

pub mod cards;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Card, CardValue, DeckId, PlayerId,
    GameConfig, GameError, PackError, NoDiscardCandidate,
    GameRng,
};

pub use crate::cards::{Deck, Hand, Pack};

pub use crate::game::{
    CardGame, GameSummary, Player, TurnOutcome,
    EventSink, PlayerEvent, TracingSink, MemorySink, FileSink,
};
