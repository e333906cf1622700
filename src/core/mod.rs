//! Core types: cards, player and deck IDs, errors, configuration, RNG.
//!
//! Everything here is plain data with no synchronization; the concurrent
//! pieces live in `cards::deck` and `game`.

pub mod card;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use card::{format_cards, Card, CardValue};
pub use config::{validate_player_count, GameConfig, CARDS_PER_PLAYER, HAND_SIZE};
pub use error::{GameError, NoDiscardCandidate, PackError};
pub use player::{DeckId, PlayerId};
pub use rng::GameRng;
