//! Card containers: the pack, player hands, and the shared ring decks.
//!
//! ## Key Types
//!
//! - `Pack`: validated input, drained once by dealing
//! - `Hand`: a player's four (transiently five) cards and the discard rule
//! - `Deck`: FIFO queue shared by a drawer and a discarder, with blocking draws

pub mod deck;
pub mod hand;
pub mod pack;

pub use deck::Deck;
pub use hand::Hand;
pub use pack::Pack;
