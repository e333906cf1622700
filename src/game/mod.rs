//! The concurrent game engine.
//!
//! ## Key Types
//!
//! - `CardGame`: builds, deals, and runs a game
//! - `Player`: one seat; runs the draw/discard cycle
//! - `Table`: the ring of decks and the winner slot, shared by all threads
//! - `WinnerSlot`: compare-and-set record of the first player to win
//! - `EventSink`: where players report what they do
//!
//! ## Threads
//!
//! `CardGame::run` spawns one scoped thread per player. The only shared
//! state is the `Table`: each deck has its own lock, and the winner is a
//! single atomic. Hands are owned by their player's thread.

pub mod card_game;
pub mod events;
pub mod player;
pub mod table;
pub mod winner;

pub use card_game::{CardGame, DeckSummary, GameSummary, PlayerSummary};
pub use events::{EventSink, FileSink, MemorySink, PlayerEvent, TracingSink};
pub use player::{Player, TurnOutcome};
pub use table::Table;
pub use winner::WinnerSlot;
