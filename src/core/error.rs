//! Error types.
//!
//! Construction-time failures fall into two kinds that callers must be able
//! to tell apart: the pack source could not be opened at all
//! (`GameError::SourceNotFound`), or it was opened but its contents are
//! structurally invalid (`GameError::InvalidPack`). Both are fatal to the
//! game being built; nothing is retried.

use std::io;
use std::path::PathBuf;

use super::player::PlayerId;

/// Why a pack (or the player count it was declared for) was rejected.
#[derive(thiserror::Error, Debug)]
pub enum PackError {
    #[error("player count must be a positive integer, got {requested}")]
    NoPlayers { requested: i64 },
    #[error("player count {requested} is too large for this platform")]
    TooManyPlayers { requested: i64 },
    #[error("line {line}: {text:?} is not a non-negative integer")]
    Unparsable { line: usize, text: String },
    #[error("expected {expected} cards (8 per player), found {found}")]
    WrongCardCount { expected: usize, found: usize },
    #[error("line {line}: read failed: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// Errors surfaced by `CardGame`.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("invalid pack: {0}")]
    InvalidPack(#[from] PackError),
    #[error("pack source {} could not be opened: {source}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cards have not been dealt yet")]
    NotDealt,
    #[error("cards have already been dealt")]
    AlreadyDealt,
    #[error("play stopped without a winner")]
    Unfinished,
    #[error("{player} holds {size} cards; play starts from exactly 4")]
    HandSize { player: PlayerId, size: usize },
    #[error("{player} is not seated at a {player_count}-player table")]
    NoSuchPlayer { player: PlayerId, player_count: usize },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl GameError {
    /// True for structurally invalid configuration or pack content.
    #[must_use]
    pub fn is_invalid_pack(&self) -> bool {
        matches!(self, GameError::InvalidPack(_))
    }

    /// True when the pack source itself could not be opened.
    #[must_use]
    pub fn is_source_not_found(&self) -> bool {
        matches!(self, GameError::SourceNotFound { .. })
    }
}

/// Every card in a five-card hand matches the player's preference.
///
/// Internal only: the player resolves it by discarding the card it just drew.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no card in hand differs from the preferred value {preference}")]
pub struct NoDiscardCandidate {
    pub preference: u32,
}
