//! Game configuration.
//!
//! A `GameConfig` names everything needed to build a `CardGame`:
//! - how many players sit around the ring
//! - where the pack file lives
//! - optionally, a directory for per-player and per-deck output files
//!
//! The player count is kept exactly as requested (it may come straight from
//! user input) and validated when the game is built.

use std::path::{Path, PathBuf};

use super::error::PackError;

/// Cards each player is dealt, and cards each deck starts with.
pub const HAND_SIZE: usize = 4;

/// Cards in the pack per player: one hand plus one deck.
pub const CARDS_PER_PLAYER: usize = 2 * HAND_SIZE;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Requested number of players. Must be positive.
    pub player_count: i64,

    /// Pack file: one card value per line, `8 * player_count` lines.
    pub pack_path: PathBuf,

    /// Directory for `player<N>_output.txt` / `deck<N>_output.txt`.
    /// `None` disables file output.
    pub output_dir: Option<PathBuf>,
}

impl GameConfig {
    /// Create a configuration for `player_count` players.
    ///
    /// The pack path defaults to `packs/<player_count>.txt`.
    pub fn new(player_count: i64) -> Self {
        Self {
            player_count,
            pack_path: PathBuf::from(format!("packs/{player_count}.txt")),
            output_dir: None,
        }
    }

    /// Set the pack file.
    #[must_use]
    pub fn with_pack_path(mut self, path: impl AsRef<Path>) -> Self {
        self.pack_path = path.as_ref().to_path_buf();
        self
    }

    /// Write player and deck output files into `dir`.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Validated player count.
    pub fn players(&self) -> Result<usize, PackError> {
        validate_player_count(self.player_count)
    }
}

/// Check that a requested player count is a positive integer whose pack
/// size (`8n`) is representable.
pub fn validate_player_count(requested: i64) -> Result<usize, PackError> {
    if requested <= 0 {
        return Err(PackError::NoPlayers { requested });
    }
    usize::try_from(requested)
        .ok()
        .filter(|n| n.checked_mul(CARDS_PER_PLAYER).is_some() && *n <= u32::MAX as usize)
        .ok_or(PackError::TooManyPlayers { requested })
}
