//! The winner slot.
//!
//! A single atomic cell that starts unclaimed. Claiming is one
//! compare-and-set, so when several players complete four of a kind at the
//! same moment exactly one claim succeeds; whichever reaches the atomic
//! step first wins. Once set the slot never changes.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::core::PlayerId;

const UNCLAIMED: u32 = u32::MAX;

/// Write-once record of the winning player.
#[derive(Debug)]
pub struct WinnerSlot {
    winner: AtomicU32,
}

impl Default for WinnerSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl WinnerSlot {
    #[must_use]
    pub fn new() -> Self {
        Self {
            winner: AtomicU32::new(UNCLAIMED),
        }
    }

    /// Try to record `player` as the winner. True only for the first claim.
    pub fn claim(&self, player: PlayerId) -> bool {
        debug_assert!(player.0 != UNCLAIMED, "player id collides with the unclaimed marker");
        self.winner
            .compare_exchange(UNCLAIMED, player.0, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.winner.load(Ordering::Acquire) {
            UNCLAIMED => None,
            id => Some(PlayerId(id)),
        }
    }

    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.winner().is_some()
    }
}
