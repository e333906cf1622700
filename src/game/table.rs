//! The table: every deck in the ring plus the winner slot.
//!
//! This is the only state shared between player threads. Hands are not on
//! the table; each player thread owns its hand outright.
//!
//! Play ends when a winner is claimed, or when the table is halted because
//! not every player could be started.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::cards::Deck;
use crate::core::{Card, DeckId, PlayerId};

use super::winner::WinnerSlot;

/// Decks in ring order and the shared win state.
#[derive(Debug)]
pub struct Table {
    decks: Vec<Deck>,
    winner: WinnerSlot,
    halted: AtomicBool,
}

impl Table {
    /// Build a table from dealt deck contents, deck `i` at index `i`.
    pub fn new(deck_contents: impl IntoIterator<Item = Vec<Card>>) -> Self {
        let decks = deck_contents
            .into_iter()
            .enumerate()
            .map(|(i, cards)| Deck::with_cards(DeckId::new(i as u32), cards))
            .collect();

        Self {
            decks,
            winner: WinnerSlot::new(),
            halted: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    /// Panics if `id` is not a deck on this table.
    #[must_use]
    pub fn deck(&self, id: DeckId) -> &Deck {
        &self.decks[id.index()]
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner.winner()
    }

    /// True once someone has won or the table has been halted.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_claimed() || self.is_halted()
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Acquire)
    }

    /// Claim the win for `player`. Always fails on a halted table.
    ///
    /// On success every deck is woken so that players parked on an empty
    /// deck see the game is over and leave.
    pub fn claim_win(&self, player: PlayerId) -> bool {
        if self.is_halted() || !self.winner.claim(player) {
            return false;
        }
        self.wake_all();
        true
    }

    /// Stop play with no winner and wake every parked player.
    pub fn halt(&self) {
        self.halted.store(true, Ordering::Release);
        self.wake_all();
    }

    fn wake_all(&self) {
        for deck in &self.decks {
            deck.wake_all();
        }
    }

    /// Cards currently sitting in decks.
    #[must_use]
    pub fn cards_in_decks(&self) -> usize {
        self.decks.iter().map(Deck::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_table_layout() {
        let table = Table::new(vec![vec![Card::new(1)], vec![Card::new(2), Card::new(3)]]);

        assert_eq!(table.decks().len(), 2);
        assert_eq!(table.deck(DeckId::new(1)).id(), DeckId::new(1));
        assert_eq!(table.cards_in_decks(), 3);
        assert!(!table.is_over());
    }

    #[test]
    fn test_claim_releases_blocked_drawers() {
        let table = Table::new(vec![Vec::new(), Vec::new()]);

        thread::scope(|s| {
            let waiters: Vec<_> = table
                .decks()
                .iter()
                .map(|deck| {
                    let table = &table;
                    s.spawn(move || deck.draw_until(|| table.is_over()))
                })
                .collect();

            thread::sleep(Duration::from_millis(20));
            assert!(table.claim_win(PlayerId::new(1)));
            for waiter in waiters {
                assert_eq!(waiter.join().unwrap(), None);
            }
        });

        assert_eq!(table.winner(), Some(PlayerId::new(1)));
        assert!(!table.claim_win(PlayerId::new(0)));
    }

    #[test]
    fn test_halt_releases_blocked_drawers_without_winner() {
        let table = Table::new(vec![Vec::new(), Vec::new()]);

        thread::scope(|s| {
            let waiters: Vec<_> = table
                .decks()
                .iter()
                .map(|deck| {
                    let table = &table;
                    s.spawn(move || deck.draw_until(|| table.is_over()))
                })
                .collect();

            thread::sleep(Duration::from_millis(20));
            table.halt();
            for waiter in waiters {
                assert_eq!(waiter.join().unwrap(), None);
            }
        });

        assert!(table.is_over());
        assert_eq!(table.winner(), None);
        assert!(!table.claim_win(PlayerId::new(0)));
    }
}
