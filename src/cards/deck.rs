//! Shared decks.
//!
//! Each deck sits between two neighbours in the ring: one player draws
//! from its front, the upstream player appends discards to its back. A
//! deck owns its own mutex and condition variable, so players only contend
//! with their two neighbours, never with the whole table.
//!
//! Drawing from an empty deck parks the drawer on the condition variable
//! until the discarder appends a card, or until the caller's stop check
//! turns true and `wake_all` is called.

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

use crate::core::{Card, DeckId};

/// A FIFO card queue with blocking draws.
#[derive(Debug)]
pub struct Deck {
    id: DeckId,
    cards: Mutex<VecDeque<Card>>,
    available: Condvar,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new(id: DeckId) -> Self {
        Self::with_cards(id, [])
    }

    /// Create a deck holding `cards`, first card at the front.
    pub fn with_cards(id: DeckId, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            id,
            cards: Mutex::new(cards.into_iter().collect()),
            available: Condvar::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> DeckId {
        self.id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.lock().is_empty()
    }

    /// Snapshot of the deck, front first.
    #[must_use]
    pub fn contents(&self) -> Vec<Card> {
        self.cards.lock().iter().copied().collect()
    }

    /// Append a card to the back and wake the drawer if it is waiting.
    pub fn push_back(&self, card: Card) {
        let mut cards = self.cards.lock();
        cards.push_back(card);
        self.available.notify_one();
    }

    /// Take the front card without waiting.
    pub fn try_draw(&self) -> Option<Card> {
        self.cards.lock().pop_front()
    }

    /// Take the front card, waiting while the deck is empty.
    ///
    /// `stop` is evaluated under the deck lock before every attempt;
    /// once it returns true nothing is drawn and `None` comes back. Whoever
    /// makes `stop` true must call `wake_all` afterwards.
    pub fn draw_until(&self, stop: impl Fn() -> bool) -> Option<Card> {
        let mut cards = self.cards.lock();
        loop {
            if stop() {
                return None;
            }
            if let Some(card) = cards.pop_front() {
                return Some(card);
            }
            self.available.wait(&mut cards);
        }
    }

    /// Wake every waiter so it re-evaluates its stop condition.
    pub fn wake_all(&self) {
        let _cards = self.cards.lock();
        self.available.notify_all();
    }
}
