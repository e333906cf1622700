//! Player agents.
//!
//! A player holds a hand, a fixed preferred value, and the ids of the two
//! decks it touches. Each cycle it draws from the front of its own deck,
//! gives away its highest non-preferred card to the back of the next deck,
//! and checks for four of a kind.
//!
//! The same cycle runs two ways:
//! - `play`: the blocking loop run on a player's own thread
//! - `step`: one non-blocking cycle, for single-threaded inspection

use tracing::debug;

use crate::cards::Hand;
use crate::core::{Card, CardValue, DeckId, PlayerId, HAND_SIZE};

use super::events::{EventSink, PlayerEvent};
use super::table::Table;

/// Result of one draw/discard cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Draw deck was empty; nothing changed.
    Blocked,
    /// Cycle completed without a win.
    Continue,
    /// This cycle completed four of a kind and claimed the win.
    Won,
    /// Someone has already won; this player stops.
    GameOver,
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    preference: CardValue,
    hand: Hand,
    draw_deck: DeckId,
    discard_deck: DeckId,
}

impl Player {
    /// Seat `id` in a ring of `player_count` with its dealt hand.
    ///
    /// The preference is the 1-based seat number and is fixed from here on.
    pub fn new(id: PlayerId, player_count: usize, dealt: impl IntoIterator<Item = Card>) -> Self {
        Self {
            id,
            preference: id.preference(),
            hand: Hand::from_cards(dealt),
            draw_deck: id.draw_deck(),
            discard_deck: id.discard_deck(player_count),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn preference(&self) -> CardValue {
        self.preference
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    #[must_use]
    pub fn draw_deck(&self) -> DeckId {
        self.draw_deck
    }

    #[must_use]
    pub fn discard_deck(&self) -> DeckId {
        self.discard_deck
    }

    /// Four cards of one value.
    #[must_use]
    pub fn has_winning_hand(&self) -> bool {
        self.hand.is_winning()
    }

    /// Overwrite the hand with four copies of the preferred value.
    pub fn set_winning_hand(&mut self) {
        self.hand.replace([Card::new(self.preference); HAND_SIZE]);
    }

    pub(crate) fn take_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Position of the card this player would give away now.
    ///
    /// If every card is preferred, the most recently received card goes.
    fn discard_position(&self) -> Option<usize> {
        match self.hand.discard_index(self.preference) {
            Ok(index) => Some(index),
            Err(reason) => {
                debug!(player = %self.id, %reason, "discarding the newest card");
                self.hand.len().checked_sub(1)
            }
        }
    }

    /// The card this player would give away now.
    #[must_use]
    pub fn card_to_discard(&self) -> Option<Card> {
        self.discard_position().map(|i| self.hand.cards()[i])
    }

    /// Remove the card chosen by the discard rule from the hand.
    pub(crate) fn give_card(&mut self) -> Option<Card> {
        self.discard_position().map(|i| self.hand.remove(i))
    }

    /// One cycle without waiting: `Blocked` if the draw deck is empty.
    pub(crate) fn step(&mut self, table: &Table, sink: &dyn EventSink) -> TurnOutcome {
        if table.is_over() {
            return TurnOutcome::GameOver;
        }
        match table.deck(self.draw_deck).try_draw() {
            Some(card) => self.complete_turn(card, table, sink),
            None => TurnOutcome::Blocked,
        }
    }

    /// Cycle until someone wins, then report and stop.
    ///
    /// Waits on the draw deck whenever it is empty. The win flag is checked
    /// under the deck lock before every draw, so once the game is over this
    /// player never takes another card.
    pub(crate) fn play(&mut self, table: &Table, sink: &dyn EventSink) {
        debug!(player = %self.id, preference = self.preference, "starting");
        let deck = table.deck(self.draw_deck);

        while let Some(card) = deck.draw_until(|| table.is_over()) {
            if self.complete_turn(card, table, sink) != TurnOutcome::Continue {
                break;
            }
        }

        self.report_exit(table, sink);
    }

    fn complete_turn(&mut self, drawn: Card, table: &Table, sink: &dyn EventSink) -> TurnOutcome {
        sink.record(&PlayerEvent::Drew {
            player: self.id,
            card: drawn,
            deck: self.draw_deck,
        });
        self.take_card(drawn);

        // Hand holds five cards here, so there is always something to give.
        if let Some(card) = self.give_card() {
            table.deck(self.discard_deck).push_back(card);
            sink.record(&PlayerEvent::Discarded {
                player: self.id,
                card,
                deck: self.discard_deck,
            });
        }
        sink.record(&PlayerEvent::CurrentHand {
            player: self.id,
            hand: self.hand.cards().to_vec(),
        });

        if !self.has_winning_hand() {
            return if table.is_over() {
                TurnOutcome::GameOver
            } else {
                TurnOutcome::Continue
            };
        }
        if table.claim_win(self.id) {
            sink.record(&PlayerEvent::Won { player: self.id });
            TurnOutcome::Won
        } else {
            TurnOutcome::GameOver
        }
    }

    fn report_exit(&self, table: &Table, sink: &dyn EventSink) {
        if let Some(winner) = table.winner().filter(|&w| w != self.id) {
            sink.record(&PlayerEvent::Informed {
                player: self.id,
                winner,
            });
        }
        sink.record(&PlayerEvent::Exited { player: self.id });
        sink.record(&PlayerEvent::FinalHand {
            player: self.id,
            hand: self.hand.cards().to_vec(),
        });
    }
}
