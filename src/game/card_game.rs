//! Game orchestration.
//!
//! ## Lifecycle
//!
//! 1. Construct: validate the player count, open and validate the pack.
//! 2. `setup`: deal four cards to every hand in player order, then four to
//!    every deck in deck order, straight off the front of the pack.
//! 3. `run`: one thread per player until somebody claims the win; returns
//!    only after every player thread has exited.
//!
//! A game that fails to construct does not exist at all. There is no
//! partially built state to observe.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cards::{Deck, Pack};
use crate::core::{
    Card, CardValue, DeckId, GameConfig, GameError, PackError, PlayerId, CARDS_PER_PLAYER, HAND_SIZE,
};

use super::events::{EventSink, FileSink, PlayerEvent, TracingSink};
use super::player::{Player, TurnOutcome};
use super::table::Table;

/// The ring card game.
#[derive(Debug)]
pub struct CardGame {
    player_count: usize,
    pack: Pack,
    players: Vec<Player>,
    table: Option<Table>,
    output_dir: Option<PathBuf>,
}

impl CardGame {
    /// Build a game for `player_count` players from the pack file at `path`.
    pub fn new(player_count: i64, path: impl AsRef<Path>) -> Result<Self, GameError> {
        Ok(Self::from_pack(Pack::load(path, player_count)?))
    }

    /// Build a game from a configuration.
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        let mut game = Self::new(config.player_count, &config.pack_path)?;
        game.output_dir = config.output_dir.clone();
        Ok(game)
    }

    /// Build a game from pack text supplied by a reader.
    pub fn from_reader<R: BufRead>(reader: R, player_count: i64) -> Result<Self, GameError> {
        Ok(Self::from_pack(Pack::from_reader(reader, player_count)?))
    }

    /// Build a game around an already validated pack.
    #[must_use]
    pub fn from_pack(pack: Pack) -> Self {
        Self {
            player_count: pack.player_count(),
            pack,
            players: Vec::new(),
            table: None,
            output_dir: None,
        }
    }

    /// Write player and deck output files into `dir` when the game runs.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Deal the pack into hands and decks.
    ///
    /// Hands first (player 0, 1, ...), four consecutive cards each; then
    /// decks in the same order. The pack is empty afterwards.
    pub fn setup(&mut self) -> Result<(), GameError> {
        if self.table.is_some() {
            return Err(GameError::AlreadyDealt);
        }
        if !self.pack.can_finish() {
            warn!("no card value appears four times; nobody can win with this pack");
        }

        let n = self.player_count;
        let available = self.pack.len();
        let short_pack = || PackError::WrongCardCount {
            expected: n * CARDS_PER_PLAYER,
            found: available,
        };

        let mut players = Vec::with_capacity(n);
        for id in PlayerId::all(n) {
            let dealt = self.pack.deal_four().ok_or_else(short_pack)?;
            players.push(Player::new(id, n, dealt));
        }
        let mut decks = Vec::with_capacity(n);
        for _ in 0..n {
            let dealt = self.pack.deal_four().ok_or_else(short_pack)?;
            decks.push(dealt.to_vec());
        }

        self.players = players;
        self.table = Some(Table::new(decks));
        info!(players = n, "cards dealt");
        Ok(())
    }

    /// Play until someone wins, logging through `tracing` (or to output
    /// files, if an output directory is configured).
    pub fn run(&mut self) -> Result<PlayerId, GameError> {
        match self.output_dir.clone() {
            Some(dir) => {
                let sink = FileSink::create(&dir, self.player_count)?;
                info!(dir = %dir.display(), "writing game output");
                self.run_with(&sink)
            }
            None => self.run_with(&TracingSink),
        }
    }

    /// Play until someone wins, reporting every event to `sink`.
    ///
    /// If a dealt hand is already four of a kind, the first such player (in
    /// seat order) wins before anybody draws. Otherwise every player gets a
    /// thread and this call blocks until all of them have exited. Running a
    /// finished game again returns the recorded winner.
    ///
    /// Every hand must hold exactly four cards; a seat left mid-cycle by the
    /// single-step API is `HandSize`. If the OS refuses a player thread, the
    /// players already started are halted and the spawn error is returned.
    pub fn run_with(&mut self, sink: &dyn EventSink) -> Result<PlayerId, GameError> {
        let table = self.table.as_ref().ok_or(GameError::NotDealt)?;
        if let Some(winner) = table.winner() {
            return Ok(winner);
        }
        if table.is_halted() {
            return Err(GameError::Unfinished);
        }
        if let Some(player) = self.players.iter().find(|p| p.hand().len() != HAND_SIZE) {
            return Err(GameError::HandSize {
                player: player.id(),
                size: player.hand().len(),
            });
        }

        for player in &self.players {
            sink.record(&PlayerEvent::InitialHand {
                player: player.id(),
                hand: player.hand().cards().to_vec(),
            });
        }
        if let Some(player) = self.players.iter().find(|p| p.has_winning_hand()) {
            if table.claim_win(player.id()) {
                sink.record(&PlayerEvent::Won { player: player.id() });
            }
        }

        info!(players = self.players.len(), "starting play");
        let started = thread::scope(|s| -> io::Result<()> {
            for player in self.players.iter_mut() {
                let name = format!("player-{}", player.id().number());
                let spawned = thread::Builder::new()
                    .name(name)
                    .spawn_scoped(s, move || player.play(table, sink));
                if let Err(err) = spawned {
                    table.halt();
                    return Err(err);
                }
            }
            Ok(())
        });
        if let Err(err) = started {
            warn!(%err, "could not start every player; play halted");
            sink.finish();
            return Err(err.into());
        }

        for deck in table.decks() {
            sink.record(&PlayerEvent::DeckContents {
                deck: deck.id(),
                cards: deck.contents(),
            });
        }
        sink.finish();

        let winner = table.winner().ok_or(GameError::Unfinished)?;
        info!(%winner, "game over");
        Ok(winner)
    }

    // === Accessors ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Players in seat order. Empty before `setup`.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Panics if `id` is out of range or the game has not been set up; the
    /// single-step calls below return `NoSuchPlayer` instead.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Decks in ring order. Empty before `setup`.
    #[must_use]
    pub fn decks(&self) -> &[Deck] {
        match &self.table {
            Some(table) => table.decks(),
            None => &[],
        }
    }

    /// Panics if `id` is out of range or the game has not been set up.
    #[must_use]
    pub fn deck(&self, id: DeckId) -> &Deck {
        &self.decks()[id.index()]
    }

    /// Undealt cards; empty after `setup`.
    #[must_use]
    pub fn pack(&self) -> &Pack {
        &self.pack
    }

    #[must_use]
    pub fn is_dealt(&self) -> bool {
        self.table.is_some()
    }

    #[must_use]
    pub fn winner_id(&self) -> Option<PlayerId> {
        self.table.as_ref().and_then(Table::winner)
    }

    /// The winning player, once the game has concluded.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.winner_id().map(|id| self.player(id))
    }

    /// Cards in hands, decks, and the pack. Always `8 * player_count`
    /// between cycles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        let in_hands: usize = self.players.iter().map(|p| p.hand().len()).sum();
        let in_decks = self.table.as_ref().map_or(0, Table::cards_in_decks);
        in_hands + in_decks + self.pack.len()
    }

    // === Single-step play ===
    //
    // These never block and never spawn threads. Each takes `&mut self`, so
    // no player thread can be running at the same time. Events go to
    // `TracingSink` only: stepped play never writes the output files of a
    // configured output directory.

    fn no_such_player(&self, player: PlayerId) -> GameError {
        GameError::NoSuchPlayer {
            player,
            player_count: self.player_count,
        }
    }

    /// Move the front card of `player`'s draw deck into their hand.
    ///
    /// `Ok(None)` if the draw deck is empty. The draw is logged through
    /// `tracing`.
    pub fn draw_card(&mut self, player: PlayerId) -> Result<Option<Card>, GameError> {
        let missing = self.no_such_player(player);
        let table = self.table.as_ref().ok_or(GameError::NotDealt)?;
        let seat = self.players.get_mut(player.index()).ok_or(missing)?;
        let drawn = table.deck(seat.draw_deck()).try_draw();
        if let Some(card) = drawn {
            seat.take_card(card);
            TracingSink.record(&PlayerEvent::Drew {
                player,
                card,
                deck: seat.draw_deck(),
            });
        }
        Ok(drawn)
    }

    /// The card `player` would give away right now.
    pub fn card_to_discard(&self, player: PlayerId) -> Result<Option<Card>, GameError> {
        self.table.as_ref().ok_or(GameError::NotDealt)?;
        let seat = self
            .players
            .get(player.index())
            .ok_or_else(|| self.no_such_player(player))?;
        Ok(seat.card_to_discard())
    }

    /// Move the card chosen by the discard rule to the back of `player`'s
    /// discard deck. The discard is logged through `tracing`.
    pub fn discard_card(&mut self, player: PlayerId) -> Result<Option<Card>, GameError> {
        let missing = self.no_such_player(player);
        let table = self.table.as_ref().ok_or(GameError::NotDealt)?;
        let seat = self.players.get_mut(player.index()).ok_or(missing)?;
        let given = seat.give_card();
        if let Some(card) = given {
            table.deck(seat.discard_deck()).push_back(card);
            TracingSink.record(&PlayerEvent::Discarded {
                player,
                card,
                deck: seat.discard_deck(),
            });
        }
        Ok(given)
    }

    /// Does `player` hold four of a kind?
    #[must_use]
    pub fn check_win(&self, player: PlayerId) -> bool {
        self.players
            .get(player.index())
            .is_some_and(Player::has_winning_hand)
    }

    /// One full draw/discard/check cycle for `player`, logged through
    /// `tracing`.
    pub fn play_turn(&mut self, player: PlayerId) -> Result<TurnOutcome, GameError> {
        let missing = self.no_such_player(player);
        let table = self.table.as_ref().ok_or(GameError::NotDealt)?;
        let seat = self.players.get_mut(player.index()).ok_or(missing)?;
        Ok(seat.step(table, &TracingSink))
    }

    /// Mutable access to a seat, for arranging specific hands.
    ///
    /// Panics if `id` is out of range or the game has not been set up.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Snapshot of hands, decks, and the winner.
    #[must_use]
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            player_count: self.player_count,
            winner: self.winner_id(),
            players: self
                .players
                .iter()
                .map(|p| PlayerSummary {
                    player: p.id(),
                    preference: p.preference(),
                    hand: p.hand().cards().to_vec(),
                })
                .collect(),
            decks: self
                .decks()
                .iter()
                .map(|d| DeckSummary {
                    deck: d.id(),
                    cards: d.contents(),
                })
                .collect(),
        }
    }
}

/// Serializable view of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub player_count: usize,
    pub winner: Option<PlayerId>,
    pub players: Vec<PlayerSummary>,
    pub decks: Vec<DeckSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: PlayerId,
    pub preference: CardValue,
    pub hand: Vec<Card>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub deck: DeckId,
    pub cards: Vec<Card>,
}

impl GameSummary {
    /// Cards across all hands and decks.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.players.iter().map(|p| p.hand.len()).sum::<usize>()
            + self.decks.iter().map(|d| d.cards.len()).sum::<usize>()
    }
}
