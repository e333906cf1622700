//! Player event records and the sinks that receive them.
//!
//! Players report every draw, discard, and the end of their game to an
//! `EventSink`. Sinks are shared by all player threads, so they take `&self`
//! and must be `Sync`.
//!
//! ## Sinks
//!
//! - `TracingSink`: forwards each event to `tracing`
//! - `MemorySink`: keeps events in arrival order
//! - `FileSink`: one output file per player and per deck
//!
//! Event text uses 1-based seat numbers: `player 1 draws a 4 from deck 1`.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{format_cards, Card, DeckId, PlayerId};

/// Something that happened during play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Hand as dealt, before any play.
    InitialHand { player: PlayerId, hand: Vec<Card> },
    Drew { player: PlayerId, card: Card, deck: DeckId },
    Discarded { player: PlayerId, card: Card, deck: DeckId },
    /// Hand at the end of a draw/discard cycle.
    CurrentHand { player: PlayerId, hand: Vec<Card> },
    Won { player: PlayerId },
    /// `winner` told `player` the game is over.
    Informed { player: PlayerId, winner: PlayerId },
    Exited { player: PlayerId },
    FinalHand { player: PlayerId, hand: Vec<Card> },
    /// Deck contents once every player has stopped.
    DeckContents { deck: DeckId, cards: Vec<Card> },
}

impl PlayerEvent {
    /// The player this event belongs to; `None` for deck records.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            PlayerEvent::InitialHand { player, .. }
            | PlayerEvent::Drew { player, .. }
            | PlayerEvent::Discarded { player, .. }
            | PlayerEvent::CurrentHand { player, .. }
            | PlayerEvent::Won { player }
            | PlayerEvent::Informed { player, .. }
            | PlayerEvent::Exited { player }
            | PlayerEvent::FinalHand { player, .. } => Some(*player),
            PlayerEvent::DeckContents { .. } => None,
        }
    }
}

impl std::fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerEvent::InitialHand { player, hand } => {
                write!(f, "{player} initial hand {}", format_cards(hand))
            }
            PlayerEvent::Drew { player, card, deck } => {
                write!(f, "{player} draws a {card} from {deck}")
            }
            PlayerEvent::Discarded { player, card, deck } => {
                write!(f, "{player} discards a {card} to {deck}")
            }
            PlayerEvent::CurrentHand { player, hand } => {
                write!(f, "{player} current hand is {}", format_cards(hand))
            }
            PlayerEvent::Won { player } => write!(f, "{player} wins"),
            PlayerEvent::Informed { player, winner } => {
                write!(f, "{winner} has informed {player} that {winner} has won")
            }
            PlayerEvent::Exited { player } => write!(f, "{player} exits"),
            PlayerEvent::FinalHand { player, hand } => {
                write!(f, "{player} final hand: {}", format_cards(hand))
            }
            PlayerEvent::DeckContents { deck, cards } => {
                write!(f, "deck{} contents: {}", deck.number(), format_cards(cards))
            }
        }
    }
}

/// Receiver for player events.
pub trait EventSink: Sync {
    fn record(&self, event: &PlayerEvent);

    /// Called once after every player has stopped.
    fn finish(&self) {}
}

/// Forwards events to `tracing`: per-cycle events at debug, the rest at info.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &PlayerEvent) {
        match event {
            PlayerEvent::InitialHand { .. }
            | PlayerEvent::Drew { .. }
            | PlayerEvent::Discarded { .. }
            | PlayerEvent::CurrentHand { .. } => debug!("{event}"),
            _ => info!("{event}"),
        }
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<PlayerEvent>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<PlayerEvent> {
        self.events.lock().clone()
    }

    /// Events belonging to one player, in order.
    #[must_use]
    pub fn for_player(&self, player: PlayerId) -> Vec<PlayerEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.player() == Some(player))
            .cloned()
            .collect()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &PlayerEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Writes `player<N>_output.txt` and `deck<N>_output.txt` into a directory.
///
/// Write failures are logged and otherwise ignored; output problems never
/// stop a game.
#[derive(Debug)]
pub struct FileSink {
    dir: PathBuf,
    players: Vec<Mutex<BufWriter<File>>>,
    decks: Vec<Mutex<BufWriter<File>>>,
}

impl FileSink {
    /// Create (or truncate) one file per player and per deck under `dir`.
    pub fn create(dir: impl AsRef<Path>, player_count: usize) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let open = |name: String| -> io::Result<Mutex<BufWriter<File>>> {
            Ok(Mutex::new(BufWriter::new(File::create(dir.join(name))?)))
        };

        let players: Vec<_> = PlayerId::all(player_count)
            .map(|p| open(Self::player_file_name(p)))
            .collect::<io::Result<_>>()?;
        let decks: Vec<_> = DeckId::all(player_count)
            .map(|d| open(Self::deck_file_name(d)))
            .collect::<io::Result<_>>()?;

        Ok(Self { dir, players, decks })
    }

    #[must_use]
    pub fn player_file_name(player: PlayerId) -> String {
        format!("player{}_output.txt", player.number())
    }

    #[must_use]
    pub fn deck_file_name(deck: DeckId) -> String {
        format!("deck{}_output.txt", deck.number())
    }

    fn writer_for(&self, event: &PlayerEvent) -> Option<&Mutex<BufWriter<File>>> {
        match event {
            PlayerEvent::DeckContents { deck, .. } => self.decks.get(deck.index()),
            _ => event.player().and_then(|p| self.players.get(p.index())),
        }
    }
}

impl EventSink for FileSink {
    fn record(&self, event: &PlayerEvent) {
        let Some(writer) = self.writer_for(event) else {
            warn!(?event, "event for a seat with no output file");
            return;
        };
        if let Err(err) = writeln!(writer.lock(), "{event}") {
            warn!(%err, dir = %self.dir.display(), "failed to write game output");
        }
    }

    fn finish(&self) {
        for writer in self.players.iter().chain(&self.decks) {
            if let Err(err) = writer.lock().flush() {
                warn!(%err, dir = %self.dir.display(), "failed to flush game output");
            }
        }
    }
}
