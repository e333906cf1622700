//! The pack: every card in the game, parsed and validated before play.
//!
//! ## Format
//!
//! One non-negative integer per line, no header, exactly `8 * n` lines for
//! `n` players. Surrounding whitespace on a line is ignored; anything else
//! that does not parse (including a blank line) rejects the whole pack.
//!
//! ## Lifecycle
//!
//! A pack is built once, then drained front to back by dealing. Extraction
//! is not replayable: after dealing the pack is empty for the rest of the
//! game and its cards live in hands and decks.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::core::config::{validate_player_count, CARDS_PER_PLAYER, HAND_SIZE};
use crate::core::{Card, CardValue, GameError, GameRng, PackError};

/// Ordered cards parsed from a pack source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pack {
    cards: VecDeque<Card>,
    player_count: usize,
}

impl Pack {
    /// Validate already-parsed cards against the declared player count.
    pub fn from_cards(cards: Vec<Card>, player_count: i64) -> Result<Self, PackError> {
        let player_count = validate_player_count(player_count)?;
        check_card_count(cards.len(), player_count)?;
        Ok(Self {
            cards: cards.into(),
            player_count,
        })
    }

    /// Parse a pack from a line source.
    ///
    /// Every line must hold one non-negative integer, and there must be
    /// exactly `8 * player_count` lines.
    pub fn from_lines<I, S>(lines: I, player_count: i64) -> Result<Self, PackError>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        let players = validate_player_count(player_count)?;
        let mut cards = Vec::with_capacity(players * CARDS_PER_PLAYER);

        for (i, line) in lines.into_iter().enumerate() {
            let line_no = i + 1;
            let line = line.map_err(|source| PackError::Read { line: line_no, source })?;
            let text = line.as_ref();
            let value = text
                .trim()
                .parse::<CardValue>()
                .map_err(|_| PackError::Unparsable {
                    line: line_no,
                    text: text.to_string(),
                })?;
            cards.push(Card::new(value));
        }

        Self::from_cards(cards, player_count)
    }

    /// Parse a pack from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, player_count: i64) -> Result<Self, PackError> {
        Self::from_lines(reader.lines(), player_count)
    }

    /// Open and parse a pack file.
    ///
    /// The player count is checked before the file is touched, so a bad
    /// count is reported as `InvalidPack` even when the file is missing.
    pub fn load(path: impl AsRef<Path>, player_count: i64) -> Result<Self, GameError> {
        validate_player_count(player_count)?;

        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GameError::SourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_reader(BufReader::new(file), player_count)?)
    }

    /// Generate a shuffled pack holding eight copies of every value `1..=n`.
    ///
    /// The highest value is the last player's preference, and the highest
    /// non-preferred card is always the one discarded, so those cards keep
    /// moving around the ring until that player collects four. Games dealt
    /// from a generated pack always finish.
    pub fn generate(player_count: usize, rng: &mut GameRng) -> Result<Self, PackError> {
        let requested = i64::try_from(player_count).unwrap_or(i64::MAX);
        let players = validate_player_count(requested)?;

        let mut cards: Vec<Card> = (1..=players as CardValue)
            .flat_map(|value| std::iter::repeat(Card::new(value)).take(CARDS_PER_PLAYER))
            .collect();
        rng.shuffle(&mut cards);

        Self::from_cards(cards, requested)
    }

    /// Number of players this pack was validated for.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Cards not yet dealt.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True once every card has been dealt.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards in pack order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Take the next `HAND_SIZE` cards, or `None` if the pack runs short.
    pub fn deal_four(&mut self) -> Option<[Card; HAND_SIZE]> {
        if self.cards.len() < HAND_SIZE {
            return None;
        }
        let mut dealt = [Card::new(0); HAND_SIZE];
        for slot in &mut dealt {
            *slot = self.cards.pop_front()?;
        }
        Some(dealt)
    }

    /// How many cards of each value remain in the pack.
    #[must_use]
    pub fn value_counts(&self) -> FxHashMap<CardValue, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.value()).or_insert(0) += 1;
        }
        counts
    }

    /// True when at least one value appears four or more times.
    ///
    /// Without that nobody can ever hold four of a kind and play would
    /// never end.
    #[must_use]
    pub fn can_finish(&self) -> bool {
        self.value_counts().values().any(|&count| count >= HAND_SIZE)
    }

    /// Write the remaining cards in pack file format.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for card in &self.cards {
            writeln!(writer, "{}", card)?;
        }
        writer.flush()
    }

    /// Save the remaining cards to a pack file.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }
}

fn check_card_count(found: usize, player_count: usize) -> Result<(), PackError> {
    let expected = player_count * CARDS_PER_PLAYER;
    if found != expected {
        return Err(PackError::WrongCardCount { expected, found });
    }
    Ok(())
}
