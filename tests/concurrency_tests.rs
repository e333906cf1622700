//! Threaded play tests.
//!
//! Every player runs on its own thread. These tests check that games
//! finish, that exactly one winner is ever recorded, and that no cards are
//! created or lost along the way.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use ring_cards::game::GameSummary;
use ring_cards::{
    CardGame, EventSink, GameConfig, GameRng, MemorySink, Pack, PlayerEvent, PlayerId,
};
use tempfile::tempdir;

/// Counts win announcements and draws without keeping events around.
#[derive(Default)]
struct Tally {
    wins: AtomicUsize,
    draws: AtomicUsize,
    exits: AtomicUsize,
}

impl EventSink for Tally {
    fn record(&self, event: &PlayerEvent) {
        let counter = match event {
            PlayerEvent::Won { .. } => &self.wins,
            PlayerEvent::Drew { .. } => &self.draws,
            PlayerEvent::Exited { .. } => &self.exits,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

fn game_from(values: impl IntoIterator<Item = u32>, players: i64) -> CardGame {
    let text: String = values.into_iter().map(|v| format!("{v}\n")).collect();
    let mut game = CardGame::from_reader(text.as_bytes(), players).unwrap();
    game.setup().unwrap();
    game
}

fn assert_finished(game: &CardGame, summary: &GameSummary) {
    let n = game.player_count();
    let winner = summary.winner.expect("winner recorded");

    assert_eq!(summary.total_cards(), 8 * n);
    assert!(game.player(winner).has_winning_hand());
    for player in game.players() {
        assert_eq!(player.hand().len(), 4);
    }
}

/// Player 1 is dealt four of a kind and wins before anyone draws.
#[test]
fn test_player_one_wins_immediately() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/res/2_pl1wins.txt");
    let mut game = CardGame::new(2, path).unwrap();
    game.setup().unwrap();

    let tally = Tally::default();
    let winner = game.run_with(&tally).unwrap();

    assert_eq!(winner, PlayerId::new(0));
    assert_eq!(game.winner().map(|p| p.id()), Some(PlayerId::new(0)));
    assert_eq!(tally.wins.load(Ordering::Relaxed), 1);
    assert_eq!(tally.draws.load(Ordering::Relaxed), 0);
    assert_eq!(tally.exits.load(Ordering::Relaxed), 2);
}

/// A pack where only player 1 can ever win, after exactly four draws.
///
/// Player 1 holds `1 1 3 4` and deck 1 starts `5 1 6 1`. Nobody else can
/// collect four of anything, and player 2 only ever appends behind those
/// four cards, so the outcome does not depend on thread timing.
#[test]
fn test_scripted_win_after_four_cycles() {
    let pack = [
        1, 1, 3, 4, // player 1 hand
        2, 2, 3, 4, // player 2 hand
        5, 1, 6, 1, // deck 1
        7, 8, 9, 9, // deck 2
    ];
    let mut game = game_from(pack, 2);

    let sink = MemorySink::new();
    let winner = game.run_with(&sink).unwrap();
    assert_eq!(winner, PlayerId::new(0));

    let p0 = PlayerId::new(0);
    let discards: Vec<u32> = sink
        .for_player(p0)
        .iter()
        .filter_map(|e| match e {
            PlayerEvent::Discarded { card, .. } => Some(card.value()),
            _ => None,
        })
        .collect();
    assert_eq!(discards, vec![5, 4, 6, 3]);
    assert_eq!(game.player(p0).hand().to_string(), "1 1 1 1");

    let events = sink.for_player(p0);
    assert!(events.contains(&PlayerEvent::Won { player: p0 }));
    assert!(sink
        .for_player(PlayerId::new(1))
        .contains(&PlayerEvent::Informed { player: PlayerId::new(1), winner: p0 }));
    assert_finished(&game, &game.summary());
}

/// Every player completes four of a kind on its first draw; exactly one
/// claim succeeds.
#[test]
fn test_simultaneous_wins_have_one_winner() {
    for players in [2u32, 3, 8, 16] {
        for _ in 0..10 {
            let mut pack = Vec::new();
            for p in 1..=players {
                pack.extend([p, p, p, 0]);
            }
            for p in 1..=players {
                pack.extend([p, 0, 0, 0]);
            }
            let mut game = game_from(pack, players as i64);

            let tally = Tally::default();
            let winner = game.run_with(&tally).unwrap();

            assert_eq!(tally.wins.load(Ordering::Relaxed), 1);
            assert_eq!(tally.exits.load(Ordering::Relaxed), players as usize);
            assert_eq!(game.winner_id(), Some(winner));
            assert_finished(&game, &game.summary());
        }
    }
}

/// Games of 1 to 100 players always finish with a single winner.
#[test]
fn test_games_of_every_size_finish() {
    let mut rng = GameRng::new(7);

    for players in 1..=100usize {
        let pack = Pack::generate(players, &mut rng.fork()).unwrap();
        let mut game = CardGame::from_pack(pack);
        game.setup().unwrap();

        let tally = Tally::default();
        let winner = game.run_with(&tally).unwrap();

        assert_eq!(tally.wins.load(Ordering::Relaxed), 1, "{players} players");
        assert_eq!(tally.exits.load(Ordering::Relaxed), players);
        assert_eq!(game.winner_id(), Some(winner));
        assert_finished(&game, &game.summary());
    }
}

/// A finished game keeps its winner.
#[test]
fn test_run_again_returns_same_winner() {
    let mut rng = GameRng::new(99);
    let mut game = CardGame::from_pack(Pack::generate(6, &mut rng).unwrap());
    game.setup().unwrap();

    let first = game.run_with(&Tally::default()).unwrap();
    let before = game.summary();

    let tally = Tally::default();
    assert_eq!(game.run_with(&tally).unwrap(), first);
    assert_eq!(tally.draws.load(Ordering::Relaxed), 0);
    assert_eq!(game.summary(), before);
}

/// `run` with an output directory writes one file per player and deck.
#[test]
fn test_output_files() {
    let dir = tempdir().expect("temp dir");
    let pack_path = dir.path().join("3.txt");
    Pack::generate(3, &mut GameRng::new(5)).unwrap().save(&pack_path).unwrap();

    let out = dir.path().join("out");
    let config = GameConfig::new(3).with_pack_path(&pack_path).with_output_dir(&out);
    let mut game = CardGame::from_config(&config).unwrap();
    game.setup().unwrap();
    let winner = game.run().unwrap();

    for id in PlayerId::all(3) {
        let text = fs::read_to_string(out.join(format!("player{}_output.txt", id.number()))).unwrap();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with(&format!("{id} initial hand ")), "{first}");
        assert!(text.contains(&format!("{id} exits")));
        if id == winner {
            assert!(text.contains(&format!("{id} wins")));
        } else {
            assert!(text.contains(&format!("{winner} has informed {id} that {winner} has won")));
        }
    }
    for deck in 1..=3 {
        let text = fs::read_to_string(out.join(format!("deck{deck}_output.txt"))).unwrap();
        assert!(text.starts_with(&format!("deck{deck} contents:")));
    }
}

/// The final summary survives a JSON round trip.
#[test]
fn test_summary_json() {
    let mut game = game_from([1, 1, 1, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13], 2);
    game.run_with(&Tally::default()).unwrap();

    let summary = game.summary();
    let json = serde_json::to_string(&summary).unwrap();
    let parsed: GameSummary = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, summary);
    assert_eq!(parsed.winner, Some(PlayerId::new(0)));
}
