//! Single-step gameplay tests.
//!
//! These drive one player at a time through the non-blocking API, so the
//! effect of every draw and discard can be checked exactly.

use proptest::prelude::*;
use ring_cards::{Card, CardGame, DeckId, GameRng, Hand, Pack, PlayerId, TurnOutcome};
use tempfile::tempdir;

fn game_from(values: impl IntoIterator<Item = u32>, players: i64) -> CardGame {
    let text: String = values.into_iter().map(|v| format!("{v}\n")).collect();
    let mut game = CardGame::from_reader(text.as_bytes(), players).unwrap();
    game.setup().unwrap();
    game
}

fn four_player_game() -> CardGame {
    let mut rng = GameRng::new(2024);
    let mut game = CardGame::from_pack(Pack::generate(4, &mut rng).unwrap());
    game.setup().unwrap();
    game
}

/// Drawing moves the front of the player's own deck into the hand.
#[test]
fn test_draw_card() {
    let mut game = four_player_game();

    for id in PlayerId::all(4) {
        let front = game.deck(id.draw_deck()).contents()[0];
        let drawn = game.draw_card(id).unwrap();

        assert_eq!(drawn, Some(front));
        assert_eq!(game.player(id).hand().len(), 5);
        assert_eq!(game.deck(id.draw_deck()).len(), 3);
    }
}

/// Discarding feeds the next deck in the ring; the last player wraps to deck 0.
#[test]
fn test_discard_card() {
    let mut game = four_player_game();

    for id in PlayerId::all(4) {
        let given = game.discard_card(id).unwrap().unwrap();
        assert_eq!(game.player(id).hand().len(), 3);

        let target = if id.index() + 1 == 4 { DeckId::new(0) } else { DeckId::new(id.0 + 1) };
        let deck = game.deck(target).contents();
        assert_eq!(deck.len(), 5);
        assert_eq!(deck.last(), Some(&given));
    }
}

/// The chosen discard is never the player's preferred value.
#[test]
fn test_card_to_discard_is_not_preferred() {
    // Every hand holds one preferred card and three others.
    let mut pack = Vec::new();
    for pref in 1..=3 {
        pack.extend([pref, 10 + pref, 20 + pref, 30 + pref]);
    }
    pack.extend(40..52);
    let game = game_from(pack, 3);

    for player in game.players() {
        let card = game.card_to_discard(player.id()).unwrap().unwrap();
        assert_ne!(card.value(), player.preference());
        assert_eq!(card.value(), 30 + player.preference());
    }
}

/// A forced four of a kind is a win; the dealt hand is not.
#[test]
fn test_check_win() {
    let mut game = four_player_game();
    let p0 = PlayerId::new(0);

    game.player_mut(p0).set_winning_hand();
    assert!(game.check_win(p0));
    assert_eq!(game.player(p0).hand().cards(), &[Card::new(1); 4]);

    let mixed = game_from([1, 2, 1, 1, 5, 6, 7, 8], 1);
    assert!(!mixed.check_win(p0));
}

/// One full cycle: hand back to four, draw deck -1, discard deck +1.
#[test]
fn test_one_cycle_sizes() {
    // All values distinct: nobody can win.
    let mut game = game_from(10..34, 3);
    let p1 = PlayerId::new(1);
    let draw = game.player(p1).draw_deck();
    let discard = game.player(p1).discard_deck();

    assert_eq!(game.play_turn(p1).unwrap(), TurnOutcome::Continue);

    assert_eq!(game.player(p1).hand().len(), 4);
    assert_eq!(game.deck(draw).len(), 3);
    assert_eq!(game.deck(discard).len(), 5);
    assert_eq!(game.deck(DeckId::new(0)).len(), 4);
    assert_eq!(game.total_cards(), 24);
}

/// An empty draw deck blocks without changing anything.
#[test]
fn test_blocked_turn() {
    let mut game = game_from(10..34, 3);
    let p0 = PlayerId::new(0);
    for _ in 0..4 {
        assert_eq!(game.play_turn(p0).unwrap(), TurnOutcome::Continue);
    }

    let before = game.summary();
    assert_eq!(game.play_turn(p0).unwrap(), TurnOutcome::Blocked);
    assert_eq!(game.summary(), before);
}

/// Cards are conserved at every cycle boundary of a stepped game, and
/// the game ends with exactly one winner.
#[test]
fn test_stepped_game_conserves_cards() {
    let mut game = four_player_game();
    let mut winner = None;

    'rounds: for _ in 0..10_000 {
        for id in PlayerId::all(4) {
            match game.play_turn(id).unwrap() {
                TurnOutcome::Won => {
                    winner = Some(id);
                    break 'rounds;
                }
                TurnOutcome::GameOver => unreachable!("nobody else can have won"),
                TurnOutcome::Blocked | TurnOutcome::Continue => {}
            }
            assert_eq!(game.total_cards(), 32);
            assert!(game.players().iter().all(|p| p.hand().len() == 4));
        }
    }

    let winner = winner.expect("stepped game should finish");
    assert_eq!(game.winner_id(), Some(winner));
    assert!(game.player(winner).has_winning_hand());
    assert_eq!(game.total_cards(), 32);

    // Nobody moves once the game is over.
    for id in PlayerId::all(4) {
        assert_eq!(game.play_turn(id).unwrap(), TurnOutcome::GameOver);
    }
}

/// Stepped play logs through `tracing` only; output files appear when the
/// game is run.
#[test]
fn test_stepping_writes_no_output_files() {
    let dir = tempdir().expect("temp dir");
    let out = dir.path().join("out");

    let mut rng = GameRng::new(11);
    let mut game = CardGame::from_pack(Pack::generate(3, &mut rng).unwrap()).with_output_dir(&out);
    game.setup().unwrap();

    for id in PlayerId::all(3) {
        game.play_turn(id).unwrap();
    }
    assert!(!out.exists());

    let winner = game.run().unwrap();
    assert!(out.join("player1_output.txt").exists());
    assert!(game.player(winner).has_winning_hand());
}

proptest! {
    /// With a non-preferred card available, the discard is never preferred,
    /// and it is the highest such card.
    #[test]
    fn prop_discard_keeps_preferred(
        values in prop::collection::vec(0u32..8, 5),
        preference in 0u32..8,
    ) {
        let hand = Hand::from_cards(values.iter().copied().map(Card::new));
        let others: Vec<u32> = values.iter().copied().filter(|&v| v != preference).collect();

        match hand.discard_index(preference) {
            Ok(i) => {
                let chosen = hand.cards()[i].value();
                prop_assert_ne!(chosen, preference);
                prop_assert_eq!(Some(chosen), others.iter().copied().max());
            }
            Err(_) => prop_assert!(others.is_empty()),
        }
    }

    /// Four cards win exactly when they all share a value.
    #[test]
    fn prop_win_detection(values in prop::collection::vec(0u32..4, 4)) {
        let hand = Hand::from_cards(values.iter().copied().map(Card::new));
        let all_same = values.iter().all(|&v| v == values[0]);
        prop_assert_eq!(hand.is_winning(), all_same);
    }
}
