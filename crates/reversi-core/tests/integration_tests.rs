//! Integration tests for the Reversi game engine.
//!
//! These tests drive complete games through the public API, from the
//! opening position until no player can move.

use pretty_assertions::assert_eq;
use reversi_core::*;
use std::collections::HashSet;

/// Play a game to the end with one bot per seat
fn play_out(game: &mut GameState, bots: &mut [Bot]) -> usize {
    let mut plies = 0;
    let max_plies = game.side() * game.side();

    while !game.done() {
        let seat = (game.turn() - 1) as usize;
        let events = bots[seat]
            .play(game)
            .expect("bot produced an illegal move")
            .expect("player to move should have a legal move");
        assert!(!events.is_empty());
        plies += 1;
        assert!(plies <= max_plies, "game should end within {} placements", max_plies);
    }

    plies
}

/// Checks every invariant that must hold between moves
fn assert_consistent(game: &GameState) {
    let n = game.num_players();
    for row in game.grid() {
        assert_eq!(row.len(), game.side());
        for cell in row.into_iter().flatten() {
            assert!((1..=n).contains(&cell), "cell owner {} out of range", cell);
        }
    }

    if !game.done() {
        assert!((1..=n).contains(&game.turn()));
        assert!(!game.available_moves().is_empty());
    }

    let moves = game.available_moves();
    let unique: HashSet<_> = moves.iter().collect();
    assert_eq!(unique.len(), moves.len(), "available moves must not repeat");
    for mv in moves {
        assert_eq!(game.piece_at(mv).unwrap(), None);
    }
}

#[test]
fn test_random_othello_game_completes() {
    let mut game = GameState::othello();
    let mut bots = [
        Bot::with_seed(BotKind::Random, 1),
        Bot::with_seed(BotKind::Random, 2),
    ];

    while !game.done() {
        assert_consistent(&game);
        let seat = (game.turn() - 1) as usize;
        bots[seat].play(&mut game).unwrap();
    }

    let outcome = game.outcome();
    assert!(!outcome.is_empty());

    let scores = game.scores();
    let best = scores.iter().map(|(_, c)| *c).max().unwrap();
    let expected: Vec<PlayerId> = scores
        .iter()
        .filter(|(_, c)| *c == best)
        .map(|(p, _)| *p)
        .collect();
    assert_eq!(outcome, expected);
}

#[test]
fn test_free_start_four_player_game() {
    let mut game = GameState::new(8, 4, Variant::FreeStart).unwrap();

    // Opening: the first 16 placements fill the centre block
    for _ in 0..16 {
        assert!(game.in_opening_phase());
        for mv in game.available_moves() {
            assert!((2..6).contains(&mv.row) && (2..6).contains(&mv.col));
        }
        let mv = game.available_moves()[0];
        game.apply_move(mv).unwrap();
    }
    assert!(!game.in_opening_phase());
    assert_eq!(game.moves_played(), 16);
    assert_eq!(game.board().occupied(), 16);

    let mut bots: Vec<Bot> = (0..4)
        .map(|i| Bot::with_seed(BotKind::Greedy, 100 + i))
        .collect();
    play_out(&mut game, &mut bots);

    assert_consistent(&game);
    assert!(game.done());
    assert!(!game.outcome().is_empty());
}

#[test]
fn test_three_player_odd_board() {
    let mut game = GameState::new(7, 3, Variant::FreeStart).unwrap();
    let mut bots: Vec<Bot> = (0..3)
        .map(|i| Bot::with_seed(BotKind::Random, 7 * i))
        .collect();

    play_out(&mut game, &mut bots);
    assert!(game.done());

    let total: usize = game.scores().iter().map(|(_, c)| *c).sum();
    assert_eq!(total, game.board().occupied());
}

#[test]
fn test_two_ply_against_random() {
    let mut game = GameState::new(6, 2, Variant::Othello).unwrap();
    let mut bots = [
        Bot::with_seed(BotKind::TwoPly, 5),
        Bot::with_seed(BotKind::Random, 6),
    ];

    play_out(&mut game, &mut bots);
    assert!(game.done());
    assert!(game.outcome().iter().all(|p| *p == 1 || *p == 2));
}

#[test]
fn test_simulation_matches_real_play() {
    let mut game = GameState::othello();
    let mut bot = Bot::with_seed(BotKind::Random, 99);

    let mut line = Vec::new();
    for _ in 0..8 {
        let mv = bot.choose_move(&game).unwrap();
        line.push(mv);
        game.apply_move(mv).unwrap();
    }

    let start = GameState::othello();
    let simulated = start.simulate_moves(&line).unwrap();

    assert_eq!(simulated.grid(), game.grid());
    assert_eq!(simulated.turn(), game.turn());
    assert_eq!(start.grid(), GameState::othello().grid());
}

#[test]
fn test_snapshot_restores_midgame() {
    let mut game = GameState::new(6, 2, Variant::FreeStart).unwrap();
    let mut bot = Bot::with_seed(BotKind::Greedy, 3);
    for _ in 0..8 {
        bot.play(&mut game).unwrap();
    }

    let json = serde_json::to_string(&game.snapshot()).unwrap();
    let snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();

    let mut restored = GameState::new(6, 2, Variant::FreeStart).unwrap();
    restored.load_snapshot(&snapshot).unwrap();

    assert_eq!(restored.grid(), game.grid());
    assert_eq!(restored.turn(), game.turn());
    assert_eq!(restored.moves_played(), game.moves_played());
    assert_eq!(restored.available_moves(), game.available_moves());
}

#[test]
fn test_errors_surface_to_caller() {
    let mut game = GameState::othello();

    assert!(matches!(
        game.apply_move(Position::new(0, 0)),
        Err(GameError::IllegalMove(_))
    ));
    assert!(matches!(
        game.piece_at(Position::new(-1, 0)),
        Err(GameError::OutOfBounds(_))
    ));
    assert!(matches!(
        GameState::new(9, 2, Variant::Othello),
        Err(GameError::Construction(ConstructionError::ParityMismatch { .. }))
    ));

    let message = GameError::IllegalMove(Position::new(1, 2)).to_string();
    assert_eq!(message, "Illegal move at (1, 2)");
}
