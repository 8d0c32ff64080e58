use noughts_engine::errors::{ConfigError, MoveError};
use noughts_engine::game::{Game, MoveOutcome, PlayerId};

fn alice() -> PlayerId {
    "alice".to_string()
}

fn bob() -> PlayerId {
    "bob".to_string()
}

fn fresh_game() -> Game {
    Game::new(vec![alice(), bob()], 3, 2).expect("valid configuration")
}

#[test]
fn rejects_a_move_out_of_turn_without_mutating() {
    let mut game = fresh_game();
    assert_eq!(
        game.submit_move(&bob(), 0),
        Err(MoveError::NotYourTurn { player: bob() })
    );
    assert_eq!(game.ledger().count_for(&bob()), 0);
    assert_eq!(game.current_player(), Some(&alice()));
}

#[test]
fn rejects_cells_off_the_board() {
    let mut game = fresh_game();
    assert_eq!(
        game.submit_move(&alice(), 9),
        Err(MoveError::OutOfRange { cell: 9, cells: 9 })
    );
    assert_eq!(
        game.submit_move(&alice(), usize::MAX),
        Err(MoveError::OutOfRange {
            cell: usize::MAX,
            cells: 9
        })
    );
}

#[test]
fn rejects_an_already_claimed_cell_for_either_player() {
    let mut game = fresh_game();
    game.submit_move(&alice(), 4).expect("legal move");

    // Bob hits Alice's cell, then Bob's own retry of a fresh cell succeeds.
    assert_eq!(
        game.submit_move(&bob(), 4),
        Err(MoveError::AlreadyClaimed { cell: 4 })
    );
    // The failed attempt did not consume Bob's turn.
    assert_eq!(game.current_player(), Some(&bob()));
    game.submit_move(&bob(), 5).expect("legal move");

    // Alice re-submitting her own cell is rejected the same way.
    assert_eq!(
        game.submit_move(&alice(), 4),
        Err(MoveError::AlreadyClaimed { cell: 4 })
    );
    assert_eq!(
        game.submit_move(&alice(), 5),
        Err(MoveError::AlreadyClaimed { cell: 5 })
    );
}

#[test]
fn finished_games_lock_out_every_further_move() {
    let mut game = fresh_game();
    for (player, cell) in [
        (alice(), 0),
        (bob(), 4),
        (alice(), 1),
        (bob(), 5),
        (alice(), 2),
    ] {
        game.submit_move(&player, cell).expect("legal move");
    }
    assert!(game.is_done());
    assert_eq!(game.current_player(), None);

    let before = game.ledger().all_claimed();
    assert_eq!(game.submit_move(&bob(), 8), Err(MoveError::GameOver));
    assert_eq!(game.submit_move(&alice(), 8), Err(MoveError::GameOver));
    assert_eq!(game.ledger().all_claimed(), before);
}

#[test]
fn configuration_errors_name_their_reason() {
    assert!(matches!(
        Game::new(vec![alice()], 3, 2),
        Err(ConfigError::NotEnoughParticipants { count: 1 })
    ));
    assert!(matches!(
        Game::new(vec![alice(), bob(), "carol".into()], 3, 2),
        Err(ConfigError::TooManyParticipants {
            count: 3,
            max_players: 2
        })
    ));
    assert!(matches!(
        Game::new(vec![alice(), alice()], 3, 2),
        Err(ConfigError::DuplicateParticipant { .. })
    ));
    assert!(matches!(
        Game::new(vec![alice(), bob()], 0, 2),
        Err(ConfigError::BoardTooSmall { board_size: 0 })
    ));
}

#[test]
fn failed_preconditions_keep_turn_and_ledger_intact() {
    let mut game = fresh_game();
    game.submit_move(&alice(), 0).expect("legal move");

    let ledger_before = game.ledger().clone();
    let _ = game.submit_move(&alice(), 1); // not alice's turn any more
    let _ = game.submit_move(&bob(), 0); // claimed
    let _ = game.submit_move(&bob(), 99); // off the board
    assert_eq!(game.ledger(), &ledger_before);
    assert_eq!(game.current_player(), Some(&bob()));

    match game.submit_move(&bob(), 1).expect("legal move") {
        MoveOutcome::InProgress { next_player } => assert_eq!(next_player, alice()),
        other => panic!("unexpected outcome: {other:?}"),
    }
}
