use crate::board::winning_combinations;
use crate::errors::{ConfigError, MoveError};
use crate::ledger::MoveLedger;
use crate::rules;
use crate::score::HighScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Opaque identity of a registered player. Assigned by whoever authenticates
/// requests; the engine only compares and stores it.
pub type PlayerId = String;

/// What a legal move did to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Play continues; the turn has rotated to `next_player`.
    InProgress { next_player: PlayerId },
    /// The mover completed `combination`. The game is over and `score` must
    /// be recorded by the caller — it is produced exactly once.
    Won {
        combination: Vec<usize>,
        score: HighScore,
    },
    /// Every cell is claimed with no winner. No score is recorded for ties.
    Tied,
}

/// Aggregate root for one game: participants, frozen geometry, the move
/// ledger, the turn pointer, and the outcome flags.
///
/// All mutation goes through [`Game::submit_move`]; everything else is a
/// read. The struct serializes to the full persisted state layout, so a
/// store can round-trip it without a separate record type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    board_size: usize,
    max_players: usize,
    /// Creation order; fixed for the whole game and defines turn rotation.
    participants: Vec<PlayerId>,
    /// Computed once by [`winning_combinations`] at creation, never again.
    winning_combinations: Vec<Vec<usize>>,
    ledger: MoveLedger,
    /// Index into `participants`, so the current player is a participant by
    /// construction.
    current_player: usize,
    is_done: bool,
    has_winner: bool,
    winner_combination: Option<Vec<usize>>,
    created_at: DateTime<Utc>,
}

impl Game {
    /// Creates a game for `participants` on a `board_size`×`board_size`
    /// board, capped at `max_players` seats.
    ///
    /// The first participant moves first. Participant *existence* is the
    /// identity collaborator's check; this constructor validates shape only.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] for a board smaller than 2, fewer than 2 participants,
    /// more participants than `max_players`, or a duplicate participant.
    pub fn new(
        participants: Vec<PlayerId>,
        board_size: usize,
        max_players: usize,
    ) -> Result<Self, ConfigError> {
        if board_size < 2 {
            return Err(ConfigError::BoardTooSmall { board_size });
        }
        if participants.len() < 2 {
            return Err(ConfigError::NotEnoughParticipants {
                count: participants.len(),
            });
        }
        if participants.len() > max_players {
            return Err(ConfigError::TooManyParticipants {
                count: participants.len(),
                max_players,
            });
        }
        let mut seen = HashSet::new();
        for player in &participants {
            if !seen.insert(player) {
                return Err(ConfigError::DuplicateParticipant {
                    player: player.clone(),
                });
            }
        }

        let cells = board_size * board_size;
        Ok(Self {
            board_size,
            max_players,
            winning_combinations: winning_combinations(board_size),
            ledger: MoveLedger::new(cells, &participants),
            participants,
            current_player: 0,
            is_done: false,
            has_winner: false,
            winner_combination: None,
            created_at: Utc::now(),
        })
    }

    /// Validates and applies one move by `player` on `cell`.
    ///
    /// The whole precondition-check-and-apply sequence must run under one
    /// exclusive lock per game (the caller's job): two concurrent submissions
    /// may otherwise both pass the unclaimed-cell check.
    ///
    /// Precondition order, each with its own [`MoveError`]: the game is not
    /// over, it is `player`'s turn, `cell` is on the board, `cell` is
    /// unclaimed. A failed precondition leaves the game untouched.
    pub fn submit_move(
        &mut self,
        player: &PlayerId,
        cell: usize,
    ) -> Result<MoveOutcome, MoveError> {
        if self.is_done {
            return Err(MoveError::GameOver);
        }
        if *player != self.participants[self.current_player] {
            return Err(MoveError::NotYourTurn {
                player: player.clone(),
            });
        }
        self.ledger.record(player, cell)?;

        let won = rules::winning_combination(&self.winning_combinations, self.ledger.cells_for(player))
            .map(<[usize]>::to_vec);
        if let Some(combination) = won {
            self.is_done = true;
            self.has_winner = true;
            self.winner_combination = Some(combination.clone());
            let score = HighScore::for_win(
                player.clone(),
                self.created_at,
                self.ledger.count_for(player),
            );
            return Ok(MoveOutcome::Won { combination, score });
        }

        if rules::is_tied(&self.ledger.all_claimed(), self.cell_count()) {
            self.is_done = true;
            return Ok(MoveOutcome::Tied);
        }

        self.current_player = (self.current_player + 1) % self.participants.len();
        Ok(MoveOutcome::InProgress {
            next_player: self.participants[self.current_player].clone(),
        })
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Total number of cells, `board_size²`.
    pub fn cell_count(&self) -> usize {
        self.board_size * self.board_size
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    pub fn participants(&self) -> &[PlayerId] {
        &self.participants
    }

    pub fn winning_combinations(&self) -> &[Vec<usize>] {
        &self.winning_combinations
    }

    pub fn ledger(&self) -> &MoveLedger {
        &self.ledger
    }

    /// Whose turn it is, or `None` once the game is over.
    pub fn current_player(&self) -> Option<&PlayerId> {
        if self.is_done {
            None
        } else {
            Some(&self.participants[self.current_player])
        }
    }

    pub fn is_done(&self) -> bool {
        self.is_done
    }

    pub fn has_winner(&self) -> bool {
        self.has_winner
    }

    pub fn winner_combination(&self) -> Option<&[usize]> {
        self.winner_combination.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_players() -> Vec<PlayerId> {
        vec!["alice".to_string(), "bob".to_string()]
    }

    #[test]
    fn new_game_starts_with_the_first_participant() {
        let game = Game::new(two_players(), 3, 2).expect("create game");
        assert_eq!(game.current_player(), Some(&"alice".to_string()));
        assert!(!game.is_done());
        assert!(!game.has_winner());
        assert_eq!(game.winner_combination(), None);
        assert_eq!(game.winning_combinations().len(), 8);
    }

    #[test]
    fn configuration_shape_is_validated() {
        assert_eq!(
            Game::new(vec!["solo".into()], 3, 2),
            Err(ConfigError::NotEnoughParticipants { count: 1 })
        );
        assert_eq!(
            Game::new(two_players(), 3, 1),
            Err(ConfigError::TooManyParticipants {
                count: 2,
                max_players: 1
            })
        );
        assert_eq!(
            Game::new(vec!["alice".into(), "alice".into()], 3, 2),
            Err(ConfigError::DuplicateParticipant {
                player: "alice".into()
            })
        );
        assert_eq!(
            Game::new(two_players(), 1, 2),
            Err(ConfigError::BoardTooSmall { board_size: 1 })
        );
    }

    #[test]
    fn turn_rotates_round_robin_after_each_move() {
        let players: Vec<PlayerId> = vec!["a".into(), "b".into(), "c".into()];
        let mut game = Game::new(players.clone(), 4, 3).expect("create game");
        for (turn, cell) in [5, 6, 7, 9, 10].iter().enumerate() {
            let mover = players[turn % 3].clone();
            assert_eq!(game.current_player(), Some(&mover));
            let outcome = game.submit_move(&mover, *cell).expect("legal move");
            match outcome {
                MoveOutcome::InProgress { next_player } => {
                    assert_eq!(next_player, players[(turn + 1) % 3]);
                }
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
    }

    #[test]
    fn serialized_form_round_trips() {
        let mut game = Game::new(two_players(), 3, 2).expect("create game");
        game.submit_move(&"alice".to_string(), 4).expect("move");

        let json = serde_json::to_string(&game).expect("serialize");
        let restored: Game = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, game);
    }
}
