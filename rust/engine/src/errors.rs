use thiserror::Error;

/// Rejection reasons for a game created with an unusable configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("A game needs at least 2 participants, got {count}")]
    NotEnoughParticipants { count: usize },
    #[error("Participant count {count} exceeds the player limit {max_players}")]
    TooManyParticipants { count: usize, max_players: usize },
    #[error("Participant {player} is listed more than once")]
    DuplicateParticipant { player: String },
    #[error("Board size must be at least 2, got {board_size}")]
    BoardTooSmall { board_size: usize },
}

/// Rejection reasons for a submitted move. Every variant is a recoverable,
/// user-facing validation failure; the engine never panics on bad input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("The game is already over")]
    GameOver,
    #[error("It is not player {player}'s turn")]
    NotYourTurn { player: String },
    #[error("Cell {cell} has already been claimed")]
    AlreadyClaimed { cell: usize },
    #[error("Cell {cell} is outside the board (valid cells are 0..{cells})")]
    OutOfRange { cell: usize, cells: usize },
}
