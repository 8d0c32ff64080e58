use crate::players::PlayerRegistry;
use crate::scoreboard::ScoreBoard;
use noughts_engine::errors::{ConfigError, MoveError};
use noughts_engine::game::{Game, MoveOutcome, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;
use uuid::Uuid;

pub type SessionId = String;

/// Registry of live games. One instance per process; the sole shared mutable
/// resource between requests.
///
/// Each game sits behind its own `Mutex`, so a move submission runs the
/// whole precondition-check-and-apply sequence as one critical section per
/// session: two racing submissions can never both pass the unclaimed-cell
/// check, and `current_player` is never read stale. Distinct games share
/// nothing and proceed concurrently.
#[derive(Debug)]
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, Arc<GameSession>>>,
    registry: Arc<PlayerRegistry>,
    scoreboard: Arc<ScoreBoard>,
}

impl SessionManager {
    pub fn new(registry: Arc<PlayerRegistry>, scoreboard: Arc<ScoreBoard>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            registry,
            scoreboard,
        }
    }

    /// Creates a game after checking every participant against the player
    /// registry; the engine validates the configuration shape itself.
    pub fn create_game(&self, config: GameConfig) -> Result<SessionId, SessionError> {
        for participant in &config.participants {
            if !self.registry.contains(participant) {
                return Err(SessionError::UnknownParticipant(participant.clone()));
            }
        }

        let game = Game::new(config.participants, config.board_size, config.max_players)?;
        let id = Uuid::new_v4().to_string();

        tracing::info!(
            session_id = %id,
            board_size = game.board_size(),
            participants = game.participants().len(),
            "creating new game"
        );

        let session = Arc::new(GameSession::new(id.clone(), game));
        let mut guard = self
            .sessions
            .write()
            .map_err(|_| SessionError::StoragePoisoned)?;
        guard.insert(id.clone(), session);

        Ok(id)
    }

    pub fn get_session(&self, id: &SessionId) -> Result<Arc<GameSession>, SessionError> {
        let guard = self
            .sessions
            .read()
            .map_err(|_| SessionError::StoragePoisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.clone()))
    }

    /// Full representation of one game, the view clients poll for state
    /// changes.
    pub fn state(&self, session_id: &SessionId) -> Result<GameStateResponse, SessionError> {
        let session = self.get_session(session_id)?;
        session.state_snapshot()
    }

    /// Validates and applies one move by `principal`, the authenticated
    /// caller — never an identity taken from the request body.
    ///
    /// Holds the session's game lock across checks, application, and outcome
    /// evaluation. A winning move pushes exactly one high score onto the
    /// scoreboard; a tie pushes nothing.
    pub fn submit_move(
        &self,
        session_id: &SessionId,
        principal: &PlayerId,
        cell: usize,
    ) -> Result<GameStateResponse, SessionError> {
        let session = self.get_session(session_id)?;

        tracing::debug!(
            session_id = %session_id,
            player = %principal,
            cell = cell,
            "processing move"
        );

        let mut game = session.game.lock().map_err(|_| SessionError::StoragePoisoned)?;
        let outcome = game.submit_move(principal, cell)?;
        let state = GameStateResponse::from_game(session_id.clone(), &game);
        drop(game);

        match outcome {
            MoveOutcome::Won { score, combination } => {
                tracing::info!(
                    session_id = %session_id,
                    winner = %principal,
                    combination = ?combination,
                    moves = score.moves_count,
                    "game won"
                );
                self.scoreboard
                    .add(score)
                    .map_err(|_| SessionError::StoragePoisoned)?;
            }
            MoveOutcome::Tied => {
                tracing::info!(session_id = %session_id, "game tied, no high score");
            }
            MoveOutcome::InProgress { next_player } => {
                tracing::debug!(session_id = %session_id, next_player = %next_player, "turn rotated");
            }
        }

        Ok(state)
    }

    /// Removes a game. Plain resource deletion; nothing in the core calls
    /// this.
    pub fn delete_game(&self, session_id: &SessionId) -> Result<(), SessionError> {
        let removed = match self.sessions.write() {
            Ok(mut guard) => guard.remove(session_id),
            Err(_) => return Err(SessionError::StoragePoisoned),
        };
        match removed {
            Some(_) => {
                tracing::info!(session_id = %session_id, "game deleted");
                Ok(())
            }
            None => Err(SessionError::NotFound(session_id.clone())),
        }
    }

    pub fn active_games(&self) -> Vec<SessionId> {
        match self.sessions.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// One live game behind its per-session lock.
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    game: Mutex<Game>,
}

impl GameSession {
    fn new(id: SessionId, game: Game) -> Self {
        Self {
            id,
            game: Mutex::new(game),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state_snapshot(&self) -> Result<GameStateResponse, SessionError> {
        let game = self.game.lock().map_err(|_| SessionError::StoragePoisoned)?;
        Ok(GameStateResponse::from_game(self.id.clone(), &game))
    }
}

/// Requested game configuration, as supplied by the create endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub max_players: usize,
    pub participants: Vec<PlayerId>,
}

impl GameConfig {
    /// The classic setup: 3×3 board, two seats.
    pub fn standard(participants: Vec<PlayerId>) -> Self {
        Self {
            board_size: 3,
            max_players: 2,
            participants,
        }
    }
}

/// Everything a client needs to render the board: the server never stores a
/// literal grid, only the geometry and the per-player ledgers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateResponse {
    pub session_id: SessionId,
    pub board_size: usize,
    pub max_players: usize,
    pub participants: Vec<PlayerId>,
    pub winning_combinations: Vec<Vec<usize>>,
    pub ledger: HashMap<PlayerId, Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_player: Option<PlayerId>,
    pub is_done: bool,
    pub has_winner: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_combination: Option<Vec<usize>>,
    pub created_at: String,
}

impl GameStateResponse {
    fn from_game(session_id: SessionId, game: &Game) -> Self {
        Self {
            session_id,
            board_size: game.board_size(),
            max_players: game.max_players(),
            participants: game.participants().to_vec(),
            winning_combinations: game.winning_combinations().to_vec(),
            ledger: game.ledger().entries().clone(),
            current_player: game.current_player().cloned(),
            is_done: game.is_done(),
            has_winner: game.has_winner(),
            winner_combination: game.winner_combination().map(<[usize]>::to_vec),
            created_at: game.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Game not found: {0}")]
    NotFound(SessionId),
    #[error("Invalid move: {0}")]
    InvalidMove(#[from] MoveError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Participant {0} is not a registered player")]
    UnknownParticipant(PlayerId),
    #[error("Session storage poisoned")]
    StoragePoisoned,
}

impl crate::errors::IntoErrorResponse for SessionError {
    fn status_code(&self) -> warp::http::StatusCode {
        use warp::http::StatusCode;
        match self {
            SessionError::NotFound(_) => StatusCode::NOT_FOUND,
            SessionError::InvalidMove(_) => StatusCode::BAD_REQUEST,
            SessionError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
            SessionError::UnknownParticipant(_) => StatusCode::BAD_REQUEST,
            SessionError::StoragePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SessionError::NotFound(_) => "game_not_found",
            SessionError::InvalidMove(MoveError::GameOver) => "game_over",
            SessionError::InvalidMove(MoveError::NotYourTurn { .. }) => "not_your_turn",
            SessionError::InvalidMove(MoveError::AlreadyClaimed { .. }) => "already_claimed",
            SessionError::InvalidMove(MoveError::OutOfRange { .. }) => "out_of_range",
            SessionError::InvalidConfig(_) => "invalid_configuration",
            SessionError::UnknownParticipant(_) => "unknown_participant",
            SessionError::StoragePoisoned => "session_storage_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            SessionError::NotFound(id) => Some(serde_json::json!({ "session_id": id })),
            SessionError::InvalidMove(MoveError::AlreadyClaimed { cell }) => {
                Some(serde_json::json!({ "cell": cell }))
            }
            SessionError::InvalidMove(MoveError::OutOfRange { cell, cells }) => {
                Some(serde_json::json!({ "cell": cell, "cells": cells }))
            }
            SessionError::UnknownParticipant(player) => {
                Some(serde_json::json!({ "player_id": player }))
            }
            _ => None,
        }
    }

    fn severity(&self) -> crate::errors::ErrorSeverity {
        use crate::errors::ErrorSeverity;
        match self {
            SessionError::StoragePoisoned => ErrorSeverity::Critical,
            _ => ErrorSeverity::Client,
        }
    }
}
