use noughts_engine::game::PlayerId;
use noughts_engine::score::HighScore;
use std::sync::RwLock;
use thiserror::Error;

/// Append-only store of completed-game records backing the dashboard.
///
/// The core emits one [`HighScore`] per won game; nothing ever mutates or
/// deletes a record afterwards.
#[derive(Debug, Default)]
pub struct ScoreBoard {
    scores: RwLock<Vec<HighScore>>,
}

/// Dashboard page size when the client does not ask for one.
const DEFAULT_TOP: usize = 10;

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, score: HighScore) -> Result<(), ScoreBoardError> {
        let mut scores = self
            .scores
            .write()
            .map_err(|_| ScoreBoardError::StoragePoisoned)?;
        scores.push(score);
        Ok(())
    }

    /// The leaderboard: ascending move count, then ascending duration.
    pub fn top(&self, limit: Option<usize>) -> Result<Vec<HighScore>, ScoreBoardError> {
        let scores = self
            .scores
            .read()
            .map_err(|_| ScoreBoardError::StoragePoisoned)?;
        let mut ranked: Vec<HighScore> = scores.clone();
        ranked.sort_by_key(HighScore::ranking);
        ranked.truncate(limit.unwrap_or(DEFAULT_TOP));
        Ok(ranked)
    }

    /// Every record for one player, in insertion order.
    pub fn for_player(&self, player: &PlayerId) -> Result<Vec<HighScore>, ScoreBoardError> {
        let scores = self
            .scores
            .read()
            .map_err(|_| ScoreBoardError::StoragePoisoned)?;
        Ok(scores
            .iter()
            .filter(|score| &score.player == player)
            .cloned()
            .collect())
    }

    pub fn total(&self) -> Result<usize, ScoreBoardError> {
        let scores = self
            .scores
            .read()
            .map_err(|_| ScoreBoardError::StoragePoisoned)?;
        Ok(scores.len())
    }
}

#[derive(Debug, Error)]
pub enum ScoreBoardError {
    #[error("Scoreboard storage poisoned")]
    StoragePoisoned,
}

impl crate::errors::IntoErrorResponse for ScoreBoardError {
    fn status_code(&self) -> warp::http::StatusCode {
        warp::http::StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_code(&self) -> &'static str {
        "scoreboard_storage_error"
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn severity(&self) -> crate::errors::ErrorSeverity {
        crate::errors::ErrorSeverity::Critical
    }
}
