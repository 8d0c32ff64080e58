use crate::game::PlayerId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of a won game, created exactly once when the winning
/// move lands. Ties produce no record.
///
/// The leaderboard orders records by ascending `moves_count`, then ascending
/// `duration_ms` — fewer moves beats a faster clock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighScore {
    /// The winning player.
    pub player: PlayerId,
    /// Elapsed time between game creation and the winning move.
    pub duration_ms: i64,
    /// Number of moves the winner made.
    pub moves_count: usize,
    /// Completion timestamp (RFC3339).
    pub date: String,
}

impl HighScore {
    /// Builds the record for a win that just happened.
    pub fn for_win(player: PlayerId, created_at: DateTime<Utc>, moves_count: usize) -> Self {
        let now = Utc::now();
        let duration_ms = (now - created_at).num_milliseconds().max(0);
        Self {
            player,
            duration_ms,
            moves_count,
            date: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// Sort key implementing the leaderboard ordering.
    pub fn ranking(&self) -> (usize, i64) {
        (self.moves_count, self.duration_ms)
    }
}
