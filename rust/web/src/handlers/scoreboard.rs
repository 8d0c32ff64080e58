use crate::errors::IntoErrorResponse;
use crate::handlers::game::success_response;
use crate::scoreboard::ScoreBoard;
use serde::Deserialize;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// GET /api/dashboard?limit=N — the leaderboard read: high scores ordered by
/// ascending move count, then ascending duration, top 10 unless a limit is
/// given. A plain passthrough; nothing here recomputes scores.
pub async fn dashboard(scoreboard: Arc<ScoreBoard>, query: DashboardQuery) -> Response {
    match scoreboard.top(query.limit) {
        Ok(scores) => success_response(StatusCode::OK, scores),
        Err(err) => err.into_http_response(),
    }
}
