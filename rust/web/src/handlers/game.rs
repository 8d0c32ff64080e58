use crate::errors::IntoErrorResponse;
use crate::players::PlayerRegistry;
use crate::session::{GameConfig, SessionId, SessionManager};
use noughts_engine::game::PlayerId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::{self, StatusCode};
use warp::reply::{self, Response};
use warp::Reply;

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub board_size: Option<usize>,
    pub max_players: Option<usize>,
    pub participants: Vec<PlayerId>,
}

impl CreateGameRequest {
    fn into_config(self) -> GameConfig {
        let mut config = GameConfig::standard(self.participants);
        if let Some(board_size) = self.board_size {
            config.board_size = board_size;
        }
        if let Some(max_players) = self.max_players {
            config.max_players = max_players;
        }
        config
    }
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub cell: usize,
}

/// POST /api/games — creates a game for registered participants.
///
/// The caller must be authenticated; the participant list comes from the
/// body and is checked against the registry. Returns 201 with the full game
/// representation, or 400 with `invalid_configuration` /
/// `unknown_participant`.
pub async fn create_game(
    registry: Arc<PlayerRegistry>,
    sessions: Arc<SessionManager>,
    auth: Option<String>,
    request: CreateGameRequest,
) -> Response {
    let _principal = match registry.principal_from_header(auth.as_deref()) {
        Ok(principal) => principal,
        Err(err) => return err.into_http_response(),
    };

    match sessions
        .create_game(request.into_config())
        .and_then(|id| sessions.state(&id))
    {
        Ok(state) => success_response(StatusCode::CREATED, state),
        Err(err) => err.into_http_response(),
    }
}

/// GET /api/games/{id} — the full representation clients poll: per-player
/// ledger, turn pointer, outcome flags, geometry.
pub async fn get_game(
    registry: Arc<PlayerRegistry>,
    sessions: Arc<SessionManager>,
    auth: Option<String>,
    session_id: SessionId,
) -> Response {
    if let Err(err) = registry.principal_from_header(auth.as_deref()) {
        return err.into_http_response();
    }

    match sessions.state(&session_id) {
        Ok(state) => success_response(StatusCode::OK, state),
        Err(err) => err.into_http_response(),
    }
}

/// POST /api/games/{id}/moves — submits one move for the authenticated
/// caller.
///
/// The acting player is the bearer of the token, never a body field. Returns
/// 200 with the updated representation, or 400 carrying one of the four
/// rejection codes (`game_over`, `not_your_turn`, `already_claimed`,
/// `out_of_range`).
pub async fn submit_move(
    registry: Arc<PlayerRegistry>,
    sessions: Arc<SessionManager>,
    auth: Option<String>,
    session_id: SessionId,
    request: MoveRequest,
) -> Response {
    let principal = match registry.principal_from_header(auth.as_deref()) {
        Ok(principal) => principal,
        Err(err) => return err.into_http_response(),
    };

    match sessions.submit_move(&session_id, &principal, request.cell) {
        Ok(state) => success_response(StatusCode::OK, state),
        Err(err) => err.into_http_response(),
    }
}

/// DELETE /api/games/{id} — removes the game resource. 204 or 404.
pub async fn delete_game(
    registry: Arc<PlayerRegistry>,
    sessions: Arc<SessionManager>,
    auth: Option<String>,
    session_id: SessionId,
) -> Response {
    if let Err(err) = registry.principal_from_header(auth.as_deref()) {
        return err.into_http_response();
    }

    match sessions.delete_game(&session_id) {
        Ok(()) => empty_response(StatusCode::NO_CONTENT),
        Err(err) => err.into_http_response(),
    }
}

pub(crate) fn success_response<T>(status: StatusCode, body: T) -> Response
where
    T: Serialize,
{
    reply::with_status(reply::json(&body), status).into_response()
}

pub(crate) fn empty_response(status: StatusCode) -> Response {
    http::Response::builder()
        .status(status)
        .body(warp::hyper::Body::empty())
        .expect("build empty response")
}
