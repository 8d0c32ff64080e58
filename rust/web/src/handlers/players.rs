use crate::errors::IntoErrorResponse;
use crate::handlers::game::success_response;
use crate::players::PlayerRegistry;
use serde::Deserialize;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
}

/// POST /api/players — registers a player and returns their id plus the
/// bearer token (shown exactly once).
pub async fn register_player(registry: Arc<PlayerRegistry>, request: RegisterRequest) -> Response {
    match registry.register(request.name, request.email) {
        Ok(registration) => success_response(StatusCode::CREATED, registration),
        Err(err) => err.into_http_response(),
    }
}

/// GET /api/players — lists registered players, for picking opponents.
pub async fn list_players(registry: Arc<PlayerRegistry>, auth: Option<String>) -> Response {
    if let Err(err) = registry.principal_from_header(auth.as_deref()) {
        return err.into_http_response();
    }

    match registry.all() {
        Ok(players) => success_response(StatusCode::OK, players),
        Err(err) => err.into_http_response(),
    }
}

/// GET /api/players/{id} — one player's profile. 200 or 404.
pub async fn get_player(
    registry: Arc<PlayerRegistry>,
    auth: Option<String>,
    player_id: String,
) -> Response {
    if let Err(err) = registry.principal_from_header(auth.as_deref()) {
        return err.into_http_response();
    }

    match registry.get(&player_id) {
        Ok(profile) => success_response(StatusCode::OK, profile),
        Err(err) => err.into_http_response(),
    }
}
