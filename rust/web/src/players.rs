use noughts_engine::game::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use uuid::Uuid;

/// A registered player, as exposed to API clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub name: String,
    pub email: String,
}

/// Result of a successful registration. The token is shown exactly once;
/// clients present it as `Authorization: Bearer <token>` afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    pub player: PlayerProfile,
    pub token: String,
}

/// In-memory identity collaborator: registration and bearer-token
/// authentication.
///
/// Game handlers never read the acting principal from a request body; they
/// resolve it here from the Authorization header and thread it into the core
/// as an explicit parameter.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: RwLock<HashMap<PlayerId, PlayerProfile>>,
    tokens: RwLock<HashMap<String, PlayerId>>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a player and mints their bearer token.
    pub fn register(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Registration, PlayerError> {
        let name = name.into();
        let email = email.into();

        let mut players = self
            .players
            .write()
            .map_err(|_| PlayerError::StoragePoisoned)?;
        if players.values().any(|p| p.email == email) {
            return Err(PlayerError::EmailTaken(email));
        }

        let profile = PlayerProfile {
            id: Uuid::new_v4().to_string(),
            name,
            email,
        };
        let token = Uuid::new_v4().to_string();
        players.insert(profile.id.clone(), profile.clone());
        drop(players);

        self.tokens
            .write()
            .map_err(|_| PlayerError::StoragePoisoned)?
            .insert(token.clone(), profile.id.clone());

        tracing::info!(player_id = %profile.id, "player registered");

        Ok(Registration {
            player: profile,
            token,
        })
    }

    /// Resolves a bearer token to the player it was minted for.
    pub fn authenticate(&self, token: &str) -> Result<PlayerId, PlayerError> {
        self.tokens
            .read()
            .map_err(|_| PlayerError::StoragePoisoned)?
            .get(token)
            .cloned()
            .ok_or(PlayerError::Unauthorized)
    }

    /// Resolves the acting principal from a raw `Authorization` header.
    pub fn principal_from_header(&self, header: Option<&str>) -> Result<PlayerId, PlayerError> {
        let token = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(PlayerError::Unauthorized)?;
        self.authenticate(token)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players
            .read()
            .map(|players| players.contains_key(id))
            .unwrap_or(false)
    }

    pub fn get(&self, id: &PlayerId) -> Result<PlayerProfile, PlayerError> {
        self.players
            .read()
            .map_err(|_| PlayerError::StoragePoisoned)?
            .get(id)
            .cloned()
            .ok_or_else(|| PlayerError::NotFound(id.clone()))
    }

    /// All registered players, ordered by name for a stable listing.
    pub fn all(&self) -> Result<Vec<PlayerProfile>, PlayerError> {
        let mut players: Vec<PlayerProfile> = self
            .players
            .read()
            .map_err(|_| PlayerError::StoragePoisoned)?
            .values()
            .cloned()
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Email {0} is already registered")]
    EmailTaken(String),
    #[error("Player not found: {0}")]
    NotFound(PlayerId),
    #[error("Missing or invalid bearer token")]
    Unauthorized,
    #[error("Player storage poisoned")]
    StoragePoisoned,
}

impl crate::errors::IntoErrorResponse for PlayerError {
    fn status_code(&self) -> warp::http::StatusCode {
        use warp::http::StatusCode;
        match self {
            PlayerError::EmailTaken(_) => StatusCode::CONFLICT,
            PlayerError::NotFound(_) => StatusCode::NOT_FOUND,
            PlayerError::Unauthorized => StatusCode::UNAUTHORIZED,
            PlayerError::StoragePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            PlayerError::EmailTaken(_) => "email_taken",
            PlayerError::NotFound(_) => "player_not_found",
            PlayerError::Unauthorized => "unauthorized",
            PlayerError::StoragePoisoned => "player_storage_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            PlayerError::NotFound(id) => Some(serde_json::json!({ "player_id": id })),
            _ => None,
        }
    }

    fn severity(&self) -> crate::errors::ErrorSeverity {
        use crate::errors::ErrorSeverity;
        match self {
            PlayerError::StoragePoisoned => ErrorSeverity::Critical,
            _ => ErrorSeverity::Client,
        }
    }
}
