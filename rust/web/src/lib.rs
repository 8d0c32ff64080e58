pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod players;
pub mod scoreboard;
pub mod server;
pub mod session;

pub use errors::{ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use logging::{init_logging, init_test_logging, LogEntry, TestLogSubscriber};
pub use middleware::{log_response, with_request_logging};
pub use players::{PlayerError, PlayerProfile, PlayerRegistry, Registration};
pub use scoreboard::{ScoreBoard, ScoreBoardError};
pub use server::{AppContext, ServerConfig, ServerError, ServerHandle, WebServer};
pub use session::{
    GameConfig, GameSession, GameStateResponse, SessionError, SessionId, SessionManager,
};
