pub mod game;
pub mod health;
pub mod players;
pub mod scoreboard;

pub use game::{
    create_game, delete_game, get_game, submit_move, CreateGameRequest, MoveRequest,
};
pub use health::health;
pub use players::{get_player, list_players, register_player, RegisterRequest};
pub use scoreboard::{dashboard, DashboardQuery};
