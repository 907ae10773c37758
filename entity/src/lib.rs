//! SeaORM entities for the cold-storage schema.

pub mod prelude;

pub mod campaign;
pub mod campaign_player;
pub mod game_session;
pub mod session_player;
pub mod user;
