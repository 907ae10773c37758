//! Database repository layer.
//!
//! Repositories wrap a borrowed `DatabaseConnection`, use SeaORM entity models
//! internally and return domain models from `server::model`. All cold-store queries,
//! inserts, updates and deletes go through them.

pub mod campaign;
pub mod campaign_player;
pub mod game_session;
pub mod session_player;
pub mod user;

#[cfg(test)]
mod test;
