//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary.

pub mod campaign;
pub mod game_session;
pub mod live_game;
pub mod user;
