//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They enforce business
//! rules, coordinate the cold store with the live-game hot store and push notifications.
//! They work with domain models, never with DTOs or entity models.

pub mod auth;
pub mod campaign;
pub mod game_session;
pub mod lifecycle;
pub mod live_game;
pub mod notification;
pub mod repair;
