//! Data transfer objects exchanged with clients over HTTP and WebSocket.

pub mod api;
pub mod campaign;
pub mod live_game;
pub mod notification;
pub mod session;
pub mod user;
