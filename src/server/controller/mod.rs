pub mod auth;
pub mod campaign;
pub mod notification;
pub mod session;
