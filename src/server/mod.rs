//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework and SeaORM for the cold store (PostgreSQL).
//! Live in-session state is held by an external live-game service (the hot store) and
//! reached through the [`service::live_game::LiveGameStore`] abstraction.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP/WebSocket handlers, access control, DTO conversion
//! - **Service Layer** (`service/`) - Business logic, the session lifecycle and hot/cold migration
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session wrappers and authentication guards
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, HTTP clients, live store, notifications)
//! - **Startup** (`startup`) - Initialization of tracing, database, sessions and clients
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Cron job repairing stuck sessions
//!
//! # Storage tiers
//!
//! A session's `status` decides which tier is authoritative for its configuration:
//! the campaign row while `INACTIVE`, the live game document while `STARTING`,
//! `ACTIVE` or `STOPPING`. See [`model::game_session::SessionStatus`].

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
