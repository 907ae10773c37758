//! Factory methods for creating test data.
//!
//! Factories insert entities with sensible defaults so tests only spell out the fields
//! they care about. Each entity has a `*Factory` builder for customization and a
//! `create_*` shorthand for the defaults.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let host = factory::user::create_user(db).await?;
//! let campaign = factory::campaign::create_campaign(db, host.id).await?;
//!
//! let session = factory::game_session::GameSessionFactory::new(db, campaign.id, host.id)
//!     .status("STARTING")
//!     .live_game_id("abc")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `campaign` - Create campaign entities
//! - `campaign_player` - Invite or join users to campaigns
//! - `game_session` - Create game session entities in any lifecycle state
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod campaign;
pub mod campaign_player;
pub mod game_session;
pub mod helpers;
pub mod user;

pub use campaign::create_campaign;
pub use campaign_player::{create_campaign_player, create_invited_player};
pub use game_session::create_session;
pub use user::create_user;
