pub use super::campaign::Entity as Campaign;
pub use super::campaign_player::Entity as CampaignPlayer;
pub use super::game_session::Entity as GameSession;
pub use super::session_player::Entity as SessionPlayer;
pub use super::user::Entity as User;
