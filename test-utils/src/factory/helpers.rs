//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values across all factories.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a host, a campaign owned by that host and an inactive session for it.
///
/// # Returns
/// - `Ok((host, campaign, session))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_session_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::campaign::Model,
        entity::game_session::Model,
    ),
    DbErr,
> {
    let host = crate::factory::user::create_user(db).await?;
    let campaign = crate::factory::campaign::create_campaign(db, host.id).await?;
    let session = crate::factory::game_session::create_session(db, campaign.id, host.id).await?;

    Ok((host, campaign, session))
}

/// Creates a campaign for a fresh host with `players` joined campaign players.
///
/// # Returns
/// - `Ok((host, campaign, players))` - The host, the campaign and the player users
/// - `Err(DbErr)` - Database error during creation
pub async fn create_campaign_with_players(
    db: &DatabaseConnection,
    players: usize,
) -> Result<
    (
        entity::user::Model,
        entity::campaign::Model,
        Vec<entity::user::Model>,
    ),
    DbErr,
> {
    let host = crate::factory::user::create_user(db).await?;
    let campaign = crate::factory::campaign::create_campaign(db, host.id).await?;

    let mut users = Vec::with_capacity(players);
    for _ in 0..players {
        let user = crate::factory::user::create_user(db).await?;
        crate::factory::campaign_player::create_campaign_player(db, campaign.id, user.id).await?;
        users.push(user);
    }

    Ok((host, campaign, users))
}
