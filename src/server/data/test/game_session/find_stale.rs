use super::*;

/// Tests that only sessions older than the cutoff in the given status are returned.
///
/// Expected: the old STARTING session only
#[tokio::test]
async fn finds_only_old_sessions_in_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;
    let now = Utc::now();

    let old_starting = GameSessionFactory::new(db, campaign.id, host.id)
        .status("STARTING")
        .live_game_id("old")
        .status_changed_at(now - Duration::minutes(30))
        .build()
        .await?;
    GameSessionFactory::new(db, campaign.id, host.id)
        .status("STARTING")
        .live_game_id("fresh")
        .status_changed_at(now - Duration::minutes(5))
        .build()
        .await?;
    GameSessionFactory::new(db, campaign.id, host.id)
        .status("ACTIVE")
        .live_game_id("active")
        .status_changed_at(now - Duration::hours(3))
        .build()
        .await?;

    let repo = GameSessionRepository::new(db);
    let stale = repo
        .find_stale(SessionStatus::Starting, now - Duration::minutes(15))
        .await?;

    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].id, old_starting.id);

    Ok(())
}
