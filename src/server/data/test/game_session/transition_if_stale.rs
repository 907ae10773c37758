use super::*;

/// Tests the rollback of a STARTING session that is still old and still on the
/// reference it was found with.
///
/// Expected: Some(INACTIVE) with the reference cleared
#[tokio::test]
async fn rolls_back_matching_stale_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;
    let now = Utc::now();
    let session = GameSessionFactory::new(db, campaign.id, host.id)
        .status("STARTING")
        .live_game_id("old")
        .status_changed_at(now - Duration::minutes(30))
        .build()
        .await?;

    let repo = GameSessionRepository::new(db);
    let updated = repo
        .transition_if_stale(
            session.id,
            &SessionTransition::roll_back(),
            Some("old"),
            now - Duration::minutes(15),
        )
        .await?
        .unwrap();

    assert_eq!(updated.status, SessionStatus::Inactive);
    assert!(updated.live_game_id.is_none());

    Ok(())
}

/// Tests that a session whose reference changed since it was found is left alone.
///
/// Expected: Ok(None) and the row untouched
#[tokio::test]
async fn skips_session_with_different_reference() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;
    let now = Utc::now();
    let session = GameSessionFactory::new(db, campaign.id, host.id)
        .status("STARTING")
        .live_game_id("restarted")
        .status_changed_at(now - Duration::minutes(30))
        .build()
        .await?;

    let repo = GameSessionRepository::new(db);
    let result = repo
        .transition_if_stale(
            session.id,
            &SessionTransition::roll_back(),
            Some("old"),
            now - Duration::minutes(15),
        )
        .await?;

    assert!(result.is_none());
    let stored = repo.find_by_id(session.id).await?.unwrap();
    assert_eq!(stored.status, SessionStatus::Starting);
    assert_eq!(stored.live_game_id.as_deref(), Some("restarted"));

    Ok(())
}

/// Tests that a STARTING session newer than the cutoff is left alone even when the
/// reference matches.
///
/// Expected: Ok(None) and the row untouched
#[tokio::test]
async fn skips_session_newer_than_cutoff() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;
    let now = Utc::now();
    let session = GameSessionFactory::new(db, campaign.id, host.id)
        .status("STARTING")
        .live_game_id("old")
        .status_changed_at(now - Duration::minutes(2))
        .build()
        .await?;

    let repo = GameSessionRepository::new(db);
    let result = repo
        .transition_if_stale(
            session.id,
            &SessionTransition::roll_back(),
            Some("old"),
            now - Duration::minutes(15),
        )
        .await?;

    assert!(result.is_none());
    let stored = repo.find_by_id(session.id).await?.unwrap();
    assert_eq!(stored.status, SessionStatus::Starting);

    Ok(())
}
