use super::*;

fn live_game(id: &str, campaign_id: i32, host_id: i32) -> NewLiveGame {
    NewLiveGame {
        id: id.to_string(),
        session_id: 0,
        campaign_id,
        host_id,
        seating: Seat::assign([host_id]),
        audio: json!({}),
        scenes: json!({}),
        assets: json!({}),
    }
}

/// Tests rolling back a session stuck in STARTING past the threshold.
///
/// Expected: Ok with the session INACTIVE, reference cleared, document discarded
#[tokio::test]
async fn rolls_back_old_starting_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;

    let store = InMemoryLiveGameStore::new();
    store.create(live_game("stuck", campaign.id, host.id)).await?;

    let session = GameSessionFactory::new(db, campaign.id, host.id)
        .status("STARTING")
        .live_game_id("stuck")
        .status_changed_at(Utc::now() - Duration::minutes(30))
        .build()
        .await?;

    let report = RepairService::new(db, &store)
        .repair_stuck_starting(Duration::minutes(15), false)
        .await?;

    assert_eq!(report.rolled_back, vec![session.id]);
    assert!(!report.dry_run);

    let stored = GameSessionRepository::new(db)
        .find_by_id(session.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, SessionStatus::Inactive);
    assert!(stored.live_game_id.is_none());
    assert!(store.get("stuck").await?.is_none());

    Ok(())
}

/// Tests that sessions younger than the threshold are left alone.
///
/// Expected: Ok with an empty report and the session still STARTING
#[tokio::test]
async fn ignores_recent_starting_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;

    let session = GameSessionFactory::new(db, campaign.id, host.id)
        .status("STARTING")
        .live_game_id("fresh")
        .status_changed_at(Utc::now() - Duration::minutes(2))
        .build()
        .await?;

    let store = InMemoryLiveGameStore::new();
    let report = RepairService::new(db, &store)
        .repair_stuck_starting(Duration::minutes(15), false)
        .await?;

    assert!(report.rolled_back.is_empty());

    let stored = GameSessionRepository::new(db)
        .find_by_id(session.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, SessionStatus::Starting);
    assert_eq!(stored.live_game_id.as_deref(), Some("fresh"));

    Ok(())
}

/// Tests a dry run.
///
/// Expected: Ok with the session reported but still STARTING
#[tokio::test]
async fn dry_run_writes_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;

    let store = InMemoryLiveGameStore::new();
    store.create(live_game("stuck", campaign.id, host.id)).await?;

    let session = GameSessionFactory::new(db, campaign.id, host.id)
        .status("STARTING")
        .live_game_id("stuck")
        .status_changed_at(Utc::now() - Duration::hours(2))
        .build()
        .await?;

    let report = RepairService::new(db, &store)
        .repair_stuck_starting(Duration::minutes(15), true)
        .await?;

    assert!(report.dry_run);
    assert_eq!(report.rolled_back, vec![session.id]);

    let stored = GameSessionRepository::new(db)
        .find_by_id(session.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, SessionStatus::Starting);
    assert!(store.get("stuck").await?.is_some());

    Ok(())
}

/// Tests that sessions stuck in STOPPING are reported, not modified.
///
/// Expected: Ok with the session in `stuck_stopping` and still STOPPING
#[tokio::test]
async fn reports_stuck_stopping_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;

    let session = GameSessionFactory::new(db, campaign.id, host.id)
        .status("STOPPING")
        .live_game_id("unsaved")
        .status_changed_at(Utc::now() - Duration::hours(1))
        .build()
        .await?;

    let store = InMemoryLiveGameStore::new();
    let report = RepairService::new(db, &store)
        .repair_stuck_starting(Duration::minutes(15), false)
        .await?;

    assert!(report.rolled_back.is_empty());
    assert_eq!(report.stuck_stopping, vec![session.id]);

    let stored = GameSessionRepository::new(db)
        .find_by_id(session.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, SessionStatus::Stopping);

    Ok(())
}

/// Tests that an unreachable hot store does not stop the rollback.
///
/// Expected: Ok with the session rolled back
#[tokio::test]
async fn rolls_back_when_live_store_unavailable() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;

    let session = GameSessionFactory::new(db, campaign.id, host.id)
        .status("STARTING")
        .live_game_id("stuck")
        .status_changed_at(Utc::now() - Duration::minutes(30))
        .build()
        .await?;

    let store = InMemoryLiveGameStore::new();
    store.set_unavailable(true);

    let report = RepairService::new(db, &store)
        .repair_stuck_starting(Duration::minutes(15), false)
        .await?;

    assert_eq!(report.rolled_back, vec![session.id]);

    Ok(())
}
