use super::*;

/// Tests a full start/update/end cycle.
///
/// Verifies the live configuration is written back into the campaign, the reference is
/// cleared, the live game discarded and members notified.
///
/// Expected: Ok with INACTIVE session and campaign holding the live config
#[tokio::test]
async fn ends_session_and_writes_back_config() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, campaign, players) = factory::helpers::create_campaign_with_players(db, 1).await?;
    let session = factory::create_session(db, campaign.id, host.id).await?;

    let store = InMemoryLiveGameStore::new();
    let hub = NotificationHub::new();
    let service = SessionLifecycleService::new(db, &store, &hub);

    service.start(session.id, host.id).await?;
    service
        .update_live_state(
            session.id,
            host.id,
            LiveGamePatch {
                audio: Some(json!({"track": "boss"})),
                scenes: Some(json!({"current": "throne room"})),
                ..Default::default()
            },
        )
        .await?;

    let (_, mut player_events) = hub.register(players[0].id).await;
    let ended = service.end(session.id, host.id).await?;

    assert_eq!(ended.status, SessionStatus::Inactive);
    assert!(ended.live_game_id.is_none());
    assert!(ended.stopped_at.is_some());
    assert!(store.is_empty().await);

    let campaign = CampaignRepository::new(db)
        .find_by_id(campaign.id)
        .await?
        .unwrap();
    assert_eq!(campaign.config.audio, json!({"track": "boss"}));
    assert_eq!(campaign.config.scenes, json!({"current": "throne room"}));

    assert_eq!(
        player_events.recv().await,
        Some(NotificationDto::SessionEnded {
            session_id: session.id,
            campaign_id: campaign.id,
        })
    );

    Ok(())
}

/// Tests that ending resumes a session left in STOPPING.
///
/// Expected: Ok with INACTIVE session and the live config written back
#[tokio::test]
async fn resumes_interrupted_end() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;

    let store = InMemoryLiveGameStore::new();
    let live_game = store
        .create(NewLiveGame {
            id: "stuck".to_string(),
            session_id: 0,
            campaign_id: campaign.id,
            host_id: host.id,
            seating: Seat::assign([host.id]),
            audio: json!({"track": "epilogue"}),
            scenes: json!({}),
            assets: json!({"maps": ["final"]}),
        })
        .await?;
    let session = GameSessionFactory::new(db, campaign.id, host.id)
        .status("STOPPING")
        .live_game_id(live_game.id.clone())
        .build()
        .await?;

    let hub = NotificationHub::new();
    let service = SessionLifecycleService::new(db, &store, &hub);
    let ended = service.end(session.id, host.id).await?;

    assert_eq!(ended.status, SessionStatus::Inactive);
    assert!(ended.live_game_id.is_none());

    let campaign = CampaignRepository::new(db)
        .find_by_id(campaign.id)
        .await?
        .unwrap();
    assert_eq!(campaign.config.audio, json!({"track": "epilogue"}));
    assert_eq!(campaign.config.assets, json!({"maps": ["final"]}));

    Ok(())
}

/// Tests that a failing hot store keeps the session STOPPING for a later retry.
///
/// Expected: Err(LiveGameErr) and the session still STOPPING with its reference
#[tokio::test]
async fn stays_stopping_when_live_game_unreadable() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, _campaign, session) = factory::helpers::create_session_with_dependencies(db).await?;

    let store = InMemoryLiveGameStore::new();
    let hub = NotificationHub::new();
    let service = SessionLifecycleService::new(db, &store, &hub);

    service.start(session.id, host.id).await?;
    store.set_unavailable(true);

    let result = service.end(session.id, host.id).await;
    assert!(matches!(result, Err(AppError::LiveGameErr(_))));

    let stored = GameSessionRepository::new(db)
        .find_by_id(session.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, SessionStatus::Stopping);
    assert!(stored.live_game_id.is_some());

    store.set_unavailable(false);
    let ended = service.end(session.id, host.id).await?;
    assert_eq!(ended.status, SessionStatus::Inactive);

    Ok(())
}

/// Tests ending a session that was never started.
///
/// Expected: Err(SessionErr(WrongStatus))
#[tokio::test]
async fn rejects_inactive_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, _campaign, session) = factory::helpers::create_session_with_dependencies(db).await?;

    let store = InMemoryLiveGameStore::new();
    let hub = NotificationHub::new();
    let service = SessionLifecycleService::new(db, &store, &hub);

    assert!(matches!(
        service.end(session.id, host.id).await,
        Err(AppError::SessionErr(SessionError::WrongStatus {
            actual: SessionStatus::Inactive,
            ..
        }))
    ));

    Ok(())
}
