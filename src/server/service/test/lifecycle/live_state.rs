use super::*;

/// Tests reading and patching live state.
///
/// Expected: patch visible on read, seated players notified
#[tokio::test]
async fn patches_live_state_and_notifies_table() -> Result<(), AppError> {
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
    let (_, mut player_events) = hub.register(players[0].id).await;
    let service = SessionLifecycleService::new(db, &store, &hub);

    service.start(session.id, host.id).await?;
    // Drain the start notification.
    player_events.recv().await;

    service
        .update_live_state(
            session.id,
            host.id,
            LiveGamePatch {
                active_display: Some(json!({"image": "map.png"})),
                ..Default::default()
            },
        )
        .await?;

    let live_game = service.live_state(session.id).await?;
    assert_eq!(live_game.active_display, Some(json!({"image": "map.png"})));
    assert_eq!(
        player_events.recv().await,
        Some(NotificationDto::LiveGameUpdated {
            session_id: session.id
        })
    );

    Ok(())
}

/// Tests live state of an INACTIVE session.
///
/// Expected: Err(SessionErr(WrongStatus))
#[tokio::test]
async fn inactive_session_has_no_live_state() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, _campaign, session) = factory::helpers::create_session_with_dependencies(db).await?;

    let store = InMemoryLiveGameStore::new();
    let hub = NotificationHub::new();
    let service = SessionLifecycleService::new(db, &store, &hub);

    assert!(matches!(
        service.live_state(session.id).await,
        Err(AppError::SessionErr(SessionError::WrongStatus { .. }))
    ));

    Ok(())
}

/// Tests that only the host may patch live state.
///
/// Expected: Err(AuthErr(AccessDenied))
#[tokio::test]
async fn rejects_patch_from_player() -> Result<(), AppError> {
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

    let result = service
        .update_live_state(session.id, players[0].id, LiveGamePatch::default())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests replacing the seating with the host and a campaign player.
///
/// Expected: Ok with the new seating stored
#[tokio::test]
async fn accepts_seating_of_campaign_players() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, campaign, players) = factory::helpers::create_campaign_with_players(db, 2).await?;
    let session = factory::create_session(db, campaign.id, host.id).await?;

    let store = InMemoryLiveGameStore::new();
    let hub = NotificationHub::new();
    let service = SessionLifecycleService::new(db, &store, &hub);
    service.start(session.id, host.id).await?;

    let seating = Seat::assign([players[1].id, host.id]);
    let live_game = service
        .update_live_state(
            session.id,
            host.id,
            LiveGamePatch {
                seating: Some(seating.clone()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(live_game.seating, seating);

    Ok(())
}

/// Tests a seating that lists a user outside the campaign.
///
/// Expected: Err(BadRequest) and the stored seating unchanged
#[tokio::test]
async fn rejects_seating_with_non_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, campaign, _players) = factory::helpers::create_campaign_with_players(db, 1).await?;
    let outsider = factory::create_user(db).await?;
    let session = factory::create_session(db, campaign.id, host.id).await?;

    let store = InMemoryLiveGameStore::new();
    let hub = NotificationHub::new();
    let service = SessionLifecycleService::new(db, &store, &hub);
    service.start(session.id, host.id).await?;
    let before = service.live_state(session.id).await?;

    let result = service
        .update_live_state(
            session.id,
            host.id,
            LiveGamePatch {
                seating: Some(Seat::assign([host.id, outsider.id])),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(service.live_state(session.id).await?.seating, before.seating);

    Ok(())
}

/// Tests a seating that lists the same user twice.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_seating_with_duplicate_user() -> Result<(), AppError> {
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

    let result = service
        .update_live_state(
            session.id,
            host.id,
            LiveGamePatch {
                seating: Some(Seat::assign([host.id, players[0].id, players[0].id])),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests a seating with more players than the session capacity.
///
/// Expected: Err(SessionErr(AtCapacity))
#[tokio::test]
async fn rejects_seating_over_capacity() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, campaign, players) = factory::helpers::create_campaign_with_players(db, 1).await?;
    let session = GameSessionFactory::new(db, campaign.id, host.id)
        .capacity(1)
        .build()
        .await?;

    let store = InMemoryLiveGameStore::new();
    let hub = NotificationHub::new();
    let service = SessionLifecycleService::new(db, &store, &hub);
    service.start(session.id, host.id).await?;

    // Invited after the start, so the campaign now has more players than seats.
    let late = factory::create_user(db).await?;
    factory::create_invited_player(db, campaign.id, late.id).await?;

    let result = service
        .update_live_state(
            session.id,
            host.id,
            LiveGamePatch {
                seating: Some(Seat::assign([host.id, players[0].id, late.id])),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::SessionErr(SessionError::AtCapacity { capacity: 1, .. }))
    ));

    Ok(())
}
