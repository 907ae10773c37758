use super::*;

/// Tests creating a session with a valid capacity.
///
/// Expected: Ok with an INACTIVE session and empty roster
#[tokio::test]
async fn creates_inactive_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;

    let session = GameSessionService::new(db)
        .create(CreateGameSessionParam {
            campaign_id: campaign.id,
            host_id: host.id,
            name: "Session zero".to_string(),
            capacity: 4,
        })
        .await?;

    assert!(session.live_game_id.is_none());
    assert!(session.roster.is_empty());
    assert_eq!(session.capacity, 4);

    Ok(())
}

/// Tests creating a session with capacity outside 1..=32.
///
/// Expected: Err(SessionErr(InvalidCapacity))
#[tokio::test]
async fn rejects_invalid_capacity() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;

    for capacity in [0, 33] {
        let result = GameSessionService::new(db)
            .create(CreateGameSessionParam {
                campaign_id: campaign.id,
                host_id: host.id,
                name: "Too big".to_string(),
                capacity,
            })
            .await;

        assert!(matches!(
            result,
            Err(AppError::SessionErr(SessionError::InvalidCapacity { .. }))
        ));
    }

    Ok(())
}
