use super::*;

/// Tests deleting an INACTIVE session.
///
/// Expected: Ok, then NotFound on lookup
#[tokio::test]
async fn deletes_inactive_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, _campaign, session) = factory::helpers::create_session_with_dependencies(db).await?;

    let service = GameSessionService::new(db);
    service.delete(session.id).await?;

    assert!(matches!(
        service.get(session.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests deleting a session that is live.
///
/// Expected: Err(SessionErr(WrongStatus))
#[tokio::test]
async fn rejects_live_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;
    let session = GameSessionFactory::new(db, campaign.id, host.id)
        .status("ACTIVE")
        .live_game_id("live")
        .build()
        .await?;

    let result = GameSessionService::new(db).delete(session.id).await;

    assert!(matches!(
        result,
        Err(AppError::SessionErr(SessionError::WrongStatus { .. }))
    ));

    Ok(())
}
