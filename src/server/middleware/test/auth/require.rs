use super::*;

/// Tests a request without a logged-in user.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_missing_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_campaign_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests a session pointing at a user that no longer exists.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_deleted_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_campaign_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(4242).await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(4242)))
    ));

    Ok(())
}

/// Tests campaign host and member checks.
///
/// Expected: host passes both, a joined player passes member only
#[tokio::test]
async fn checks_campaign_host_and_member() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_campaign_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (host, campaign, players) = factory::helpers::create_campaign_with_players(db, 1).await?;
    let auth_session = AuthSession::new(session);
    let guard = AuthGuard::new(db, session);

    auth_session.set_user_id(host.id).await?;
    let user = guard
        .require(&[
            Permission::CampaignHost(campaign.id),
            Permission::CampaignMember(campaign.id),
        ])
        .await?;
    assert_eq!(user.id, host.id);

    auth_session.set_user_id(players[0].id).await?;
    guard
        .require(&[Permission::CampaignMember(campaign.id)])
        .await?;

    let result = guard.require(&[Permission::CampaignHost(campaign.id)]).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) if id == players[0].id
    ));

    Ok(())
}

/// Tests that a pending invite does not grant membership.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_invited_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_campaign_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;
    let invited = factory::create_user(db).await?;
    factory::create_invited_player(db, campaign.id, invited.id).await?;

    AuthSession::new(session).set_user_id(invited.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::CampaignMember(campaign.id)])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests session host and member checks.
///
/// Expected: campaign player passes SessionMember but not SessionHost
#[tokio::test]
async fn checks_session_host_and_member() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (host, campaign, players) = factory::helpers::create_campaign_with_players(db, 1).await?;
    let game_session = factory::create_session(db, campaign.id, host.id).await?;

    let auth_session = AuthSession::new(session);
    let guard = AuthGuard::new(db, session);

    auth_session.set_user_id(host.id).await?;
    guard
        .require(&[Permission::SessionHost(game_session.id)])
        .await?;

    auth_session.set_user_id(players[0].id).await?;
    guard
        .require(&[Permission::SessionMember(game_session.id)])
        .await?;
    assert!(matches!(
        guard
            .require(&[Permission::SessionHost(game_session.id)])
            .await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests permissions referencing missing resources.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn missing_resource_is_not_found() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;
    let guard = AuthGuard::new(db, session);

    assert!(matches!(
        guard.require(&[Permission::CampaignMember(777)]).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        guard.require(&[Permission::SessionHost(777)]).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
