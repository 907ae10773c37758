use super::*;

/// Tests inviting a user to a campaign.
///
/// Expected: Ok with an INVITED player and a notification for the invitee
#[tokio::test]
async fn invites_user_and_notifies() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;
    let guest = factory::create_user(db).await?;

    let hub = NotificationHub::new();
    let (_, mut events) = hub.register(guest.id).await;

    let player = CampaignService::new(db, &hub)
        .invite(campaign.id, guest.id)
        .await?;

    assert_eq!(player.status, PlayerStatus::Invited);
    assert_eq!(
        events.recv().await,
        Some(NotificationDto::CampaignInvite {
            campaign_id: campaign.id,
            campaign_name: campaign.name.clone(),
        })
    );

    Ok(())
}

/// Tests inviting the campaign host.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_inviting_host() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;

    let hub = NotificationHub::new();
    let result = CampaignService::new(db, &hub)
        .invite(campaign.id, host.id)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests inviting a user that is already a player.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_existing_player() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, campaign, players) = factory::helpers::create_campaign_with_players(db, 1).await?;

    let hub = NotificationHub::new();
    let result = CampaignService::new(db, &hub)
        .invite(campaign.id, players[0].id)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests inviting a user id that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn rejects_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;

    let hub = NotificationHub::new();
    let result = CampaignService::new(db, &hub).invite(campaign.id, 9999).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests accepting an invite, then accepting it again.
///
/// Expected: first Ok with JOINED, second Err(NotFound)
#[tokio::test]
async fn accepts_pending_invite_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;
    let guest = factory::create_user(db).await?;
    factory::create_invited_player(db, campaign.id, guest.id).await?;

    let hub = NotificationHub::new();
    let service = CampaignService::new(db, &hub);

    let player = service.accept_invite(campaign.id, guest.id).await?;
    assert_eq!(player.status, PlayerStatus::Joined);

    let again = service.accept_invite(campaign.id, guest.id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));

    Ok(())
}
