use super::*;

/// Tests accepting a pending invite.
///
/// Expected: Ok(Some) with JOINED status
#[tokio::test]
async fn accepts_pending_invite() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_campaign_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let player = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;
    factory::create_invited_player(db, campaign.id, player.id).await?;

    let repo = CampaignPlayerRepository::new(db);
    let accepted = repo.accept(campaign.id, player.id).await?.unwrap();

    assert_eq!(accepted.status, PlayerStatus::Joined);

    Ok(())
}

/// Tests accepting without an invite, or twice.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_missing_or_accepted_invite() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_campaign_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, campaign, players) = factory::helpers::create_campaign_with_players(db, 1).await?;
    let stranger = factory::create_user(db).await?;

    let repo = CampaignPlayerRepository::new(db);

    assert!(repo.accept(campaign.id, players[0].id).await?.is_none());
    assert!(repo.accept(campaign.id, stranger.id).await?.is_none());

    Ok(())
}
