use super::*;

/// Tests that players of both statuses are loaded with the campaign.
///
/// Expected: Ok(Some) with one joined and one invited player
#[tokio::test]
async fn loads_players_with_campaign() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_campaign_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, campaign, players) = factory::helpers::create_campaign_with_players(db, 1).await?;
    let invited = factory::create_user(db).await?;
    factory::create_invited_player(db, campaign.id, invited.id).await?;

    let repo = CampaignRepository::new(db);
    let found = repo.find_by_id(campaign.id).await?.unwrap();

    assert_eq!(found.players.len(), 2);
    assert!(found.is_member(host.id));
    assert!(found.is_member(players[0].id));
    assert!(!found.is_member(invited.id));
    assert_eq!(
        found.player(invited.id).map(|p| p.status),
        Some(PlayerStatus::Invited)
    );

    Ok(())
}

/// Tests lookup of a missing campaign.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_campaign() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_campaign_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CampaignRepository::new(db);

    assert!(repo.find_by_id(999).await?.is_none());

    Ok(())
}
