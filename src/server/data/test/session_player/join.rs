use super::*;

/// Tests the roster keeps join order.
///
/// Expected: user ids in the order they joined
#[tokio::test]
async fn roster_keeps_join_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, campaign, players) = factory::helpers::create_campaign_with_players(db, 2).await?;
    let session = factory::create_session(db, campaign.id, host.id).await?;

    let repo = SessionPlayerRepository::new(db);
    repo.join(session.id, players[1].id).await?;
    repo.join(session.id, players[0].id).await?;

    assert_eq!(
        repo.roster(session.id).await?,
        vec![players[1].id, players[0].id]
    );

    Ok(())
}

/// Tests joining twice.
///
/// Expected: Err from the primary key constraint
#[tokio::test]
async fn rejects_duplicate_join() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, campaign, players) = factory::helpers::create_campaign_with_players(db, 1).await?;
    let session = factory::create_session(db, campaign.id, host.id).await?;

    let repo = SessionPlayerRepository::new(db);
    repo.join(session.id, players[0].id).await?;

    assert!(repo.join(session.id, players[0].id).await.is_err());

    Ok(())
}
