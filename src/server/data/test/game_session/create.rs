use super::*;

/// Tests creating a session.
///
/// Expected: Ok with an INACTIVE session, no reference and an empty roster
#[tokio::test]
async fn creates_inactive_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;

    let repo = GameSessionRepository::new(db);
    let session = repo
        .create(CreateGameSessionParam {
            campaign_id: campaign.id,
            host_id: host.id,
            name: "Session One".to_string(),
            capacity: 4,
        })
        .await?;

    assert_eq!(session.status, SessionStatus::Inactive);
    assert!(session.live_game_id.is_none());
    assert_eq!(session.capacity, 4);
    assert!(session.roster.is_empty());
    assert!(session.started_at.is_none());

    let found = repo.find_by_id(session.id).await?.unwrap();
    assert_eq!(found.name, "Session One");

    Ok(())
}
