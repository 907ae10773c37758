use super::*;

/// Tests that only INACTIVE sessions can be deleted.
///
/// Expected: ACTIVE session kept, INACTIVE session removed
#[tokio::test]
async fn deletes_only_inactive_sessions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, campaign, inactive) = factory::helpers::create_session_with_dependencies(db).await?;
    let active = GameSessionFactory::new(db, campaign.id, host.id)
        .status("ACTIVE")
        .live_game_id("g")
        .build()
        .await?;

    let repo = GameSessionRepository::new(db);

    assert!(!repo.delete_inactive(active.id).await?);
    assert!(repo.delete_inactive(inactive.id).await?);
    assert!(repo.find_by_id(active.id).await?.is_some());
    assert!(repo.find_by_id(inactive.id).await?.is_none());

    Ok(())
}
