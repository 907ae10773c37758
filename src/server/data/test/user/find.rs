use super::*;

/// Tests lookups by id and subject.
///
/// Expected: Some for the stored user, None for unknown keys
#[tokio::test]
async fn finds_user_by_id_and_subject() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .subject("sub-42")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert_eq!(repo.find_by_id(user.id).await?.map(|u| u.id), Some(user.id));
    assert_eq!(
        repo.find_by_subject("sub-42").await?.map(|u| u.id),
        Some(user.id)
    );
    assert!(repo.find_by_id(user.id + 100).await?.is_none());
    assert!(repo.find_by_subject("missing").await?.is_none());

    Ok(())
}
