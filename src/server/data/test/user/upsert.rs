use super::*;

/// Tests creating a new user.
///
/// Expected: Ok with the user created from subject and name
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            subject: "sub-1".to_string(),
            name: "Alice".to_string(),
        })
        .await?;

    assert!(user.id > 0);
    assert_eq!(user.subject, "sub-1");
    assert_eq!(user.name, "Alice");

    Ok(())
}

/// Tests that a second login with the same subject updates the existing row.
///
/// Expected: Ok with the same id and the refreshed name
#[tokio::test]
async fn updates_existing_user_by_subject() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::user::UserFactory::new(db)
        .subject("sub-1")
        .name("Old Name")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            subject: "sub-1".to_string(),
            name: "New Name".to_string(),
        })
        .await?;

    assert_eq!(user.id, existing.id);
    assert_eq!(user.name, "New Name");
    assert_eq!(
        entity::prelude::User::find().all(db).await?.len(),
        1,
        "upsert must not insert a second row"
    );

    Ok(())
}
