use super::*;

/// Tests partial updates.
///
/// Expected: only the provided fields change
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_campaign_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::campaign::CampaignFactory::new(db, host.id)
        .name("Before")
        .scenes(json!({"current": "inn"}))
        .build()
        .await?;

    let repo = CampaignRepository::new(db);
    let updated = repo
        .update(
            campaign.id,
            UpdateCampaignParam {
                name: Some("After".to_string()),
                audio: Some(json!({"track": "rain"})),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "After");
    assert_eq!(updated.config.audio, json!({"track": "rain"}));
    assert_eq!(updated.config.scenes, json!({"current": "inn"}));
    assert!(updated.updated_at >= campaign.updated_at);

    Ok(())
}

/// Tests writing a live configuration back into the campaign.
///
/// Expected: audio, scenes and assets replaced, name untouched
#[tokio::test]
async fn writes_back_full_config() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_campaign_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;
    let campaign = factory::create_campaign(db, host.id).await?;

    let config = CampaignConfig {
        audio: json!({"track": "battle"}),
        scenes: json!({"current": "keep"}),
        assets: json!({"tokens": [1, 2]}),
    };

    let repo = CampaignRepository::new(db);
    let updated = repo
        .update(campaign.id, UpdateCampaignParam::from(config.clone()))
        .await?
        .unwrap();

    assert_eq!(updated.config, config);
    assert_eq!(updated.name, campaign.name);

    Ok(())
}

/// Tests updating a missing campaign.
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

    assert!(repo
        .update(999, UpdateCampaignParam::default())
        .await?
        .is_none());

    Ok(())
}
