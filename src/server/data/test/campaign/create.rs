use super::*;

/// Tests creating a campaign.
///
/// Expected: Ok with the given configuration and no players
#[tokio::test]
async fn creates_campaign_with_config() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_campaign_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::create_user(db).await?;

    let repo = CampaignRepository::new(db);
    let campaign = repo
        .create(CreateCampaignParam {
            host_id: host.id,
            name: "Curse of the Tide".to_string(),
            description: Some("Coastal horror".to_string()),
            config: CampaignConfig {
                audio: json!({"playlist": ["waves"]}),
                ..Default::default()
            },
        })
        .await?;

    assert_eq!(campaign.host_id, host.id);
    assert_eq!(campaign.name, "Curse of the Tide");
    assert_eq!(campaign.config.audio, json!({"playlist": ["waves"]}));
    assert_eq!(campaign.config.scenes, json!({}));
    assert!(campaign.players.is_empty());

    Ok(())
}
