use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000001_create_user_table::User;
use super::m20261001_000002_create_campaign_table::Campaign;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CampaignPlayer::Table)
                    .if_not_exists()
                    .col(integer(CampaignPlayer::CampaignId))
                    .col(integer(CampaignPlayer::UserId))
                    .col(string_len(CampaignPlayer::Status, 16))
                    .col(
                        timestamp_with_time_zone(CampaignPlayer::InvitedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CampaignPlayer::CampaignId)
                            .col(CampaignPlayer::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_player_campaign_id")
                            .from(CampaignPlayer::Table, CampaignPlayer::CampaignId)
                            .to(Campaign::Table, Campaign::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_player_user_id")
                            .from(CampaignPlayer::Table, CampaignPlayer::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CampaignPlayer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CampaignPlayer {
    Table,
    CampaignId,
    UserId,
    Status,
    InvitedAt,
}
