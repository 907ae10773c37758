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
                    .table(GameSession::Table)
                    .if_not_exists()
                    .col(pk_auto(GameSession::Id))
                    .col(integer(GameSession::CampaignId))
                    .col(integer(GameSession::HostId))
                    .col(string(GameSession::Name))
                    .col(string_len(GameSession::Status, 16).default("INACTIVE"))
                    .col(string_null(GameSession::LiveGameId))
                    .col(integer(GameSession::Capacity))
                    .col(
                        timestamp_with_time_zone(GameSession::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(GameSession::StartedAt))
                    .col(timestamp_with_time_zone_null(GameSession::StoppedAt))
                    .col(
                        timestamp_with_time_zone(GameSession::StatusChangedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_session_campaign_id")
                            .from(GameSession::Table, GameSession::CampaignId)
                            .to(Campaign::Table, Campaign::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_session_host_id")
                            .from(GameSession::Table, GameSession::HostId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The repair job scans by status and age.
        manager
            .create_index(
                Index::create()
                    .name("idx_game_session_status_changed_at")
                    .table(GameSession::Table)
                    .col(GameSession::Status)
                    .col(GameSession::StatusChangedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameSession::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GameSession {
    Table,
    Id,
    CampaignId,
    HostId,
    Name,
    Status,
    LiveGameId,
    Capacity,
    CreatedAt,
    StartedAt,
    StoppedAt,
    StatusChangedAt,
}
