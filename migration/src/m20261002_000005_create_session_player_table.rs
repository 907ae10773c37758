use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000001_create_user_table::User;
use super::m20261002_000004_create_game_session_table::GameSession;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SessionPlayer::Table)
                    .if_not_exists()
                    .col(integer(SessionPlayer::SessionId))
                    .col(integer(SessionPlayer::UserId))
                    .col(
                        timestamp_with_time_zone(SessionPlayer::JoinedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(SessionPlayer::SessionId)
                            .col(SessionPlayer::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_player_session_id")
                            .from(SessionPlayer::Table, SessionPlayer::SessionId)
                            .to(GameSession::Table, GameSession::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_player_user_id")
                            .from(SessionPlayer::Table, SessionPlayer::UserId)
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
            .drop_table(Table::drop().table(SessionPlayer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SessionPlayer {
    Table,
    SessionId,
    UserId,
    JoinedAt,
}
