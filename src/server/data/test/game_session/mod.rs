use crate::server::{
    data::{game_session::GameSessionRepository, session_player::SessionPlayerRepository},
    model::game_session::{CreateGameSessionParam, SessionStatus, SessionTransition},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory, factory::game_session::GameSessionFactory};

mod create;
mod delete_inactive;
mod find_stale;
mod transition_if_stale;
