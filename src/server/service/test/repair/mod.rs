use crate::server::{
    data::game_session::GameSessionRepository,
    error::AppError,
    model::{
        game_session::SessionStatus,
        live_game::{NewLiveGame, Seat},
    },
    service::{
        live_game::{InMemoryLiveGameStore, LiveGameStore},
        repair::RepairService,
    },
};
use chrono::{Duration, Utc};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory, factory::game_session::GameSessionFactory};

mod repair_stuck_starting;
