use crate::server::{data::campaign_player::CampaignPlayerRepository, model::campaign::PlayerStatus};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod accept;
