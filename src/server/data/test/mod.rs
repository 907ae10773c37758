mod campaign_player;
mod game_session;
