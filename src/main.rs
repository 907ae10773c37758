use tabletop::server::{
    config::Config, router, scheduler::stuck_sessions, service::notification::NotificationHub,
    startup, state::AppState,
};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let live_games =
        startup::setup_live_game_store(config.live_game_service_url.as_deref(), http_client.clone());

    // Start stuck session repair scheduler
    if let Some(schedule) = config.repair_schedule.clone() {
        let scheduler_db = db.clone();
        let scheduler_live_games = live_games.clone();
        let threshold = config.stuck_session_threshold;
        tokio::spawn(async move {
            if let Err(e) = stuck_sessions::start_scheduler(
                scheduler_db,
                scheduler_live_games,
                schedule,
                threshold,
            )
            .await
            {
                tracing::error!("Stuck session scheduler error: {}", e);
            }
        });
    }

    let state = AppState::new(
        db,
        http_client,
        oauth_client,
        config.oauth_userinfo_url.clone(),
        live_games,
        NotificationHub::new(),
        config.app_url.clone(),
    );

    let app = router::router(&config)?
        .with_state(state)
        .layer(session)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
