//! Rolls back sessions stuck in `STARTING` and lists sessions stuck in `STOPPING`.
//!
//! ```text
//! repair-sessions --threshold-minutes 30 --dry-run
//! ```

use anyhow::Context;
use chrono::Duration;
use clap::Parser;

use tabletop::server::{
    config::parse_threshold_minutes,
    service::repair::RepairService,
    startup,
};

#[derive(Parser, Debug)]
#[command(name = "repair-sessions", about = "Repair game sessions stuck mid-transition")]
struct Args {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Live-game service base URL; without it no documents are discarded.
    #[arg(long, env = "LIVE_GAME_SERVICE_URL")]
    live_game_service_url: Option<String>,

    /// Minimum minutes a session must have been STARTING before it is rolled back.
    #[arg(
        long = "threshold-minutes",
        env = "STUCK_SESSION_THRESHOLD_MINUTES",
        default_value = "15",
        value_parser = parse_threshold_minutes
    )]
    threshold: Duration,

    /// Report what would be repaired without writing anything.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let args = Args::parse();

    let db = startup::connect_to_database_url(&args.database_url)
        .await
        .context("failed to connect to the database")?;
    let http_client = startup::setup_reqwest_client().context("failed to build HTTP client")?;
    let live_games =
        startup::setup_live_game_store(args.live_game_service_url.as_deref(), http_client);

    let report = RepairService::new(&db, &*live_games)
        .repair_stuck_starting(args.threshold, args.dry_run)
        .await
        .context("repair pass failed")?;

    let verb = if report.dry_run {
        "would roll back"
    } else {
        "rolled back"
    };
    println!(
        "{} {} session(s) stuck in STARTING: {:?}",
        verb,
        report.rolled_back.len(),
        report.rolled_back
    );
    if !report.stuck_stopping.is_empty() {
        println!(
            "{} session(s) stuck in STOPPING, end them again to finish: {:?}",
            report.stuck_stopping.len(),
            report.stuck_stopping
        );
    }

    Ok(())
}
