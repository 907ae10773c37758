use chrono::Duration;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{live_game::LiveGameStore, repair::RepairService},
};

/// Starts the stuck session repair scheduler.
///
/// Each run rolls back sessions stuck in `STARTING` for longer than `threshold` and
/// logs sessions stuck in `STOPPING`.
///
/// # Arguments
/// - `db`: Database connection
/// - `live_games`: Hot store used to discard documents of rolled back sessions
/// - `schedule`: Six-field cron expression (seconds first), e.g. `0 */5 * * * *`
/// - `threshold`: Minimum age of a stuck status before it is repaired
pub async fn start_scheduler(
    db: DatabaseConnection,
    live_games: Arc<dyn LiveGameStore>,
    schedule: String,
    threshold: Duration,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
        let db = db.clone();
        let live_games = live_games.clone();

        Box::pin(async move {
            match RepairService::new(&db, &*live_games)
                .repair_stuck_starting(threshold, false)
                .await
            {
                Ok(report) if !report.rolled_back.is_empty() => {
                    tracing::info!(
                        "Stuck session repair rolled back {} session(s)",
                        report.rolled_back.len()
                    );
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Error repairing stuck sessions: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Stuck session scheduler started ({})", schedule);

    Ok(())
}
