//! Cleanup of sessions stuck mid-transition.
//!
//! A start that crashed between its two status updates leaves a session in `STARTING`
//! forever. The repair pass rolls such sessions back to `INACTIVE` once they are older
//! than a threshold and discards their live game documents. Sessions stuck in
//! `STOPPING` still hold unsaved live state, so they are only reported; ending them
//! again resumes the migration.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::game_session::GameSessionRepository,
    error::{config::ConfigError, AppError},
    model::game_session::{SessionStatus, SessionTransition},
    service::live_game::LiveGameStore,
};

/// Outcome of one repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Sessions rolled back from `STARTING` (or that would be, on a dry run).
    pub rolled_back: Vec<i32>,
    /// Sessions in `STOPPING` past the threshold, left untouched.
    pub stuck_stopping: Vec<i32>,
    pub dry_run: bool,
}

pub struct RepairService<'a> {
    db: &'a DatabaseConnection,
    live_games: &'a dyn LiveGameStore,
}

impl<'a> RepairService<'a> {
    pub fn new(db: &'a DatabaseConnection, live_games: &'a dyn LiveGameStore) -> Self {
        Self { db, live_games }
    }

    /// Rolls back `STARTING` sessions whose status is older than `threshold`.
    ///
    /// Sessions younger than the threshold are never touched, including sessions that
    /// were restarted between the lookup and the rollback. With `dry_run` nothing is
    /// written; the report lists what would have been rolled back.
    ///
    /// # Returns
    /// - `Ok(RepairReport)` - Rolled back and stuck `STOPPING` session ids
    /// - `Err(AppError::ConfigErr)` - `threshold` reaches before the earliest representable time
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn repair_stuck_starting(
        &self,
        threshold: Duration,
        dry_run: bool,
    ) -> Result<RepairReport, AppError> {
        let repo = GameSessionRepository::new(self.db);
        let cutoff = Utc::now().checked_sub_signed(threshold).ok_or_else(|| {
            ConfigError::InvalidEnvVar {
                name: "STUCK_SESSION_THRESHOLD_MINUTES".to_string(),
                reason: format!("threshold of {} is out of range", threshold),
            }
        })?;

        let mut report = RepairReport {
            dry_run,
            ..Default::default()
        };

        for session in repo.find_stale(SessionStatus::Starting, cutoff).await? {
            if dry_run {
                tracing::info!(
                    "[dry run] Would roll back session {} (STARTING since {})",
                    session.id,
                    session.status_changed_at
                );
                report.rolled_back.push(session.id);
                continue;
            }

            match repo
                .transition_if_stale(
                    session.id,
                    &SessionTransition::roll_back(),
                    session.live_game_id.as_deref(),
                    cutoff,
                )
                .await?
            {
                Some(_) => {
                    tracing::info!(
                        "Rolled back session {} stuck in STARTING since {}",
                        session.id,
                        session.status_changed_at
                    );
                    report.rolled_back.push(session.id);
                }
                None => {
                    tracing::debug!(
                        "Session {} changed since it was found stale, skipping",
                        session.id
                    );
                    continue;
                }
            }

            if let Some(live_game_id) = session.live_game_id.as_deref() {
                if let Err(err) = self.live_games.delete(live_game_id).await {
                    tracing::warn!(
                        "Failed to discard live game {} of repaired session {}: {}",
                        live_game_id,
                        session.id,
                        err
                    );
                }
            }
        }

        for session in repo.find_stale(SessionStatus::Stopping, cutoff).await? {
            tracing::warn!(
                "Session {} stuck in STOPPING since {}, end it again to resume the migration",
                session.id,
                session.status_changed_at
            );
            report.stuck_stopping.push(session.id);
        }

        Ok(report)
    }
}
