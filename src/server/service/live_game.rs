//! Hot store access for live game documents.
//!
//! The live-game service owns in-session state in a document store. This module hides
//! it behind [`LiveGameStore`] so the lifecycle service can be exercised without the
//! external service. [`HttpLiveGameStore`] talks to the real service over JSON,
//! [`InMemoryLiveGameStore`] keeps documents in process and is used by tests and local
//! development when `LIVE_GAME_SERVICE_URL` is unset.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::server::{
    error::live_game::LiveGameError,
    model::live_game::{LiveGame, LiveGamePatch, NewLiveGame},
};

/// Operations the lifecycle needs from the hot store.
#[async_trait]
pub trait LiveGameStore: Send + Sync {
    /// Materializes a live game from its seed.
    ///
    /// # Returns
    /// - `Ok(LiveGame)` - Document created
    /// - `Err(LiveGameError::AlreadyExists)` - A document with the same id exists
    async fn create(&self, game: NewLiveGame) -> Result<LiveGame, LiveGameError>;

    /// Fetches a live game, `Ok(None)` when no document has the id.
    async fn get(&self, id: &str) -> Result<Option<LiveGame>, LiveGameError>;

    /// Applies a partial update and returns the new document.
    async fn update(&self, id: &str, patch: LiveGamePatch) -> Result<LiveGame, LiveGameError>;

    /// Discards a live game. Returns whether a document was removed.
    async fn delete(&self, id: &str) -> Result<bool, LiveGameError>;
}

/// Live-game service client.
///
/// Endpoints: `POST /games`, `GET /games/{id}`, `PATCH /games/{id}`, `DELETE /games/{id}`.
pub struct HttpLiveGameStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLiveGameStore {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn games_url(&self) -> String {
        format!("{}/games", self.base_url)
    }

    fn game_url(&self, id: &str) -> String {
        format!("{}/games/{}", self.base_url, id)
    }
}

/// Turns a non-success response into `LiveGameError::Status`.
async fn error_for_status(response: reqwest::Response) -> LiveGameError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    LiveGameError::Status { status, body }
}

#[async_trait]
impl LiveGameStore for HttpLiveGameStore {
    async fn create(&self, game: NewLiveGame) -> Result<LiveGame, LiveGameError> {
        let id = game.id.clone();
        let response = self.client.post(self.games_url()).json(&game).send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<LiveGame>().await?),
            StatusCode::CONFLICT => Err(LiveGameError::AlreadyExists(id)),
            _ => Err(error_for_status(response).await),
        }
    }

    async fn get(&self, id: &str) -> Result<Option<LiveGame>, LiveGameError> {
        let response = self.client.get(self.game_url(id)).send().await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json::<LiveGame>().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(error_for_status(response).await),
        }
    }

    async fn update(&self, id: &str, patch: LiveGamePatch) -> Result<LiveGame, LiveGameError> {
        let response = self
            .client
            .patch(self.game_url(id))
            .json(&patch)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<LiveGame>().await?),
            StatusCode::NOT_FOUND => Err(LiveGameError::NotFound(id.to_string())),
            _ => Err(error_for_status(response).await),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, LiveGameError> {
        let response = self.client.delete(self.game_url(id)).send().await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(error_for_status(response).await),
        }
    }
}

/// Process-local hot store.
///
/// `set_unavailable(true)` makes every operation fail with `LiveGameError::Unavailable`,
/// which is how tests simulate the live-game service being down.
#[derive(Default)]
pub struct InMemoryLiveGameStore {
    games: RwLock<HashMap<String, LiveGame>>,
    unavailable: AtomicBool,
}

impl InMemoryLiveGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of documents currently held.
    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<(), LiveGameError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LiveGameError::Unavailable(
                "in-memory store switched off".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl LiveGameStore for InMemoryLiveGameStore {
    async fn create(&self, game: NewLiveGame) -> Result<LiveGame, LiveGameError> {
        self.check_available()?;

        let mut games = self.games.write().await;
        if games.contains_key(&game.id) {
            return Err(LiveGameError::AlreadyExists(game.id));
        }

        let live_game = game.into_live_game(Utc::now());
        games.insert(live_game.id.clone(), live_game.clone());

        Ok(live_game)
    }

    async fn get(&self, id: &str) -> Result<Option<LiveGame>, LiveGameError> {
        self.check_available()?;

        Ok(self.games.read().await.get(id).cloned())
    }

    async fn update(&self, id: &str, patch: LiveGamePatch) -> Result<LiveGame, LiveGameError> {
        self.check_available()?;

        let mut games = self.games.write().await;
        let Some(game) = games.get_mut(id) else {
            return Err(LiveGameError::NotFound(id.to_string()));
        };

        game.apply(patch);

        Ok(game.clone())
    }

    async fn delete(&self, id: &str) -> Result<bool, LiveGameError> {
        self.check_available()?;

        Ok(self.games.write().await.remove(id).is_some())
    }
}
