//! API Handlers
//!
//! HTTP request handlers for the demo endpoints. Each one runs a fixed
//! sequence of facade calls against the demo key and answers with a
//! literal status string.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::client::CacheClient;
use crate::codec::CacheValue;
use crate::config::ListWriteMode;
use crate::error::Result;
use crate::facade::CacheFacade;
use crate::models::HealthResponse;
use crate::store::MemoryStore;

/// Key the demo endpoints operate on.
pub const DEMO_KEY: &str = "666";

/// Words written by `GET /set`.
pub const DEMO_WORDS: [&str; 3] = ["哈哈哈", "嘤嘤嘤", "嘎嘎嘎"];

/// Word removed by `GET /del`.
pub const DEMO_REMOVED_WORD: &str = "哈哈哈";

/// Application state shared across all handlers.
///
/// The facade is cheap to clone and holds no per-request state.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Typed cache operations
    pub cache: CacheFacade,
}

impl AppState {
    /// Creates a new AppState around the given facade.
    pub fn new(cache: CacheFacade) -> Self {
        Self { cache }
    }

    /// Creates an AppState over a fresh in-memory store.
    pub fn memory(list_write_mode: ListWriteMode) -> Self {
        let client = CacheClient::memory(Arc::new(MemoryStore::new()));
        Self::new(CacheFacade::new(client, list_write_mode))
    }
}

/// Reads the demo list and logs its size and contents.
async fn log_demo_list(cache: &CacheFacade) -> Result<Vec<CacheValue>> {
    let size = cache.list_size(DEMO_KEY).await?;
    let items: Vec<CacheValue> = cache.list_get(DEMO_KEY, 0, -1).await?;

    info!("list size: {}", size);
    info!("list contents: {}", CacheValue::List(items.clone()));

    Ok(items)
}

/// Handler for GET /set
///
/// Writes the demo words under the demo key, then logs the list.
pub async fn set_handler(State(state): State<AppState>) -> Result<&'static str> {
    let words: Vec<CacheValue> = DEMO_WORDS.iter().map(|w| CacheValue::from(*w)).collect();
    state.cache.list_set(DEMO_KEY, &words).await?;

    log_demo_list(&state.cache).await?;

    Ok("set success~")
}

/// Handler for GET /get
///
/// Logs the size and full contents of the demo list.
pub async fn get_handler(State(state): State<AppState>) -> Result<&'static str> {
    log_demo_list(&state.cache).await?;

    Ok("get success")
}

/// Handler for GET /del
///
/// Removes every occurrence of the demo word, then logs the list.
pub async fn delete_handler(State(state): State<AppState>) -> Result<&'static str> {
    let removed = state
        .cache
        .list_remove(DEMO_KEY, 0, &CacheValue::from(DEMO_REMOVED_WORD))
        .await?;
    info!("removed {} occurrence(s) of {}", removed, DEMO_REMOVED_WORD);

    log_demo_list(&state.cache).await?;

    Ok("delete success")
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(values: &[&str]) -> Vec<CacheValue> {
        values.iter().map(|v| CacheValue::from(*v)).collect()
    }

    #[tokio::test]
    async fn test_set_get_del_sequence() {
        let state = AppState::memory(ListWriteMode::Append);

        assert_eq!(set_handler(State(state.clone())).await.unwrap(), "set success~");
        let items = log_demo_list(&state.cache).await.unwrap();
        assert_eq!(items, texts(&DEMO_WORDS));

        assert_eq!(get_handler(State(state.clone())).await.unwrap(), "get success");

        assert_eq!(
            delete_handler(State(state.clone())).await.unwrap(),
            "delete success"
        );
        let items = log_demo_list(&state.cache).await.unwrap();
        assert_eq!(items, texts(&["嘤嘤嘤", "嘎嘎嘎"]));
    }

    #[tokio::test]
    async fn test_repeated_set_appends() {
        let state = AppState::memory(ListWriteMode::Append);

        set_handler(State(state.clone())).await.unwrap();
        set_handler(State(state.clone())).await.unwrap();

        assert_eq!(state.cache.list_size(DEMO_KEY).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_repeated_set_replaces() {
        let state = AppState::memory(ListWriteMode::Replace);

        set_handler(State(state.clone())).await.unwrap();
        set_handler(State(state.clone())).await.unwrap();

        assert_eq!(state.cache.list_size(DEMO_KEY).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_del_on_empty_key() {
        let state = AppState::memory(ListWriteMode::Append);

        assert_eq!(
            delete_handler(State(state.clone())).await.unwrap(),
            "delete success"
        );
        assert_eq!(state.cache.list_size(DEMO_KEY).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_on_wrong_type_fails() {
        let state = AppState::memory(ListWriteMode::Append);
        state
            .cache
            .set(DEMO_KEY, &CacheValue::from("not a list"))
            .await
            .unwrap();

        assert!(get_handler(State(state)).await.is_err());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
