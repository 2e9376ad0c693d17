//! Remote task collection access.
//!
//! [`TaskStore`] is the seam the controller depends on; [`RestTaskStore`] speaks
//! the hosted PostgREST dialect over HTTP.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use shared::{
    domain::{Task, TaskId},
    error::{StoreError, StoreResult, WriteOp},
    protocol::{
        eq_filter, in_filter, CompletedPatch, NewTaskRow, RemoteErrorBody, DEFAULT_TABLE,
        ORDER_BY_CREATED_ASC, REST_PREFIX,
    },
};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const PLACEHOLDER_STORE_URL: &str = "YOUR_SUPABASE_URL";
pub const PLACEHOLDER_ANON_KEY: &str = "YOUR_SUPABASE_ANON_KEY";

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks, oldest first.
    async fn list(&self) -> StoreResult<Vec<Task>>;
    async fn create(&self, title: &str) -> StoreResult<Task>;
    async fn set_completed(&self, id: &TaskId, completed: bool) -> StoreResult<()>;
    async fn remove(&self, id: &TaskId) -> StoreResult<()>;
    /// Callers must not pass an empty id set.
    async fn remove_many(&self, ids: &[TaskId]) -> StoreResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),
    #[error("store url '{url}' is invalid: {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    collection_url: Url,
    anon_key: String,
}

impl StoreConfig {
    pub fn new(store_url: &str, anon_key: &str, table: &str) -> Result<Self, ConfigError> {
        let store_url = store_url.trim();
        let anon_key = anon_key.trim();
        if store_url.is_empty() || store_url == PLACEHOLDER_STORE_URL {
            return Err(ConfigError::Missing("store url"));
        }
        if anon_key.is_empty() || anon_key == PLACEHOLDER_ANON_KEY {
            return Err(ConfigError::Missing("anon key"));
        }

        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: store_url.to_string(),
            reason,
        };
        let mut base = Url::parse(store_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("url cannot be used as a base".into()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let table = match table.trim() {
            "" => DEFAULT_TABLE,
            table => table,
        };
        let collection_url = base
            .join(&format!("{REST_PREFIX}/{table}"))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            collection_url,
            anon_key: anon_key.to_string(),
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }
}

pub struct RestTaskStore {
    http: Client,
    config: StoreConfig,
}

impl RestTaskStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http
            .request(method, self.config.collection_url.clone())
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
    }
}

#[async_trait]
impl TaskStore for RestTaskStore {
    async fn list(&self) -> StoreResult<Vec<Task>> {
        debug!(op = "list", "dispatching store request");
        let response = dispatch(
            self.request(Method::GET)
                .query(&[("select", "*"), ("order", ORDER_BY_CREATED_ASC)]),
        )
        .await
        .map_err(StoreError::read)?;

        response
            .json::<Vec<Task>>()
            .await
            .map_err(|e| StoreError::read(format!("invalid task list from store: {e}")))
    }

    async fn create(&self, title: &str) -> StoreResult<Task> {
        debug!(op = "create", "dispatching store request");
        let response = dispatch(
            self.request(Method::POST)
                .header("Prefer", "return=representation")
                .json(&[NewTaskRow::pending(title)]),
        )
        .await
        .map_err(|message| StoreError::write(WriteOp::Create, message))?;

        let mut rows = response.json::<Vec<Task>>().await.map_err(|e| {
            StoreError::write(WriteOp::Create, format!("invalid created task from store: {e}"))
        })?;
        if rows.is_empty() {
            return Err(StoreError::write(
                WriteOp::Create,
                "store returned no row for the created task",
            ));
        }
        Ok(rows.swap_remove(0))
    }

    async fn set_completed(&self, id: &TaskId, completed: bool) -> StoreResult<()> {
        debug!(op = "update", task_id = %id, completed, "dispatching store request");
        dispatch(
            self.request(Method::PATCH)
                .query(&[("id", eq_filter(id))])
                .json(&CompletedPatch { completed }),
        )
        .await
        .map(drop)
        .map_err(|message| StoreError::write(WriteOp::Update, message))
    }

    async fn remove(&self, id: &TaskId) -> StoreResult<()> {
        debug!(op = "delete", task_id = %id, "dispatching store request");
        dispatch(self.request(Method::DELETE).query(&[("id", eq_filter(id))]))
            .await
            .map(drop)
            .map_err(|message| StoreError::write(WriteOp::Delete, message))
    }

    async fn remove_many(&self, ids: &[TaskId]) -> StoreResult<()> {
        debug!(op = "delete", count = ids.len(), "dispatching store request");
        dispatch(self.request(Method::DELETE).query(&[("id", in_filter(ids))]))
            .await
            .map(drop)
            .map_err(|message| StoreError::write(WriteOp::Delete, message))
    }
}

async fn dispatch(request: RequestBuilder) -> Result<Response, String> {
    let response = request.send().await.map_err(|e| e.to_string())?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(remote_error_message(status, &body))
}

fn remote_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<RemoteErrorBody>(body) {
        Ok(remote) if !remote.message.trim().is_empty() => remote.message,
        _ => match status.canonical_reason() {
            Some(reason) => format!("HTTP {} {reason}", status.as_u16()),
            None => format!("HTTP {}", status.as_u16()),
        },
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
