//! Remote task API
//!
//! `TaskApi` describes the six calls the client makes against the task server.
//! `HttpClient` is the blocking `ureq` implementation used at runtime; tests
//! substitute an in-memory fake.

mod http;

pub use http::HttpClient;

use thiserror::Error;

use crate::model::{Task, TaskDraft};

/// Default server used when neither config nor flags name one
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Why a single request failed.
///
/// Never shown to the user directly: callers wrap it in the
/// operation-specific `AppError` variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Server answered with a non-success status
    #[error("server responded with status {0}")]
    Status(u16),
    /// Connection, DNS or TLS failure
    #[error("transport error: {0}")]
    Transport(String),
    /// Success status but the body did not have the expected shape
    #[error("unexpected response body: {0}")]
    Decode(String),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Calls exposed by the task server.
///
/// Every method except `login` carries the bearer token explicitly; the
/// implementation holds no session state of its own.
pub trait TaskApi: Send + Sync {
    /// `POST /auth/login` (form-encoded), returns the `access_token`
    fn login(&self, username: &str, password: &str) -> ClientResult<String>;

    /// `GET /tasks`
    fn list_tasks(&self, token: &str) -> ClientResult<Vec<Task>>;

    /// `POST /tasks`
    fn create_task(&self, token: &str, draft: &TaskDraft) -> ClientResult<Task>;

    /// `DELETE /tasks/{id}`
    fn delete_task(&self, token: &str, id: i64) -> ClientResult<()>;

    /// `PUT /tasks/{id}`
    fn update_task(&self, token: &str, id: i64, draft: &TaskDraft) -> ClientResult<Task>;

    /// `POST /tasks/{id}/toggle`
    fn toggle_task(&self, token: &str, id: i64) -> ClientResult<Task>;
}
