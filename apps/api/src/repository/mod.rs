//! Persistence boundary. Handlers and the orchestrator only see these
//! traits; Postgres is an implementation detail behind them.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::email::{EmailLogEntry, NewEmailLog};
use crate::models::resume::{NewResume, Resume};

mod pg;
pub use pg::{PgEmailLogRepository, PgResumeRepository};

#[cfg(test)]
pub mod memory;

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn create(&self, resume: NewResume) -> Result<Resume, AppError>;

    async fn find(&self, id: Uuid) -> Result<Option<Resume>, AppError>;

    /// The most recently uploaded resume, if any.
    async fn latest(&self) -> Result<Option<Resume>, AppError>;

    /// All resumes, newest first.
    async fn list(&self) -> Result<Vec<Resume>, AppError>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait EmailLogRepository: Send + Sync {
    async fn create(&self, entry: NewEmailLog) -> Result<EmailLogEntry, AppError>;

    /// The `limit` most recent entries, newest first.
    async fn recent(&self, limit: i64) -> Result<Vec<EmailLogEntry>, AppError>;
}
