use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::email::{EmailLogEntry, EmailLogRow, NewEmailLog};
use crate::models::resume::{NewResume, Resume, ResumeRow};

use super::{EmailLogRepository, ResumeRepository};

pub struct PgResumeRepository {
    pool: PgPool,
}

impl PgResumeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeRepository for PgResumeRepository {
    async fn create(&self, resume: NewResume) -> Result<Resume, AppError> {
        let row: ResumeRow = sqlx::query_as(
            r#"
            INSERT INTO resumes (id, original_name, mime_type, full_text, email, paragraphs, uploaded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&resume.original_name)
        .bind(&resume.mime_type)
        .bind(&resume.full_text)
        .bind(&resume.email)
        .bind(Json(&resume.paragraphs))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        let row: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Resume::from))
    }

    async fn latest(&self) -> Result<Option<Resume>, AppError> {
        let row: Option<ResumeRow> =
            sqlx::query_as("SELECT * FROM resumes ORDER BY uploaded_at DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Resume::from))
    }

    async fn list(&self) -> Result<Vec<Resume>, AppError> {
        let rows: Vec<ResumeRow> =
            sqlx::query_as("SELECT * FROM resumes ORDER BY uploaded_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Resume::from).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub struct PgEmailLogRepository {
    pool: PgPool,
}

impl PgEmailLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailLogRepository for PgEmailLogRepository {
    async fn create(&self, entry: NewEmailLog) -> Result<EmailLogEntry, AppError> {
        let row: EmailLogRow = sqlx::query_as(
            r#"
            INSERT INTO email_logs (id, recipient, subject, body, status, error, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&entry.to)
        .bind(&entry.subject)
        .bind(&entry.body)
        .bind(entry.status.as_str())
        .bind(&entry.error)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<EmailLogEntry>, AppError> {
        let rows: Vec<EmailLogRow> =
            sqlx::query_as("SELECT * FROM email_logs ORDER BY created_at DESC LIMIT $1")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(EmailLogEntry::from).collect())
    }
}
