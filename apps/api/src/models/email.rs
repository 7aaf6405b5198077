#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Outcome of a single send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Sent,
    Failed,
}

impl EmailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailStatus::Sent => "sent",
            EmailStatus::Failed => "failed",
        }
    }
}

/// Append-only record of one outreach email attempt. Never mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLogEntry {
    pub id: Uuid,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub status: EmailStatus,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEmailLog {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub status: EmailStatus,
    pub error: Option<String>,
}

#[derive(Debug, FromRow)]
pub struct EmailLogRow {
    pub id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<EmailLogRow> for EmailLogEntry {
    fn from(row: EmailLogRow) -> Self {
        EmailLogEntry {
            id: row.id,
            to: row.recipient,
            subject: row.subject,
            body: row.body,
            status: match row.status.as_str() {
                "failed" => EmailStatus::Failed,
                _ => EmailStatus::Sent,
            },
            error: row.error,
            created_at: row.created_at,
        }
    }
}
