#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A blank-line-delimited unit of resume text. `order` is the zero-based
/// position in the document, used for stable display/citation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub order: i32,
}

/// A stored resume document. Immutable after creation except for deletion.
#[derive(Debug, Clone)]
pub struct Resume {
    pub id: Uuid,
    pub original_name: String,
    pub mime_type: String,
    pub full_text: String,
    pub paragraphs: Vec<Paragraph>,
    pub email: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// Upload payload before the store assigns an id and timestamp.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub original_name: String,
    pub mime_type: String,
    pub full_text: String,
    pub paragraphs: Vec<Paragraph>,
    pub email: Option<String>,
}

#[derive(Debug, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub original_name: String,
    pub mime_type: String,
    pub full_text: String,
    pub email: Option<String>,
    pub paragraphs: Json<Vec<Paragraph>>,
    pub uploaded_at: DateTime<Utc>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        Resume {
            id: row.id,
            original_name: row.original_name,
            mime_type: row.mime_type,
            full_text: row.full_text,
            paragraphs: row.paragraphs.0,
            email: row.email,
            uploaded_at: row.uploaded_at,
        }
    }
}
