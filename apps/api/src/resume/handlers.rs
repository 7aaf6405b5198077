use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract;
use crate::models::resume::{NewResume, Resume};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub resume_id: Uuid,
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub resume_id: Uuid,
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub paragraph_count: usize,
    pub email: Option<String>,
}

impl ResumeSummary {
    fn from_resume(resume: &Resume) -> Self {
        ResumeSummary {
            resume_id: resume.id,
            original_name: resume.original_name.clone(),
            uploaded_at: resume.uploaded_at,
            paragraph_count: resume.paragraphs.len(),
            email: resume.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub resume_id: Uuid,
}

/// POST /api/v1/resume/upload (multipart, field `file`)
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            let original_name = field.file_name().unwrap_or("resume").to_string();
            let mime_type = field.content_type().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((original_name, mime_type, data));
            break;
        }
    }

    let (original_name, mime_type, data) =
        upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    if !extract::is_supported(&mime_type) {
        return Err(AppError::Validation(format!(
            "Unsupported file type: {mime_type}"
        )));
    }

    let full_text = extract::extract_text(&data, &mime_type)?;
    let paragraphs = extract::split_paragraphs(&full_text);
    let email = extract::extract_email(&full_text);

    info!(
        "parsed {original_name}: {} paragraphs, email {}",
        paragraphs.len(),
        email.as_deref().unwrap_or("none")
    );

    let resume = state
        .resumes
        .create(NewResume {
            original_name,
            mime_type,
            full_text,
            paragraphs,
            email,
        })
        .await?;

    Ok(Json(UploadResponse {
        resume_id: resume.id,
        original_name: resume.original_name,
        uploaded_at: resume.uploaded_at,
    }))
}

/// GET /api/v1/resume
///
/// Metadata for the latest uploaded resume.
pub async fn handle_latest_resume(
    State(state): State<AppState>,
) -> Result<Json<ResumeSummary>, AppError> {
    let resume = state
        .resumes
        .latest()
        .await?
        .ok_or_else(|| AppError::NotFound("No resume uploaded yet".to_string()))?;

    Ok(Json(ResumeSummary::from_resume(&resume)))
}

/// GET /api/v1/resume/list
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let resumes = state.resumes.list().await?;
    Ok(Json(
        resumes.iter().map(ResumeSummary::from_resume).collect(),
    ))
}

/// DELETE /api/v1/resume/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = Uuid::parse_str(id.trim())
        .map_err(|_| AppError::NotFound("Resume not found".to_string()))?;

    if !state.resumes.delete(id).await? {
        return Err(AppError::NotFound("Resume not found".to_string()));
    }

    Ok(Json(DeleteResponse {
        message: "Resume deleted successfully".to_string(),
        resume_id: id,
    }))
}
