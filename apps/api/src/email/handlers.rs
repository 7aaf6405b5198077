use std::sync::OnceLock;

use axum::{extract::State, Json};
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::email::{EmailStatus, NewEmailLog};
use crate::state::AppState;

const EMAIL_LOG_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    pub to: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// POST /api/v1/email/send
///
/// Validation happens before any log entry is written; one entry is then
/// recorded per attempt, `sent` or `failed`.
pub async fn handle_send_email(
    State(state): State<AppState>,
    Json(req): Json<SendEmailRequest>,
) -> Result<Json<Value>, AppError> {
    let to = req
        .to
        .filter(|to| !to.trim().is_empty())
        .ok_or_else(|| AppError::Validation("to is required (recipient email)".to_string()))?;
    let subject = req
        .subject
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("subject is required".to_string()))?;
    let body = req
        .body
        .filter(|b| !b.trim().is_empty())
        .ok_or_else(|| AppError::Validation("body is required".to_string()))?;

    if !address_pattern().is_match(&to) {
        return Err(AppError::Validation(
            "to must be a valid email address".to_string(),
        ));
    }

    match state.mailer.send(&to, &subject, &body).await {
        Ok(()) => {
            state
                .email_logs
                .create(NewEmailLog {
                    to: to.clone(),
                    subject,
                    body,
                    status: EmailStatus::Sent,
                    error: None,
                })
                .await?;
            info!("email sent to {to}");
            Ok(Json(json!({ "success": true, "data": { "sentTo": to } })))
        }
        Err(e) => {
            state
                .email_logs
                .create(NewEmailLog {
                    to: to.clone(),
                    subject,
                    body,
                    status: EmailStatus::Failed,
                    error: Some(e.to_string()),
                })
                .await?;
            error!("email send to {to} failed: {e}");
            Err(AppError::Email(e))
        }
    }
}

/// GET /api/v1/email/logs
pub async fn handle_email_logs(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let logs = state.email_logs.recent(EMAIL_LOG_LIMIT).await?;
    Ok(Json(json!({ "success": true, "data": logs })))
}

fn address_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded email regex"))
}
