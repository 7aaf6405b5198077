use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::orchestrator::{self, ChatOutcome};
use crate::chat::search::SearchHit;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub resume_id: Option<String>,
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub found: bool,
    pub answer: String,
    pub matches: Vec<SearchHit>,
}

impl From<ChatOutcome> for ChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        ChatResponse {
            found: outcome.found,
            answer: outcome.answer,
            matches: outcome.matches,
        }
    }
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let resume_id = req
        .resume_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("resumeId is required".to_string()))?;
    let question = req
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation("question is required and must be a non-empty string".to_string())
        })?;

    // An id that doesn't parse can't name a stored resume.
    let id = Uuid::parse_str(resume_id.trim())
        .map_err(|_| AppError::NotFound("Resume not found".to_string()))?;
    let resume = state
        .resumes
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    let outcome = orchestrator::answer_question(&resume, &question, state.completer.as_ref()).await;
    Ok(Json(outcome.into()))
}
