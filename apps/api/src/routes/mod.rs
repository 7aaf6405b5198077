pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::chat::handlers::handle_chat;
use crate::email::handlers::{handle_email_logs, handle_send_email};
use crate::resume::handlers::{
    handle_delete_resume, handle_latest_resume, handle_list_resumes, handle_upload,
};
use crate::state::AppState;

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}

pub fn build_router(state: AppState, max_file_size: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resume/upload", post(handle_upload))
        .route("/api/v1/resume/list", get(handle_list_resumes))
        .route("/api/v1/resume", get(handle_latest_resume))
        .route("/api/v1/resume/:id", delete(handle_delete_resume))
        // Chat API
        .route("/api/v1/chat", post(handle_chat))
        // Email API
        .route("/api/v1/email/send", post(handle_send_email))
        .route("/api/v1/email/logs", get(handle_email_logs))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_file_size))
        .with_state(state)
}
