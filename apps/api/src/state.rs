use std::sync::Arc;

use crate::email::mailer::Mailer;
use crate::llm_client::Completer;
use crate::repository::{EmailLogRepository, ResumeRepository};

/// Shared application state injected into all route handlers via Axum
/// extractors. Every dependency sits behind a trait so the storage and the
/// external services can be swapped without touching handler code.
#[derive(Clone)]
pub struct AppState {
    pub resumes: Arc<dyn ResumeRepository>,
    pub email_logs: Arc<dyn EmailLogRepository>,
    /// Completion service; a null object when no API key is configured.
    pub completer: Arc<dyn Completer>,
    /// Outreach transport; log-only when SMTP is not configured.
    pub mailer: Arc<dyn Mailer>,
}
