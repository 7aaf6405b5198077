//! In-memory repository doubles for handler and orchestrator tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::email::{EmailLogEntry, NewEmailLog};
use crate::models::resume::{NewResume, Resume};

use super::{EmailLogRepository, ResumeRepository};

#[derive(Default)]
pub struct InMemoryResumeRepository {
    resumes: Mutex<Vec<Resume>>,
}

impl InMemoryResumeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeRepository for InMemoryResumeRepository {
    async fn create(&self, resume: NewResume) -> Result<Resume, AppError> {
        let stored = Resume {
            id: Uuid::new_v4(),
            original_name: resume.original_name,
            mime_type: resume.mime_type,
            full_text: resume.full_text,
            paragraphs: resume.paragraphs,
            email: resume.email,
            uploaded_at: Utc::now(),
        };
        self.resumes.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        Ok(self
            .resumes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn latest(&self) -> Result<Option<Resume>, AppError> {
        Ok(self.resumes.lock().unwrap().last().cloned())
    }

    async fn list(&self) -> Result<Vec<Resume>, AppError> {
        let mut all = self.resumes.lock().unwrap().clone();
        all.reverse();
        Ok(all)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut resumes = self.resumes.lock().unwrap();
        let before = resumes.len();
        resumes.retain(|r| r.id != id);
        Ok(resumes.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryEmailLogRepository {
    entries: Mutex<Vec<EmailLogEntry>>,
}

impl InMemoryEmailLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmailLogRepository for InMemoryEmailLogRepository {
    async fn create(&self, entry: NewEmailLog) -> Result<EmailLogEntry, AppError> {
        let stored = EmailLogEntry {
            id: Uuid::new_v4(),
            to: entry.to,
            subject: entry.subject,
            body: entry.body,
            status: entry.status,
            error: entry.error,
            created_at: Utc::now(),
        };
        self.entries.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<EmailLogEntry>, AppError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
