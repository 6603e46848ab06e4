//! Form State Holder — owns the three inputs and the submit lifecycle.
//!
//! All mutation goes through the setters and the three transitions
//! (`begin_submission`, `resolve_success`, `resolve_failure`). Each submission bumps
//! a generation counter; resolutions carrying an older generation are rejected so a
//! late response can never overwrite a newer one.

pub mod lifecycle;

use std::path::Path;

use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{BlockReason, TransitionError};
use crate::scoring_client::models::ScoreResult;
use crate::scoring_client::ScoreRequest;

pub use lifecycle::{LifecycleState, SubmissionTicket};

/// A selected résumé file, read fully into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        Ok(Self::new(file_name, content))
    }

    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub resume_file: Option<ResumeFile>,
    pub job_description: String,
    /// Empty means unset.
    pub position_title: String,
}

#[derive(Debug, Default)]
pub struct FormState {
    input: FormInput,
    lifecycle: LifecycleState,
    generation: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn lifecycle(&self) -> &LifecycleState {
        &self.lifecycle
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_resume_file(&mut self, file: Option<ResumeFile>) {
        self.input.resume_file = file;
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.input.job_description = text.into();
    }

    pub fn set_position_title(&mut self, text: impl Into<String>) {
        self.input.position_title = text.into();
    }

    /// Enters `Loading`, dropping any previous result or error.
    ///
    /// Leaves the state untouched when a required field is missing.
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, BlockReason> {
        let Some(resume) = self.input.resume_file.clone() else {
            return Err(BlockReason::MissingResume);
        };
        if self.input.job_description.is_empty() {
            return Err(BlockReason::MissingJobDescription);
        }

        self.generation += 1;
        self.lifecycle = LifecycleState::Loading;

        let ticket = SubmissionTicket {
            generation: self.generation,
            request: ScoreRequest {
                request_id: Uuid::new_v4(),
                resume,
                job_description: self.input.job_description.clone(),
                position_title: self.input.position_title.clone(),
            },
        };
        debug!(
            "Submission {} started (generation {})",
            ticket.request.request_id, ticket.generation
        );
        Ok(ticket)
    }

    pub fn resolve_success(
        &mut self,
        ticket: &SubmissionTicket,
        result: ScoreResult,
    ) -> Result<(), TransitionError> {
        self.check_current(ticket)?;
        self.lifecycle = LifecycleState::Succeeded(result);
        Ok(())
    }

    pub fn resolve_failure(
        &mut self,
        ticket: &SubmissionTicket,
        message: impl Into<String>,
    ) -> Result<(), TransitionError> {
        self.check_current(ticket)?;
        self.lifecycle = LifecycleState::Failed(message.into());
        Ok(())
    }

    fn check_current(&self, ticket: &SubmissionTicket) -> Result<(), TransitionError> {
        if ticket.generation != self.generation {
            return Err(TransitionError::Stale {
                ticket: ticket.generation,
                current: self.generation,
            });
        }
        if !self.lifecycle.is_loading() {
            return Err(TransitionError::NotLoading);
        }
        Ok(())
    }
}
