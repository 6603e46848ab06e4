//! Scoring client — the network boundary of the workflow.
//!
//! `ScoringService` is the seam: the submission controller only ever talks to an
//! `Arc<dyn ScoringService>`. `HttpScoringClient` is the real implementation, posting
//! a three-part multipart form to `POST /score`.
//!
//! No retries. A failed exchange is reported once and the user resubmits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::ScoringError;
use crate::form::ResumeFile;

pub mod models;

use models::{extract_detail, HealthStatus, ScoreResult};

const SCORE_PATH: &str = "/score";
const HEALTH_PATH: &str = "/health";
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Everything sent for one scoring exchange.
#[derive(Debug, Clone)]
pub struct ScoreRequest {
    pub request_id: Uuid,
    pub resume: ResumeFile,
    pub job_description: String,
    /// Sent as an empty part when unset.
    pub position_title: String,
}

#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResult, ScoringError>;

    async fn health(&self) -> Result<HealthStatus, ScoringError>;
}

#[derive(Clone)]
pub struct HttpScoringClient {
    client: Client,
    score_url: Url,
    health_url: Url,
}

impl HttpScoringClient {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, ScoringError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            score_url: resolve(base_url, SCORE_PATH),
            health_url: resolve(base_url, HEALTH_PATH),
        })
    }

    pub fn score_url(&self) -> &Url {
        &self.score_url
    }
}

#[async_trait]
impl ScoringService for HttpScoringClient {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResult, ScoringError> {
        let resume = Part::bytes(request.resume.content.to_vec())
            .file_name(request.resume.file_name.clone())
            .mime_str(guess_mime(&request.resume.file_name))?;

        // reqwest sets the multipart/form-data content type and boundary.
        let form = Form::new()
            .part("resume", resume)
            .text("job_description", request.job_description.clone())
            .text("position_title", request.position_title.clone());

        let response = self
            .client
            .post(self.score_url.clone())
            .header(REQUEST_ID_HEADER, request.request_id.to_string())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = extract_detail(&body);
            warn!(
                "Scoring service returned {} for {}: {:?}",
                status, request.request_id, detail
            );
            return Err(ScoringError::Service {
                status: status.as_u16(),
                detail,
            });
        }

        let result: ScoreResult = serde_json::from_slice(&body)?;
        debug!(
            "Scored {}: score={}, coverage={}%",
            request.request_id, result.score, result.coverage_percentage
        );
        Ok(result)
    }

    async fn health(&self) -> Result<HealthStatus, ScoringError> {
        let response = self.client.get(self.health_url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ScoringError::Service {
                status: status.as_u16(),
                detail: extract_detail(&body),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Joins an absolute path onto the service base URL.
fn resolve(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let prefix = base.path().trim_end_matches('/');
    url.set_path(&format!("{prefix}{path}"));
    url
}

/// Content type for the résumé part. Advisory only; the service decides what it accepts.
fn guess_mime(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else if lower.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}
