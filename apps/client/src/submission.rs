//! Submission Controller — validates, performs the exchange, resolves the form.
//!
//! `submit` runs the whole cycle. The three steps are also exposed separately
//! (`FormState::begin_submission`, `exchange`, `settle`) so a caller that lets the
//! form change while a request is in flight still routes the outcome through the
//! generation check.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{BlockReason, ScoringError};
use crate::form::{FormState, SubmissionTicket};
use crate::scoring_client::models::ScoreResult;
use crate::scoring_client::ScoringService;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// No request was sent; the form is unchanged.
    Blocked(BlockReason),
    Succeeded,
    Failed(String),
    /// The response belonged to a superseded submission and was dropped.
    Discarded,
}

#[derive(Clone)]
pub struct SubmissionController {
    service: Arc<dyn ScoringService>,
}

impl SubmissionController {
    pub fn new(service: Arc<dyn ScoringService>) -> Self {
        Self { service }
    }

    pub async fn submit(&self, form: &mut FormState) -> SubmitOutcome {
        self.submit_observed(form, |_| {}).await
    }

    /// Like `submit`, calling `on_change` after each lifecycle transition: once on
    /// entering `Loading`, once more when the outcome is applied. Blocked submits
    /// change nothing and do not call it.
    pub async fn submit_observed(
        &self,
        form: &mut FormState,
        mut on_change: impl FnMut(&FormState),
    ) -> SubmitOutcome {
        if form.lifecycle().is_loading() {
            return SubmitOutcome::Blocked(BlockReason::InFlight);
        }

        let ticket = match form.begin_submission() {
            Ok(ticket) => ticket,
            Err(reason) => {
                info!("Submit blocked: {reason}");
                return SubmitOutcome::Blocked(reason);
            }
        };

        on_change(form);

        let outcome = self.exchange(&ticket).await;
        let settled = self.settle(form, &ticket, outcome);
        if settled != SubmitOutcome::Discarded {
            on_change(form);
        }
        settled
    }

    /// Sends the ticket's snapshot to the scoring service.
    pub async fn exchange(&self, ticket: &SubmissionTicket) -> Result<ScoreResult, ScoringError> {
        let request = &ticket.request;
        info!(
            "Submitting {} ({} bytes) as {}",
            request.resume.file_name,
            request.resume.size_bytes(),
            request.request_id
        );
        self.service.score(request).await
    }

    /// Applies an exchange outcome to the form, unless the ticket is stale.
    pub fn settle(
        &self,
        form: &mut FormState,
        ticket: &SubmissionTicket,
        outcome: Result<ScoreResult, ScoringError>,
    ) -> SubmitOutcome {
        let applied = match outcome {
            Ok(result) => form
                .resolve_success(ticket, result)
                .map(|()| SubmitOutcome::Succeeded),
            Err(err) => {
                warn!("Submission {} failed: {err}", ticket.request.request_id);
                let message = err.user_message();
                form.resolve_failure(ticket, message.clone())
                    .map(|()| SubmitOutcome::Failed(message))
            }
        };

        match applied {
            Ok(outcome) => {
                info!(
                    "Submission {} resolved: {} (generation {})",
                    ticket.request.request_id,
                    form.lifecycle().as_str(),
                    form.generation()
                );
                outcome
            }
            Err(err) => {
                warn!("Discarding result of {}: {err}", ticket.request.request_id);
                SubmitOutcome::Discarded
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::errors::GENERIC_FAILURE_MESSAGE;
    use crate::form::{LifecycleState, ResumeFile};
    use crate::scoring_client::models::HealthStatus;
    use crate::scoring_client::ScoreRequest;

    enum Reply {
        Score(ScoreResult),
        Detail(Option<&'static str>),
        Malformed,
    }

    struct FakeService {
        reply: Reply,
        calls: AtomicUsize,
        last_request: Mutex<Option<ScoreRequest>>,
    }

    impl FakeService {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ScoringService for FakeService {
        async fn score(&self, request: &ScoreRequest) -> Result<ScoreResult, ScoringError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            match &self.reply {
                Reply::Score(result) => Ok(result.clone()),
                Reply::Detail(detail) => Err(ScoringError::Service {
                    status: 422,
                    detail: detail.map(str::to_string),
                }),
                Reply::Malformed => Err(ScoringError::Malformed(
                    serde_json::from_str::<ScoreResult>("{}").unwrap_err(),
                )),
            }
        }

        async fn health(&self) -> Result<HealthStatus, ScoringError> {
            Ok(HealthStatus {
                status: "ok".to_string(),
            })
        }
    }

    fn scenario_result() -> ScoreResult {
        ScoreResult {
            score: 7.0,
            coverage_percentage: 70.0,
            matched_keywords: vec!["python".to_string()],
            missing_keywords: vec!["sql".to_string(), "docker".to_string()],
            suggestions: vec!["Add SQL experience".to_string()],
            title: None,
            resume_char_count: None,
            jd_char_count: None,
        }
    }

    fn ready_form() -> FormState {
        let mut form = FormState::new();
        form.set_resume_file(Some(ResumeFile::new("cv.pdf", &b"%PDF-1.4"[..])));
        form.set_job_description("Looking for a Python engineer");
        form
    }

    #[tokio::test]
    async fn test_submit_success_stores_parsed_result() {
        let service = FakeService::new(Reply::Score(scenario_result()));
        let controller = SubmissionController::new(service.clone());
        let mut form = ready_form();

        assert_eq!(controller.submit(&mut form).await, SubmitOutcome::Succeeded);
        assert_eq!(
            form.lifecycle(),
            &LifecycleState::Succeeded(scenario_result())
        );
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_submit_without_file_sends_nothing() {
        let service = FakeService::new(Reply::Score(scenario_result()));
        let controller = SubmissionController::new(service.clone());
        let mut form = FormState::new();
        form.set_job_description("Looking for a Python engineer");

        assert_eq!(
            controller.submit(&mut form).await,
            SubmitOutcome::Blocked(BlockReason::MissingResume)
        );
        assert_eq!(form.lifecycle(), &LifecycleState::Idle);
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_without_job_description_sends_nothing() {
        let service = FakeService::new(Reply::Score(scenario_result()));
        let controller = SubmissionController::new(service.clone());
        let mut form = ready_form();
        form.set_job_description("");

        assert_eq!(
            controller.submit(&mut form).await,
            SubmitOutcome::Blocked(BlockReason::MissingJobDescription)
        );
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_while_loading_is_blocked() {
        let service = FakeService::new(Reply::Score(scenario_result()));
        let controller = SubmissionController::new(service.clone());
        let mut form = ready_form();
        let _in_flight = form.begin_submission().unwrap();

        assert_eq!(
            controller.submit(&mut form).await,
            SubmitOutcome::Blocked(BlockReason::InFlight)
        );
        assert_eq!(service.calls(), 0);
        assert_eq!(form.generation(), 1);
    }

    #[tokio::test]
    async fn test_submit_failure_uses_detail() {
        let service = FakeService::new(Reply::Detail(Some("Unsupported file type")));
        let controller = SubmissionController::new(service);
        let mut form = ready_form();

        assert_eq!(
            controller.submit(&mut form).await,
            SubmitOutcome::Failed("Unsupported file type".to_string())
        );
        assert_eq!(
            form.lifecycle(),
            &LifecycleState::Failed("Unsupported file type".to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_failure_without_detail_is_generic() {
        let service = FakeService::new(Reply::Detail(None));
        let controller = SubmissionController::new(service);
        let mut form = ready_form();

        controller.submit(&mut form).await;
        assert_eq!(
            form.lifecycle(),
            &LifecycleState::Failed(GENERIC_FAILURE_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_failure_with_empty_detail_is_generic() {
        let service = FakeService::new(Reply::Detail(Some("")));
        let controller = SubmissionController::new(service);
        let mut form = ready_form();

        assert_eq!(
            controller.submit(&mut form).await,
            SubmitOutcome::Failed(GENERIC_FAILURE_MESSAGE.to_string())
        );
        assert_eq!(
            form.lifecycle(),
            &LifecycleState::Failed(GENERIC_FAILURE_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_observed_sees_loading_then_result() {
        let controller = SubmissionController::new(FakeService::new(Reply::Score(scenario_result())));
        let mut form = ready_form();
        let mut seen = Vec::new();

        let outcome = controller
            .submit_observed(&mut form, |f| seen.push(f.lifecycle().clone()))
            .await;

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert_eq!(
            seen,
            vec![
                LifecycleState::Loading,
                LifecycleState::Succeeded(scenario_result())
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_observed_blocked_reports_nothing() {
        let controller = SubmissionController::new(FakeService::new(Reply::Score(scenario_result())));
        let mut form = FormState::new();
        let mut calls = 0;

        let outcome = controller.submit_observed(&mut form, |_| calls += 1).await;

        assert_eq!(outcome, SubmitOutcome::Blocked(BlockReason::MissingResume));
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_generic_failure() {
        let service = FakeService::new(Reply::Malformed);
        let controller = SubmissionController::new(service);
        let mut form = ready_form();

        controller.submit(&mut form).await;
        assert_eq!(
            form.lifecycle(),
            &LifecycleState::Failed(GENERIC_FAILURE_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_resubmission_replaces_previous_result() {
        let failing = SubmissionController::new(FakeService::new(Reply::Detail(Some("boom"))));
        let passing = SubmissionController::new(FakeService::new(Reply::Score(scenario_result())));
        let mut form = ready_form();

        failing.submit(&mut form).await;
        assert!(matches!(form.lifecycle(), LifecycleState::Failed(_)));

        passing.submit(&mut form).await;
        assert_eq!(
            form.lifecycle(),
            &LifecycleState::Succeeded(scenario_result())
        );
    }

    #[tokio::test]
    async fn test_request_uses_snapshot_not_later_edits() {
        let service = FakeService::new(Reply::Score(scenario_result()));
        let controller = SubmissionController::new(service.clone());
        let mut form = ready_form();

        let ticket = form.begin_submission().unwrap();
        form.set_job_description("Edited while in flight");
        let outcome = controller.exchange(&ticket).await;
        controller.settle(&mut form, &ticket, outcome);

        let sent = service.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent.job_description, "Looking for a Python engineer");
        assert_eq!(sent.position_title, "");
        assert_eq!(sent.request_id, ticket.request.request_id);
        assert!(matches!(form.lifecycle(), LifecycleState::Succeeded(_)));
        assert_eq!(form.input().job_description, "Edited while in flight");
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let service = FakeService::new(Reply::Score(scenario_result()));
        let controller = SubmissionController::new(service);
        let mut form = ready_form();

        let first = form.begin_submission().unwrap();
        let second = form.begin_submission().unwrap();

        let late = controller.settle(
            &mut form,
            &first,
            Err(ScoringError::Service {
                status: 500,
                detail: Some("old".to_string()),
            }),
        );
        assert_eq!(late, SubmitOutcome::Discarded);
        assert!(form.lifecycle().is_loading());

        let fresh = controller.settle(&mut form, &second, Ok(scenario_result()));
        assert_eq!(fresh, SubmitOutcome::Succeeded);
        assert_eq!(
            form.lifecycle(),
            &LifecycleState::Succeeded(scenario_result())
        );
    }
}
