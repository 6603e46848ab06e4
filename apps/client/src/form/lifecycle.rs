use crate::scoring_client::models::ScoreResult;
use crate::scoring_client::ScoreRequest;

/// Where the form is in its submit cycle.
///
/// A single tagged state instead of separate loading / error / result slots, so a
/// stale error can never sit next to an in-flight request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LifecycleState {
    #[default]
    Idle,
    Loading,
    Succeeded(ScoreResult),
    Failed(String),
}

impl LifecycleState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LifecycleState::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Loading => "loading",
            LifecycleState::Succeeded(_) => "succeeded",
            LifecycleState::Failed(_) => "failed",
        }
    }
}

/// Handle for one submission, issued by `FormState::begin_submission`.
///
/// `request` is a snapshot of the form taken when the submission began; later edits
/// do not reach it. Only the ticket carrying the current `generation` may resolve
/// the form.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub generation: u64,
    pub request: ScoreRequest,
}
