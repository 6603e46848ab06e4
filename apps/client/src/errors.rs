use thiserror::Error;

/// Banner text used whenever the service gives us nothing better to show.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// Failure of a single exchange with the scoring service.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service error (status {status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Service { status: u16, detail: Option<String> },

    #[error("Malformed score payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ScoringError {
    /// The message shown in the error banner.
    ///
    /// Only a service-reported `detail` is surfaced verbatim. Transport failures and
    /// malformed payloads collapse to the generic message.
    pub fn user_message(&self) -> String {
        match self {
            ScoringError::Service {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Why a submit action did not start a network exchange.
///
/// These never reach the error banner: an incomplete form behaves like a disabled
/// submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockReason {
    #[error("a resume file is required")]
    MissingResume,

    #[error("a job description is required")]
    MissingJobDescription,

    #[error("a submission is already in flight")]
    InFlight,
}

/// Rejected lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("stale submission {ticket} (current is {current})")]
    Stale { ticket: u64, current: u64 },

    #[error("no submission in flight")]
    NotLoading,
}
