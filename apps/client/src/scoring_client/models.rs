use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured score returned by `POST /score`.
///
/// The five scoring fields are required; a success body missing any of them is
/// rejected as malformed rather than rendered partially. The trailing fields are
/// echoed back by the service and may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,                // 0 – 10
    pub coverage_percentage: f64,  // 0 – 100
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_char_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jd_char_count: Option<u64>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Pulls a string `detail` out of a failure body, if there is one.
///
/// Validation failures carry `detail` as an array of objects; those, and an empty
/// string, are treated as if no detail was sent.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("detail")
        .and_then(Value::as_str)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}
