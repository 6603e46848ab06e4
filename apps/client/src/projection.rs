//! Result Projector — display-ready data derived from a `ScoreResult`.
//!
//! Everything here is a pure function of the result and is recomputed on every
//! render; nothing is cached between renders.

use serde::Serialize;

use crate::scoring_client::models::ScoreResult;

/// The textual missing-keyword list shows at most this many entries.
pub const MISSING_DISPLAY_LIMIT: usize = 10;
pub const ELLIPSIS: &str = "...";
pub const EMPTY_MATCHED_PLACEHOLDER: &str = "None";

pub const MATCHED_LABEL: &str = "Matched";
pub const MISSING_LABEL: &str = "Missing";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: usize,
}

/// Two slices, always `Matched` then `Missing`, valued by the full list lengths.
/// Empty when there is no result.
pub fn project(result: Option<&ScoreResult>) -> Vec<ChartSlice> {
    let Some(result) = result else {
        return vec![];
    };
    vec![
        ChartSlice {
            label: MATCHED_LABEL,
            value: result.matched_keywords.len(),
        },
        ChartSlice {
            label: MISSING_LABEL,
            value: result.missing_keywords.len(),
        },
    ]
}

pub fn matched_keywords_text(keywords: &[String]) -> String {
    if keywords.is_empty() {
        EMPTY_MATCHED_PLACEHOLDER.to_string()
    } else {
        keywords.join(", ")
    }
}

/// First `MISSING_DISPLAY_LIMIT` entries joined by `", "`, with `...` appended when
/// the list was cut.
pub fn missing_keywords_text(keywords: &[String]) -> String {
    let shown = keywords
        .iter()
        .take(MISSING_DISPLAY_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if keywords.len() > MISSING_DISPLAY_LIMIT {
        format!("{shown}{ELLIPSIS}")
    } else {
        shown
    }
}
