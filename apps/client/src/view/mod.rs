//! Presentation Renderer — maps (lifecycle, form input) to a view description.
//!
//! `render` is pure and is called after every mutation; there is no incremental
//! update path. `terminal` turns the description into text, and `--json` prints it
//! as-is.

pub mod terminal;

use serde::Serialize;

use crate::form::{FormInput, LifecycleState};
use crate::projection::{matched_keywords_text, missing_keywords_text, project, ChartSlice};
use crate::scoring_client::models::ScoreResult;

pub const PAGE_TITLE: &str = "Resume–Job Match Scorer";
pub const SUBMIT_LABEL: &str = "Submit";
pub const SUBMITTING_LABEL: &str = "Scoring...";

/// Fixed per-position chart colors: the first slice is always "matched",
/// the second always "missing", whatever their values.
pub const SLICE_COLORS: [SliceColor; 2] = [
    SliceColor {
        hex: "#4caf50",
        rgb: (76, 175, 80),
    },
    SliceColor {
        hex: "#f44336",
        rgb: (244, 67, 54),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SliceColor {
    pub hex: &'static str,
    #[serde(skip)]
    pub rgb: (u8, u8, u8),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub title: &'static str,
    pub form: FormView,
    pub error_banner: Option<String>,
    pub result: Option<ResultView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    /// Fields stay editable in every state, including while a request is in flight.
    pub fields_enabled: bool,
    pub position_title: String,
    pub job_description: String,
    pub resume: Option<ResumeSummary>,
    pub submit: SubmitButton,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeSummary {
    pub file_name: String,
    pub size_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub position_title: Option<String>,
    pub score_label: String,
    pub coverage: CoverageBar,
    pub matched_keywords: String,
    pub missing_keywords: String,
    pub suggestions: Vec<String>,
    pub chart: Option<ChartView>,
    pub resume_char_count: Option<u64>,
    pub jd_char_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageBar {
    pub percentage: f64,
    /// `percentage` clamped to 0 – 100, used for sizing only.
    pub fill_percent: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub total: usize,
    pub segments: Vec<ChartSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSegment {
    pub label: &'static str,
    pub value: usize,
    pub fraction: f64,
    pub color: SliceColor,
}

pub fn render(state: &LifecycleState, input: &FormInput) -> View {
    let (error_banner, result) = match state {
        LifecycleState::Idle | LifecycleState::Loading => (None, None),
        LifecycleState::Failed(message) => (Some(message.clone()), None),
        LifecycleState::Succeeded(result) => (None, Some(render_result(result))),
    };

    View {
        title: PAGE_TITLE,
        form: render_form(state, input),
        error_banner,
        result,
    }
}

fn render_form(state: &LifecycleState, input: &FormInput) -> FormView {
    let submit = if state.is_loading() {
        SubmitButton {
            enabled: false,
            label: SUBMITTING_LABEL,
        }
    } else {
        SubmitButton {
            enabled: true,
            label: SUBMIT_LABEL,
        }
    };

    FormView {
        fields_enabled: true,
        position_title: input.position_title.clone(),
        job_description: input.job_description.clone(),
        resume: input.resume_file.as_ref().map(|f| ResumeSummary {
            file_name: f.file_name.clone(),
            size_bytes: f.size_bytes(),
        }),
        submit,
    }
}

fn render_result(result: &ScoreResult) -> ResultView {
    ResultView {
        position_title: result.title.clone(),
        score_label: format!("{}/10", format_number(result.score)),
        coverage: CoverageBar {
            percentage: result.coverage_percentage,
            fill_percent: clamp_percent(result.coverage_percentage),
            label: format!("{}%", format_number(result.coverage_percentage)),
        },
        matched_keywords: matched_keywords_text(&result.matched_keywords),
        missing_keywords: missing_keywords_text(&result.missing_keywords),
        suggestions: result.suggestions.clone(),
        chart: render_chart(&project(Some(result))),
        resume_char_count: result.resume_char_count,
        jd_char_count: result.jd_char_count,
    }
}

/// `None` when every slice is zero: there is nothing to draw proportions of.
fn render_chart(slices: &[ChartSlice]) -> Option<ChartView> {
    let total: usize = slices.iter().map(|s| s.value).sum();
    if total == 0 {
        return None;
    }

    let segments = slices
        .iter()
        .enumerate()
        .map(|(index, slice)| ChartSegment {
            label: slice.label,
            value: slice.value,
            fraction: slice.value as f64 / total as f64,
            color: SLICE_COLORS[index % SLICE_COLORS.len()],
        })
        .collect();

    Some(ChartView { total, segments })
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Integral values print without a fractional part (`7`, not `7.0`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
