//! Plain-text rendering of a `View` for stdout.

use std::fmt::Write;

use crate::view::{ChartView, CoverageBar, FormView, ResultView, SliceColor, View};

const BAR_WIDTH: usize = 40;
const PREVIEW_CHARS: usize = 60;

const FILLED: char = '█';
const EMPTY: char = '·';
/// Used for every segment after the first when colors are off, so the two
/// categories stay distinguishable.
const ALT_FILLED: char = '▒';

#[derive(Debug, Clone, Copy)]
pub struct TerminalStyle {
    /// Emit 24-bit ANSI color escapes for the chart and legend.
    pub color: bool,
}

pub fn render_text(view: &View, style: TerminalStyle) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{}", "=".repeat(view.title.chars().count()));
    write_form(&mut out, &view.form);

    if let Some(message) = &view.error_banner {
        let _ = writeln!(out);
        let _ = writeln!(out, "Error: {message}");
    }

    if let Some(result) = &view.result {
        write_result(&mut out, result, style);
    }

    out
}

fn write_form(out: &mut String, form: &FormView) {
    let title = if form.position_title.is_empty() {
        "-"
    } else {
        form.position_title.as_str()
    };
    let _ = writeln!(out, "Position Title (optional): {title}");
    let _ = writeln!(
        out,
        "Job Description: {}",
        preview(&form.job_description, PREVIEW_CHARS)
    );
    match &form.resume {
        Some(resume) => {
            let _ = writeln!(
                out,
                "Resume: {} ({} bytes)",
                resume.file_name, resume.size_bytes
            );
        }
        None => {
            let _ = writeln!(out, "Resume: (no file selected)");
        }
    }

    let suffix = if form.submit.enabled { "" } else { " (disabled)" };
    let _ = writeln!(out, "[ {} ]{suffix}", form.submit.label);
}

fn write_result(out: &mut String, result: &ResultView, style: TerminalStyle) {
    let _ = writeln!(out);
    if let Some(title) = &result.position_title {
        let _ = writeln!(out, "Position: {title}");
    }
    let _ = writeln!(out, "Score: {}", result.score_label);
    let _ = writeln!(out, "Coverage: {}", coverage_bar(&result.coverage));
    if let (Some(resume), Some(jd)) = (result.resume_char_count, result.jd_char_count) {
        let _ = writeln!(out, "Analyzed: {resume} resume chars, {jd} job description chars");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Matched Keywords");
    let _ = writeln!(out, "  {}", result.matched_keywords);
    let _ = writeln!(out, "Missing Keywords (top 10)");
    let _ = writeln!(out, "  {}", result.missing_keywords);

    let _ = writeln!(out);
    let _ = writeln!(out, "Suggestions");
    for (i, suggestion) in result.suggestions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {suggestion}", i + 1);
    }

    if let Some(chart) = &result.chart {
        let _ = writeln!(out);
        let _ = writeln!(out, "Keyword Match Chart");
        write_chart(out, chart, style);
    }
}

fn coverage_bar(coverage: &CoverageBar) -> String {
    let filled = ((coverage.fill_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}] {}",
        FILLED.to_string().repeat(filled),
        EMPTY.to_string().repeat(BAR_WIDTH - filled),
        coverage.label
    )
}

fn write_chart(out: &mut String, chart: &ChartView, style: TerminalStyle) {
    let widths = segment_widths(
        &chart.segments.iter().map(|s| s.fraction).collect::<Vec<_>>(),
        BAR_WIDTH,
    );

    let mut bar = String::from("  [");
    for (i, (segment, width)) in chart.segments.iter().zip(&widths).enumerate() {
        let glyph = if style.color || i == 0 { FILLED } else { ALT_FILLED };
        let cells = glyph.to_string().repeat(*width);
        bar.push_str(&paint(&cells, segment.color, style));
    }
    bar.push(']');
    let _ = writeln!(out, "{bar}");

    for (i, segment) in chart.segments.iter().enumerate() {
        let glyph = if style.color || i == 0 { FILLED } else { ALT_FILLED };
        let _ = writeln!(
            out,
            "  {} {}: {} ({:.0}%)",
            paint(&glyph.to_string(), segment.color, style),
            segment.label,
            segment.value,
            segment.fraction * 100.0
        );
    }
}

/// Cell count per segment, rounded on cumulative boundaries so the widths
/// always add up to `width`.
fn segment_widths(fractions: &[f64], width: usize) -> Vec<usize> {
    let mut widths = Vec::with_capacity(fractions.len());
    let mut cumulative = 0.0;
    let mut previous = 0usize;
    for fraction in fractions {
        cumulative += fraction;
        let boundary = ((cumulative * width as f64).round() as usize).min(width);
        widths.push(boundary.saturating_sub(previous));
        previous = boundary.max(previous);
    }
    widths
}

fn paint(text: &str, color: SliceColor, style: TerminalStyle) -> String {
    if !style.color {
        return text.to_string();
    }
    let (r, g, b) = color.rgb;
    format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m")
}

fn preview(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let truncated = first_line.chars().count() > max_chars || text.lines().nth(1).is_some();
    let head: String = first_line.chars().take(max_chars).collect();
    if truncated {
        format!("{head}...")
    } else {
        head
    }
}
