use super::generator::{AvailabilityReport, GeneratedAssessment};
use super::question::{Difficulty, QuestionType};
use itertools::Itertools;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const DEFAULT_TITLE_WIDTH: usize = 48;

/// Plain-text preview of an assessment. Answers are never shown.
pub fn render_preview(assessment: &GeneratedAssessment, title_width: usize) -> String {
    let meta = &assessment.metadata;
    let types = QuestionType::ALL
        .iter()
        .map(|t| format!("{t} {}", meta.count_for(*t)))
        .join(", ");
    let difficulties = Difficulty::ALL
        .iter()
        .map(|d| format!("{d} {}", meta.difficulty_breakdown.get(*d)))
        .join(", ");

    let mut lines = vec![
        format!("Assessment preview: {}", assessment.config.module_id),
        format!(
            "{} questions, {} points, {} minutes",
            meta.total_questions, meta.total_points, meta.estimated_time_minutes
        ),
        format!("types: {types}"),
        format!("difficulty: {difficulties}"),
        String::new(),
    ];

    let number_width = assessment.questions.len().to_string().len();
    lines.extend(assessment.questions.iter().enumerate().map(|(i, q)| {
        format!(
            "{:>nw$}. {:<8} {:<12} {}",
            i + 1,
            q.question_type.to_string(),
            q.difficulty.to_string(),
            truncate_to_width(&q.title, title_width),
            nw = number_width,
        )
    }));

    to_text(lines)
}

pub fn render_availability(report: &AvailabilityReport) -> String {
    let mut lines = vec![format!(
        "module {}: {} questions in pool",
        report.module_id, report.pool_size
    )];
    lines.extend(report.types.iter().map(|t| {
        let mark = if t.is_sufficient() { "ok" } else { "SHORT" };
        format!(
            "  {:<8} required {:>3}  available {:>3}  {mark}",
            t.question_type.to_string(),
            t.required,
            t.available
        )
    }));
    let status = if report.is_ready() {
        "ready"
    } else {
        "not ready"
    };
    lines.push(format!("status: {status}"));

    to_text(lines)
}

fn to_text(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Cut `text` to at most `width` terminal columns, marking the cut with an ellipsis
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
