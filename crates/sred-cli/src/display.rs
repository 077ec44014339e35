//! Report card display for T661 compliance analyses.
//!
//! Renders a [`ReportAnalysis`] as a vertical card: one block per line with
//! score, status, element checklist and issues, then the overall verdict and
//! recommendations.

use sred_core::{AnalysisResult, IssueKind, ReportAnalysis, RuleBook, Section, Status};

const BAR_WIDTH: usize = 20;

// ── Public API ──

pub fn print_report_card(analysis: &ReportAnalysis, rules: &RuleBook) {
    println!("=== T661 Compliance Report ===");
    println!();

    for section in Section::ALL {
        print_section(&rules.get(section).section_label, analysis.section(section));
    }

    println!("Overall");
    println!(
        "  {:<26} {} / 100  {}",
        "score",
        analysis.overall_score,
        score_bar(analysis.overall_score)
    );
    println!("  {:<26} {}", "verdict", analysis.overall_status.label());
    println!();

    if !analysis.recommendations.is_empty() {
        println!("Recommendations");
        for (i, rec) in analysis.recommendations.iter().enumerate() {
            println!("  {}. {}", i + 1, rec);
        }
        println!();
    }
}

// ── Section rendering ──

fn print_section(label: &str, result: &AnalysisResult) {
    println!("{label}");
    println!(
        "  {:<26} {} / 100  {}  [{}]",
        "score",
        result.score,
        score_bar(result.score),
        status_tag(result.status)
    );
    if let Some(words) = result.word_count {
        println!("  {:<26} {}", "words", words);
    }

    if !result.elements.is_empty() {
        println!("  elements:");
        for e in &result.elements {
            println!("    [{}] {}", if e.found { "x" } else { " " }, e.name);
        }
    }

    if !result.issues.is_empty() {
        println!("  issues:");
        for issue in &result.issues {
            println!("    {} {}", issue_marker(issue.kind), issue.message);
        }
    }
    println!();
}

// ── Helpers ──

fn status_tag(status: Status) -> &'static str {
    match status {
        Status::Pass => "PASS",
        Status::Warning => "WARN",
        Status::Fail => "FAIL",
    }
}

fn issue_marker(kind: IssueKind) -> &'static str {
    match kind {
        IssueKind::Error => "✗",
        IssueKind::Warning => "!",
        IssueKind::Success => "✓",
    }
}

/// Fixed-width bar, one cell per 5 points.
fn score_bar(score: u8) -> String {
    let filled = (usize::from(score.min(100)) * BAR_WIDTH) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
