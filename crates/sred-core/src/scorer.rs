//! Compliance scoring for a single T661 section.
//!
//! Matching is literal, case-insensitive substring containment over the
//! lower-cased text. The score is the weighted share of required elements
//! found, less flat penalties, rounded and clamped to `0..=100`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rules::{RuleSet, STRONG_PHRASES, WEAK_PHRASES};

/// Deducted per red-flag match.
pub const RED_FLAG_PENALTY: i64 = 10;
/// Deducted when the section is below `min_words`.
pub const SHORT_PENALTY: i64 = 10;
/// Deducted per distinct weak phrase.
pub const WEAK_PHRASE_PENALTY: i64 = 5;

pub const PASS_THRESHOLD: u8 = 75;
pub const WARNING_THRESHOLD: u8 = 50;

pub const EMPTY_SECTION_MESSAGE: &str =
    "Section is empty. Please provide content for this section.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Warning,
    Fail,
}

impl Status {
    /// `< 50` fails, `50..75` warns, `>= 75` passes.
    pub fn from_score(score: u8) -> Self {
        if score < WARNING_THRESHOLD {
            Self::Fail
        } else if score < PASS_THRESHOLD {
            Self::Warning
        } else {
            Self::Pass
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warning => "warning",
            Self::Fail => "fail",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Error,
    Warning,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    fn new(kind: IssueKind, message: String) -> Self {
        Self { kind, message }
    }
}

/// Whether a required element was detected. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCheck {
    pub name: String,
    pub found: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub status: Status,
    /// Element misses, red flags, word count, strong phrases, weak phrases, in that order.
    pub issues: Vec<Issue>,
    pub elements: Vec<ElementCheck>,
    /// `None` when the section was empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
}

impl AnalysisResult {
    fn empty() -> Self {
        Self {
            score: 0,
            status: Status::Fail,
            issues: vec![Issue::new(
                IssueKind::Error,
                EMPTY_SECTION_MESSAGE.to_string(),
            )],
            elements: Vec::new(),
            word_count: None,
        }
    }
}

/// Score `text` against `rules`.
///
/// Never fails: blank input (including a lone byte order mark) yields the
/// empty-section result, and a rule set with zero total weight scores 0
/// rather than dividing by zero.
pub fn analyze_section(text: &str, rules: &RuleSet) -> AnalysisResult {
    let trimmed = text.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        debug!(section = %rules.section_label, "empty section");
        return AnalysisResult::empty();
    }

    let lower = trimmed.to_lowercase();
    let word_count = trimmed.split_whitespace().count();

    let mut issues = Vec::new();
    let mut elements = Vec::with_capacity(rules.required_elements.len());
    let mut total: i64 = 0;
    let mut max: i64 = 0;

    for element in &rules.required_elements {
        max += i64::from(element.weight);
        let found = element.patterns.iter().any(|p| lower.contains(p.as_str()));
        if found {
            total += i64::from(element.weight);
        } else {
            let suggestions: Vec<String> = element
                .patterns
                .iter()
                .take(3)
                .map(|p| format!("\"{p}\""))
                .collect();
            issues.push(Issue::new(
                IssueKind::Warning,
                format!(
                    "Missing: {}. Consider including language such as {}.",
                    element.name,
                    suggestions.join(", ")
                ),
            ));
        }
        elements.push(ElementCheck {
            name: element.name.clone(),
            found,
        });
    }

    for flag in &rules.red_flags {
        if lower.contains(flag.pattern.as_str()) {
            issues.push(Issue::new(
                IssueKind::Error,
                format!("Red flag: \"{}\" - {}", flag.pattern, flag.issue),
            ));
            total -= RED_FLAG_PENALTY;
        }
    }

    if word_count < rules.min_words {
        issues.push(Issue::new(
            IssueKind::Warning,
            format!(
                "Too short: {word_count} words (minimum recommended: {}).",
                rules.min_words
            ),
        ));
        total -= SHORT_PENALTY;
    } else if word_count > rules.max_words {
        issues.push(Issue::new(
            IssueKind::Warning,
            format!(
                "Too long: {word_count} words (maximum recommended: {}).",
                rules.max_words
            ),
        ));
    }

    let strong: Vec<&str> = matching_phrases(&lower, STRONG_PHRASES);
    if !strong.is_empty() {
        let shown: Vec<&str> = strong.iter().take(3).copied().collect();
        issues.push(Issue::new(
            IssueKind::Success,
            format!("Strong SR&ED language detected: {}.", shown.join(", ")),
        ));
    }

    let weak: Vec<&str> = matching_phrases(&lower, WEAK_PHRASES);
    if !weak.is_empty() {
        issues.push(Issue::new(
            IssueKind::Warning,
            format!(
                "Weak language detected: {}. Use precise, technical language instead.",
                weak.join(", ")
            ),
        ));
        total -= WEAK_PHRASE_PENALTY * weak.len() as i64;
    }

    let score = percentage(total, max);
    let status = Status::from_score(score);

    debug!(
        section = %rules.section_label,
        score,
        status = status.as_str(),
        issues = issues.len(),
        word_count,
        "section analysed"
    );

    AnalysisResult {
        score,
        status,
        issues,
        elements,
        word_count: Some(word_count),
    }
}

fn matching_phrases<'a>(lower: &str, phrases: &[&'a str]) -> Vec<&'a str> {
    phrases
        .iter()
        .copied()
        .filter(|p| lower.contains(p))
        .collect()
}

/// `round(total / max * 100)` clamped to `0..=100`; 0 when `max` is 0.
fn percentage(total: i64, max: i64) -> u8 {
    if max <= 0 {
        return 0;
    }
    let pct = (total as f64 / max as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}
