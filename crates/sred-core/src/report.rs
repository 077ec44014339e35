//! Whole-report analysis across Lines 242, 244 and 246.

use serde::{Deserialize, Serialize};

use crate::rules::{RuleBook, Section};
use crate::scorer::{AnalysisResult, PASS_THRESHOLD, WARNING_THRESHOLD, analyze_section};

/// Maximum number of recommendations returned for a report.
pub const MAX_RECOMMENDATIONS: usize = 5;

const REC_ADVANCEMENT: &str = "Strengthen Line 242: state the baseline technology at the outset \
     and the specific technological advancement sought.";
const REC_UNCERTAINTY: &str = "Strengthen Line 244: frame each uncertainty as \"It was uncertain \
     whether...\" and explain why a competent professional could not resolve it through \
     standard practice.";
const REC_WORK: &str = "Strengthen Line 246: describe the systematic investigation, including \
     hypotheses, experiments, iterations and results.";
const REC_ADV_UNC_LINK: &str = "Check that each uncertainty in Line 244 maps directly to the \
     advancement claimed in Line 242.";
const REC_WORK_UNC_LINK: &str =
    "Check that the work in Line 246 addresses every uncertainty identified in Line 244.";
const REC_DOCUMENTATION: &str = "Keep contemporaneous records (lab notes, test logs, version \
     history) to support the claim during a CRA review.";

/// Raw text of the three narrative lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportText {
    #[serde(default)]
    pub advancement: String,
    #[serde(default)]
    pub uncertainty: String,
    #[serde(default)]
    pub work: String,
}

impl ReportText {
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Advancement => &self.advancement,
            Section::Uncertainty => &self.uncertainty,
            Section::Work => &self.work,
        }
    }

    /// True when every section is blank.
    pub fn is_blank(&self) -> bool {
        Section::ALL.iter().all(|s| self.get(*s).trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    NeedsWork,
    Moderate,
    Strong,
}

impl OverallStatus {
    pub fn from_score(score: u8) -> Self {
        if score < WARNING_THRESHOLD {
            Self::NeedsWork
        } else if score < PASS_THRESHOLD {
            Self::Moderate
        } else {
            Self::Strong
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NeedsWork => "Needs Work",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong Report",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAnalysis {
    pub advancement: AnalysisResult,
    pub uncertainty: AnalysisResult,
    pub work: AnalysisResult,
    pub overall_score: u8,
    pub overall_status: OverallStatus,
    pub recommendations: Vec<String>,
}

impl ReportAnalysis {
    pub fn section(&self, section: Section) -> &AnalysisResult {
        match section {
            Section::Advancement => &self.advancement,
            Section::Uncertainty => &self.uncertainty,
            Section::Work => &self.work,
        }
    }
}

/// Analyse all three sections and derive the overall score and recommendations.
pub fn analyze_report(report: &ReportText, rules: &RuleBook) -> ReportAnalysis {
    let advancement = analyze_section(&report.advancement, &rules.advancement);
    let uncertainty = analyze_section(&report.uncertainty, &rules.uncertainty);
    let work = analyze_section(&report.work, &rules.work);

    let overall = overall_score(&[advancement.score, uncertainty.score, work.score]);
    let recommendations = recommendations(advancement.score, uncertainty.score, work.score);

    ReportAnalysis {
        advancement,
        uncertainty,
        work,
        overall_score: overall,
        overall_status: OverallStatus::from_score(overall),
        recommendations,
    }
}

/// Rounded mean of the non-zero scores; 0 when every score is 0.
pub fn overall_score(scores: &[u8]) -> u8 {
    let scored: Vec<u32> = scores
        .iter()
        .filter(|&&s| s > 0)
        .map(|&s| u32::from(s))
        .collect();
    if scored.is_empty() {
        return 0;
    }
    let mean = scored.iter().sum::<u32>() as f64 / scored.len() as f64;
    mean.round().clamp(0.0, 100.0) as u8
}

/// Fixed-priority recommendations derived from the three section scores.
pub fn recommendations(advancement: u8, uncertainty: u8, work: u8) -> Vec<String> {
    let candidates = [
        (advancement < PASS_THRESHOLD, REC_ADVANCEMENT),
        (uncertainty < PASS_THRESHOLD, REC_UNCERTAINTY),
        (work < PASS_THRESHOLD, REC_WORK),
        (advancement > 0 && uncertainty > 0, REC_ADV_UNC_LINK),
        (work > 0 && uncertainty > 0, REC_WORK_UNC_LINK),
        (true, REC_DOCUMENTATION),
    ];
    candidates
        .iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, text)| text.to_string())
        .take(MAX_RECOMMENDATIONS)
        .collect()
}
