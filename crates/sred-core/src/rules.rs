//! Static T661 rule sets for Lines 242, 244 and 246.
//!
//! Each section is scored against a [`RuleSet`]: weighted required elements
//! detected by lower-case substring patterns, red-flag phrases that signal
//! ineligible claims, and a recommended word band. The two global phrase
//! lists ([`STRONG_PHRASES`], [`WEAK_PHRASES`]) apply to every section.
//!
//! Rule sets are plain data. Custom sets can be loaded from JSON through
//! [`RuleBook::from_json`], which normalises patterns and validates every
//! set before it reaches the scorer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Phrases that read as well-formed SR&ED language. Reported, never scored.
pub const STRONG_PHRASES: &[&str] = &[
    "technological advancement",
    "technological uncertainty",
    "systematic investigation",
    "competent professional",
    "standard practice",
    "hypothesis",
    "experimental development",
    "it was uncertain whether",
    "knowledge base",
    "could not be resolved",
    "iteration",
    "prototype",
];

/// Hedging or informal phrases. Each distinct match costs 5 points.
pub const WEAK_PHRASES: &[&str] = &[
    "we think",
    "hopefully",
    "maybe",
    "kind of",
    "sort of",
    "basically",
    "obviously",
    "somewhat",
    "we believe",
    "it is easy",
];

/// One of the three T661 narrative lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Advancement,
    Uncertainty,
    Work,
}

impl Section {
    pub const ALL: [Section; 3] = [Self::Advancement, Self::Uncertainty, Self::Work];

    /// T661 line number.
    pub fn line(&self) -> u16 {
        match self {
            Self::Advancement => 242,
            Self::Uncertainty => 244,
            Self::Work => 246,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advancement => "advancement",
            Self::Uncertainty => "uncertainty",
            Self::Work => "work",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "242" | "advancement" => Ok(Self::Advancement),
            "244" | "uncertainty" => Ok(Self::Uncertainty),
            "246" | "work" => Ok(Self::Work),
            other => Err(RuleError::UnknownSection(other.to_string())),
        }
    }
}

/// A thematic component a section is expected to cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredElement {
    pub name: String,
    /// Lower-case substrings; any one present marks the element found.
    pub patterns: Vec<String>,
    pub weight: u32,
}

/// A phrase whose presence signals a weak or ineligible claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlag {
    pub pattern: String,
    pub issue: String,
}

/// Scoring rules for one T661 section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub section_label: String,
    pub required_elements: Vec<RequiredElement>,
    pub red_flags: Vec<RedFlag>,
    pub min_words: usize,
    pub max_words: usize,
}

impl RuleSet {
    /// Line 242 - Technological Advancement.
    pub fn advancement() -> Self {
        Self {
            section_label: "Line 242 - Technological Advancement".into(),
            required_elements: vec![
                element(
                    "Objective",
                    &["objective", "goal", "purpose", "sought to", "intended to"],
                    20,
                ),
                element(
                    "Baseline/State of Art",
                    &[
                        "baseline",
                        "state of the art",
                        "state of technology",
                        "existing",
                        "at the outset",
                        "prior to",
                    ],
                    25,
                ),
                element(
                    "Advancement Claimed",
                    &[
                        "advancement",
                        "novel",
                        "new knowledge",
                        "advance",
                        "improvement over",
                    ],
                    25,
                ),
                element(
                    "Why Not Standard Practice",
                    &[
                        "could not be achieved",
                        "standard practice",
                        "competent professional",
                        "not achievable",
                        "beyond the capabilities",
                    ],
                    20,
                ),
                element(
                    "Technical Approach",
                    &["algorithm", "architecture", "technique", "method", "process"],
                    10,
                ),
            ],
            red_flags: vec![
                flag(
                    "first to market",
                    "Market novelty is not a technological advancement.",
                ),
                flag(
                    "revenue",
                    "Financial outcomes do not demonstrate a technological advancement.",
                ),
                flag(
                    "customer",
                    "Customer benefits are business outcomes, not technological knowledge.",
                ),
                flag(
                    "new product",
                    "A new product alone is not an advancement; describe the technological knowledge gained.",
                ),
                flag(
                    "look and feel",
                    "Aesthetic or cosmetic changes are excluded from SR&ED.",
                ),
            ],
            min_words: 200,
            max_words: 800,
        }
    }

    /// Line 244 - Technological Uncertainty.
    pub fn uncertainty() -> Self {
        Self {
            section_label: "Line 244 - Technological Uncertainty".into(),
            required_elements: vec![
                element(
                    "Uncertainty Statement",
                    &[
                        "it was uncertain",
                        "uncertain",
                        "unknown",
                        "unclear",
                        "not known",
                    ],
                    25,
                ),
                element(
                    "Why Not Resolvable by Standard Practice",
                    &[
                        "competent professional",
                        "standard practice",
                        "publicly available",
                        "existing knowledge",
                        "could not be resolved",
                    ],
                    25,
                ),
                element(
                    "Hypotheses",
                    &["hypothes", "postulated", "theorized", "h1:", "predicted"],
                    20,
                ),
                element(
                    "Technical Obstacles",
                    &[
                        "obstacle",
                        "limitation",
                        "constraint",
                        "challenge",
                        "trade-off",
                    ],
                    15,
                ),
                element(
                    "Knowledge Base Review",
                    &[
                        "literature",
                        "knowledge base",
                        "prior art",
                        "published",
                        "review of",
                    ],
                    15,
                ),
            ],
            red_flags: vec![
                flag(
                    "business risk",
                    "Business or commercial risk is not technological uncertainty.",
                ),
                flag(
                    "budget",
                    "Cost uncertainty is a business concern, not a technological one.",
                ),
                flag("deadline", "Schedule pressure is not technological uncertainty."),
                flag(
                    "whether customers",
                    "Market acceptance is not technological uncertainty.",
                ),
                flag(
                    "lack of expertise",
                    "A gap in the team's own expertise is not technological uncertainty.",
                ),
            ],
            min_words: 200,
            max_words: 800,
        }
    }

    /// Line 246 - Work Performed.
    pub fn work() -> Self {
        Self {
            section_label: "Line 246 - Work Performed".into(),
            required_elements: vec![
                element(
                    "Systematic Investigation",
                    &[
                        "systematic",
                        "methodical",
                        "structured approach",
                        "investigation",
                    ],
                    25,
                ),
                element(
                    "Experiments & Tests",
                    &["experiment", "test", "prototype", "trial", "simulation"],
                    25,
                ),
                element(
                    "Iterations & Modifications",
                    &["iteration", "iterate", "modif", "revised", "refined"],
                    20,
                ),
                element(
                    "Results & Conclusions",
                    &[
                        "result",
                        "conclu",
                        "found that",
                        "demonstrated",
                        "determined",
                    ],
                    15,
                ),
                element(
                    "Qualified Personnel",
                    &["engineer", "scientist", "team", "researcher", "developer"],
                    15,
                ),
            ],
            red_flags: vec![
                flag("routine", "Routine work is excluded from SR&ED."),
                flag(
                    "quality control",
                    "Quality control and routine testing are excluded activities.",
                ),
                flag(
                    "data collection",
                    "Routine data collection is excluded unless it directly supports the investigation.",
                ),
                flag("bug fix", "Routine debugging is not experimental development."),
                flag("market research", "Market research is an excluded activity."),
            ],
            min_words: 300,
            max_words: 1200,
        }
    }

    /// Built-in rule set for a section.
    pub fn for_section(section: Section) -> Self {
        match section {
            Section::Advancement => Self::advancement(),
            Section::Uncertainty => Self::uncertainty(),
            Section::Work => Self::work(),
        }
    }

    /// Scoring denominator: the runtime sum of element weights.
    pub fn total_weight(&self) -> u64 {
        self.required_elements.iter().map(|e| u64::from(e.weight)).sum()
    }

    /// Reject rule sets the scorer cannot produce a meaningful percentage for.
    ///
    /// Every element needs a positive weight and at least one pattern, and no
    /// pattern may be blank: an empty pattern is a substring of every text.
    pub fn validate(&self) -> Result<(), RuleError> {
        let label = || self.section_label.clone();

        if self.required_elements.is_empty() {
            return Err(RuleError::NoRequiredElements { label: label() });
        }
        for e in &self.required_elements {
            let element = || e.name.clone();
            if e.weight == 0 {
                return Err(RuleError::ZeroWeight {
                    label: label(),
                    element: element(),
                });
            }
            if e.patterns.is_empty() {
                return Err(RuleError::EmptyPatterns {
                    label: label(),
                    element: element(),
                });
            }
            if e.patterns.iter().any(|p| p.trim().is_empty()) {
                return Err(RuleError::BlankPattern {
                    label: label(),
                    element: element(),
                });
            }
        }
        if let Some(index) = self.red_flags.iter().position(|f| f.pattern.trim().is_empty()) {
            return Err(RuleError::BlankRedFlag { label: label(), index });
        }
        if self.min_words > self.max_words {
            return Err(RuleError::WordBand {
                label: label(),
                min: self.min_words,
                max: self.max_words,
            });
        }
        Ok(())
    }

    /// Lower-case every pattern so matching against lower-cased text holds.
    fn normalize(&mut self) {
        for e in &mut self.required_elements {
            for p in &mut e.patterns {
                *p = p.to_lowercase();
            }
        }
        for f in &mut self.red_flags {
            f.pattern = f.pattern.to_lowercase();
        }
    }
}

/// One rule set per T661 section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBook {
    pub advancement: RuleSet,
    pub uncertainty: RuleSet,
    pub work: RuleSet,
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleBook {
    pub fn builtin() -> Self {
        Self {
            advancement: RuleSet::advancement(),
            uncertainty: RuleSet::uncertainty(),
            work: RuleSet::work(),
        }
    }

    /// Parse, normalise and validate a rule book from JSON.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let mut book: RuleBook = serde_json::from_str(json)?;
        for section in Section::ALL {
            let rules = book.get_mut(section);
            rules.normalize();
            rules.validate()?;
        }
        Ok(book)
    }

    pub fn get(&self, section: Section) -> &RuleSet {
        match section {
            Section::Advancement => &self.advancement,
            Section::Uncertainty => &self.uncertainty,
            Section::Work => &self.work,
        }
    }

    fn get_mut(&mut self, section: Section) -> &mut RuleSet {
        match section {
            Section::Advancement => &mut self.advancement,
            Section::Uncertainty => &mut self.uncertainty,
            Section::Work => &mut self.work,
        }
    }
}

fn element(name: &str, patterns: &[&str], weight: u32) -> RequiredElement {
    RequiredElement {
        name: name.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        weight,
    }
}

fn flag(pattern: &str, issue: &str) -> RedFlag {
    RedFlag {
        pattern: pattern.to_string(),
        issue: issue.to_string(),
    }
}
