//! Structured project inputs and generated T661 sections.
//!
//! These travel over the wire to and from the report AI server, so field
//! names follow its camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::rules::Section;

/// Form inputs describing one SR&ED project. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectInput {
    pub title: String,
    pub field: String,
    pub objective: String,
    pub baseline: String,
    pub advancement: String,
    pub why_not_standard: String,
    /// One uncertainty per line.
    pub uncertainties: String,
    pub why_uncertain: String,
    /// One hypothesis per line.
    pub hypotheses: String,
    /// One experiment per line.
    pub experiments: String,
    /// One iteration per line.
    pub iterations: String,
    pub results: String,
    pub personnel: String,
}

/// Which lines to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionSelector {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "242")]
    Line242,
    #[serde(rename = "244")]
    Line244,
    #[serde(rename = "246")]
    Line246,
}

impl SectionSelector {
    pub fn includes(&self, section: Section) -> bool {
        match self {
            Self::All => true,
            Self::Line242 => section == Section::Advancement,
            Self::Line244 => section == Section::Uncertainty,
            Self::Line246 => section == Section::Work,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Line242 => "242",
            Self::Line244 => "244",
            Self::Line246 => "246",
        }
    }
}

impl From<Section> for SectionSelector {
    fn from(section: Section) -> Self {
        match section {
            Section::Advancement => Self::Line242,
            Section::Uncertainty => Self::Line244,
            Section::Work => Self::Line246,
        }
    }
}

impl std::str::FromStr for SectionSelector {
    type Err = crate::RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Section>().map(Self::from)
    }
}

/// Generated text per line; absent lines were not requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line242: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line244: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line246: Option<String>,
}

impl GeneratedSections {
    pub fn get(&self, section: Section) -> Option<&str> {
        match section {
            Section::Advancement => self.line242.as_deref(),
            Section::Uncertainty => self.line244.as_deref(),
            Section::Work => self.line246.as_deref(),
        }
    }

    pub fn set(&mut self, section: Section, text: String) {
        let slot = match section {
            Section::Advancement => &mut self.line242,
            Section::Uncertainty => &mut self.line244,
            Section::Work => &mut self.line246,
        };
        *slot = Some(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_input_reads_camel_case_and_defaults() {
        let json = r#"{
            "title": "Adaptive scheduler",
            "whyNotStandard": "no published method handles bursty loads",
            "experiments": "- load test\n- soak test"
        }"#;
        let p: ProjectInput = serde_json::from_str(json).unwrap();
        assert_eq!(p.title, "Adaptive scheduler");
        assert_eq!(p.why_not_standard, "no published method handles bursty loads");
        assert!(p.objective.is_empty());
    }

    #[test]
    fn selector_json_values() {
        assert_eq!(serde_json::to_string(&SectionSelector::All).unwrap(), "\"all\"");
        let s: SectionSelector = serde_json::from_str("\"244\"").unwrap();
        assert_eq!(s, SectionSelector::Line244);
    }

    #[test]
    fn selector_parses_from_cli_strings() {
        assert_eq!("ALL".parse::<SectionSelector>().unwrap(), SectionSelector::All);
        assert_eq!("246".parse::<SectionSelector>().unwrap(), SectionSelector::Line246);
        assert_eq!(
            "advancement".parse::<SectionSelector>().unwrap(),
            SectionSelector::Line242
        );
        assert!("999".parse::<SectionSelector>().is_err());
    }

    #[test]
    fn selector_includes() {
        assert!(SectionSelector::All.includes(Section::Work));
        assert!(SectionSelector::Line242.includes(Section::Advancement));
        assert!(!SectionSelector::Line242.includes(Section::Work));
    }

    #[test]
    fn generated_sections_skip_missing_lines() {
        let mut g = GeneratedSections::default();
        g.set(Section::Uncertainty, "LINE 244".into());
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"line244":"LINE 244"}"#);
        assert_eq!(g.get(Section::Uncertainty), Some("LINE 244"));
        assert_eq!(g.get(Section::Advancement), None);
    }
}
