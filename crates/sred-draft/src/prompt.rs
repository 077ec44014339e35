//! Prompts for the fine-tuned report model and parsing of its output.

use sred_core::{GeneratedSections, ProjectInput, Section, SectionSelector};

pub const SYSTEM_PROMPT: &str = "You are an expert SR&ED (Scientific Research and Experimental \
Development) report writer specializing in CRA T661 form project descriptions. You generate \
compliant, detailed, and technically precise descriptions for Lines 242, 244, and 246. Always use \
proper SR&ED terminology: technological advancement, technological uncertainty, systematic \
investigation, hypothesis, competent professional, standard practice.";

const MARKER_244: &str = "LINE 244";
const MARKER_246: &str = "LINE 246";

fn selector_description(selector: SectionSelector) -> &'static str {
    match selector {
        SectionSelector::All => "all three sections (Lines 242, 244, and 246)",
        SectionSelector::Line242 => "Line 242 (Scientific or Technological Advancement)",
        SectionSelector::Line244 => "Line 244 (Scientific or Technological Uncertainty)",
        SectionSelector::Line246 => "Line 246 (Work Performed)",
    }
}

/// User prompt asking the model to draft the selected lines for `project`.
pub fn build_generate_prompt(project: &ProjectInput, selector: SectionSelector) -> String {
    let mut prompt = format!(
        "Write a T661 {} for the following project:\n\n",
        selector_description(selector)
    );
    prompt.push_str(&format!("Project Title: {}\n", or_na(&project.title)));
    prompt.push_str(&format!("Industry: {}\n", or_na(&project.field)));

    let optional = [
        ("Objective", &project.objective),
        ("Baseline Technology", &project.baseline),
        ("Advancement Sought", &project.advancement),
        ("Why Not Standard Practice", &project.why_not_standard),
        ("Uncertainties", &project.uncertainties),
        ("Why Uncertain", &project.why_uncertain),
        ("Hypotheses", &project.hypotheses),
        ("Experiments", &project.experiments),
        ("Iterations", &project.iterations),
        ("Results", &project.results),
        ("Personnel", &project.personnel),
    ];
    for (label, value) in optional {
        if !value.trim().is_empty() {
            prompt.push_str(&format!("{label}: {value}\n"));
        }
    }
    prompt
}

/// User prompt asking the model to rewrite `text` for CRA compliance.
pub fn build_improve_prompt(text: &str, section: Section) -> String {
    format!(
        "Improve the following T661 Line {} description to be more CRA-compliant. Fix any weak \
         language, add missing required elements, and ensure proper SR&ED terminology is used. \
         Keep the technical content accurate but strengthen the SR&ED compliance.\n\n\
         Original text:\n{text}\n\nImproved version:",
        section.line()
    )
}

/// Split a model response into lines.
///
/// A combined response is split on the `LINE 244` / `LINE 246` headings
/// when all three are present; otherwise the whole response is kept as
/// Line 242.
pub fn split_sections(response: &str, selector: SectionSelector) -> GeneratedSections {
    let mut out = GeneratedSections::default();
    let single = match selector {
        SectionSelector::All => None,
        SectionSelector::Line242 => Some(Section::Advancement),
        SectionSelector::Line244 => Some(Section::Uncertainty),
        SectionSelector::Line246 => Some(Section::Work),
    };
    if let Some(section) = single {
        out.set(section, response.to_string());
        return out;
    }

    let has_all = ["LINE 242", MARKER_244, MARKER_246]
        .iter()
        .all(|m| response.contains(m));
    if !has_all {
        out.line242 = Some(response.to_string());
        return out;
    }

    if let Some((before, after)) = response.split_once(MARKER_244) {
        out.line242 = Some(before.trim().to_string());
        match after.split_once(MARKER_246) {
            Some((unc, work)) => {
                out.line244 = Some(format!("{MARKER_244}{unc}").trim().to_string());
                out.line246 = Some(format!("{MARKER_246}{work}").trim().to_string());
            }
            None => out.line244 = Some(format!("{MARKER_244}{after}").trim().to_string()),
        }
    }
    out
}

fn or_na(s: &str) -> &str {
    if s.trim().is_empty() { "N/A" } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_prompt_skips_empty_fields() {
        let project = ProjectInput {
            title: "Adaptive dispatch".into(),
            objective: "cut tail latency".into(),
            ..Default::default()
        };
        let prompt = build_generate_prompt(&project, SectionSelector::Line242);
        assert!(prompt.starts_with(
            "Write a T661 Line 242 (Scientific or Technological Advancement) for the following project:\n\n"
        ));
        assert!(prompt.contains("Project Title: Adaptive dispatch\n"));
        assert!(prompt.contains("Industry: N/A\n"));
        assert!(prompt.contains("Objective: cut tail latency\n"));
        assert!(!prompt.contains("Baseline Technology"));
    }

    #[test]
    fn improve_prompt_names_line() {
        let prompt = build_improve_prompt("We built it.", Section::Uncertainty);
        assert!(prompt.contains("T661 Line 244 description"));
        assert!(prompt.contains("Original text:\nWe built it.\n\nImproved version:"));
    }

    #[test]
    fn split_combined_response() {
        let response = "LINE 242 - ADVANCEMENT\nA.\n\nLINE 244 - UNCERTAINTY\nB.\n\nLINE 246 - WORK\nC.";
        let g = split_sections(response, SectionSelector::All);
        assert_eq!(g.line242.as_deref(), Some("LINE 242 - ADVANCEMENT\nA."));
        assert_eq!(g.line244.as_deref(), Some("LINE 244 - UNCERTAINTY\nB."));
        assert_eq!(g.line246.as_deref(), Some("LINE 246 - WORK\nC."));
    }

    #[test]
    fn split_without_markers_keeps_everything_in_242() {
        let g = split_sections("free-form answer", SectionSelector::All);
        assert_eq!(g.line242.as_deref(), Some("free-form answer"));
        assert!(g.line244.is_none());
        assert!(g.line246.is_none());
    }

    #[test]
    fn split_out_of_order_markers() {
        let response = "LINE 242 x LINE 246 z LINE 244 y";
        let g = split_sections(response, SectionSelector::All);
        assert_eq!(g.line242.as_deref(), Some("LINE 242 x LINE 246 z"));
        assert_eq!(g.line244.as_deref(), Some("LINE 244 y"));
        assert!(g.line246.is_none());
    }

    #[test]
    fn split_single_section() {
        let g = split_sections("only work", SectionSelector::Line246);
        assert_eq!(g.line246.as_deref(), Some("only work"));
        assert!(g.line242.is_none());
    }
}
