//! Template-based drafting of T661 descriptions from structured inputs.
//!
//! Used when no fine-tuned model is available. Output is boilerplate that
//! already carries the phrasing the compliance scorer looks for.

use sred_core::{GeneratedSections, ProjectInput, Section, SectionSelector};
use tracing::debug;

pub const LINE_242_HEADER: &str = "LINE 242 - SCIENTIFIC OR TECHNOLOGICAL ADVANCEMENT";
pub const LINE_244_HEADER: &str = "LINE 244 - SCIENTIFIC OR TECHNOLOGICAL UNCERTAINTY";
pub const LINE_246_HEADER: &str = "LINE 246 - WORK PERFORMED";

const UNCERTAINTY_PREAMBLE: &str = "At the commencement of this project, the following \
technological uncertainties existed that could not be resolved by a competent professional in \
the field using standard practice, publicly available knowledge, or existing technical literature:";

const WORK_CLOSING: &str = "The work described above constitutes a systematic investigation \
carried out in a field of science or technology by means of experiment or analysis.";

/// Draft the selected lines from `project`.
pub fn generate_sections(project: &ProjectInput, selector: SectionSelector) -> GeneratedSections {
    let mut out = GeneratedSections::default();
    for section in Section::ALL {
        if !selector.includes(section) {
            continue;
        }
        let text = match section {
            Section::Advancement => advancement(project),
            Section::Uncertainty => uncertainty(project),
            Section::Work => work(project),
        };
        debug!(line = section.line(), chars = text.len(), "drafted section");
        out.set(section, text);
    }
    out
}

fn advancement(p: &ProjectInput) -> String {
    let field = or_default(&p.field, "technology");
    let mut s = format!("{LINE_242_HEADER}\n\n");

    if p.objective.trim().is_empty() {
        s.push_str(&format!(
            "The objective of this project was to achieve a technological advancement in the field of {field}.\n\n"
        ));
    } else {
        s.push_str(&format!(
            "The objective of this project was to achieve a technological advancement in the field of {field} through {}.\n\n",
            strip_period(&p.objective)
        ));
    }

    if !p.baseline.trim().is_empty() {
        s.push_str(&format!(
            "At the outset of this project, the state of technology was as follows: {}\n\n",
            p.baseline
        ));
    }

    if !p.advancement.trim().is_empty() {
        s.push_str(&format!(
            "The technological advancement sought was {}.\n\n",
            strip_period(&p.advancement)
        ));
    }

    if !p.why_not_standard.trim().is_empty() {
        s.push_str(&format!(
            "This advancement could not be achieved through standard practice because {}. \
             A competent professional in the field would not have been able to achieve this \
             advancement using existing knowledge, publicly available information, or standard \
             industry methodologies.",
            strip_period(&p.why_not_standard)
        ));
    }

    s.trim().to_string()
}

fn uncertainty(p: &ProjectInput) -> String {
    let mut s = format!("{LINE_244_HEADER}\n\n{UNCERTAINTY_PREAMBLE}\n\n");

    for (i, line) in lines(&p.uncertainties).enumerate() {
        let mut cleaned = line
            .trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | ')' | ' '))
            .trim()
            .to_string();
        if !cleaned.to_lowercase().starts_with("it was uncertain") {
            cleaned = format!("it was uncertain {cleaned}");
        }
        s.push_str(&format!("{}. {}\n\n", i + 1, capitalize(&cleaned)));
    }

    if !p.why_uncertain.trim().is_empty() {
        s.push_str(&format!(
            "These uncertainties could not be resolved by a competent professional through standard practice because {}.\n\n",
            strip_period(&p.why_uncertain)
        ));
    }

    let hypotheses: Vec<&str> = lines(&p.hypotheses).collect();
    if !hypotheses.is_empty() {
        s.push_str("To address these uncertainties, the following hypotheses were formulated:\n\n");
        for (i, h) in hypotheses.iter().enumerate() {
            s.push_str(&format!("H{}: {}\n", i + 1, strip_hypothesis_marker(h)));
        }
    }

    s.trim().to_string()
}

fn work(p: &ProjectInput) -> String {
    let mut s = format!("{LINE_246_HEADER}\n\n");

    if p.personnel.trim().is_empty() {
        s.push_str(
            "A systematic investigation was conducted to address the technological uncertainties identified above.\n\n",
        );
    } else {
        s.push_str(&format!(
            "A systematic investigation was conducted by a team of {} to address the technological uncertainties identified above.\n\n",
            p.personnel.trim()
        ));
    }

    push_bullets(
        &mut s,
        "The following experiments and tests were designed and performed as part of the systematic investigation:",
        &p.experiments,
    );
    push_bullets(
        &mut s,
        "Based on experimental results, the following iterations and modifications were made:",
        &p.iterations,
    );

    if !p.results.trim().is_empty() {
        s.push_str(&format!(
            "The systematic investigation yielded the following results and conclusions: {}\n\n",
            p.results
        ));
    }

    s.push_str(WORK_CLOSING);
    s.trim().to_string()
}

fn push_bullets(s: &mut String, intro: &str, items: &str) {
    let items: Vec<&str> = lines(items).collect();
    if items.is_empty() {
        return;
    }
    s.push_str(intro);
    s.push_str("\n\n");
    for item in items {
        let cleaned = item.trim_start_matches(['-', '•', '*', ' ']).trim();
        s.push_str(&format!("• {cleaned}\n"));
    }
    s.push('\n');
}

/// Non-blank, trimmed lines.
fn lines(s: &str) -> impl Iterator<Item = &str> {
    s.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Drop a leading list marker such as `H2:`, `3.` or `-`.
///
/// A leading `H` is only a marker when a digit follows it, so hypotheses
/// starting with words like "Higher" keep their first letter.
fn strip_hypothesis_marker(line: &str) -> &str {
    let mut rest = line.trim();
    if let Some(after) = rest.strip_prefix(['H', 'h'])
        && after.starts_with(|c: char| c.is_ascii_digit())
    {
        rest = after;
    }
    rest.trim_start_matches(|c: char| {
        c.is_ascii_digit() || matches!(c, '.' | '-' | ')' | ':' | ' ')
    })
    .trim()
}

fn strip_period(s: &str) -> &str {
    s.trim().trim_end_matches('.')
}

fn or_default<'a>(s: &'a str, default: &'a str) -> &'a str {
    let t = s.trim();
    if t.is_empty() { default } else { t }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sred_core::{RuleSet, analyze_section};

    fn project() -> ProjectInput {
        ProjectInput {
            title: "Adaptive dispatch".into(),
            field: "distributed systems".into(),
            objective: "a scheduler that adapts to bursty workloads.".into(),
            baseline: "Existing schedulers use static priority queues.".into(),
            advancement: "a feedback-driven scheduling algorithm.".into(),
            why_not_standard: "no published technique models burst correlation".into(),
            uncertainties: "1. whether latency could stay under 5 ms\n\n2) it was uncertain if \
                            the model would converge"
                .into(),
            why_uncertain: "the interaction between queues was not documented.".into(),
            hypotheses: "H1: a sliding window predicts bursts\nHigher sampling rates reduce error"
                .into(),
            experiments: "- load test at 10k rps\n* soak test for 48 h".into(),
            iterations: "• replaced EWMA with Kalman filter".into(),
            results: "Latency dropped by 40%.".into(),
            personnel: "three software engineers".into(),
        }
    }

    #[test]
    fn all_selector_drafts_three_lines() {
        let g = generate_sections(&project(), SectionSelector::All);
        assert!(g.line242.is_some());
        assert!(g.line244.is_some());
        assert!(g.line246.is_some());
    }

    #[test]
    fn single_selector_drafts_one_line() {
        let g = generate_sections(&project(), SectionSelector::Line244);
        assert!(g.line242.is_none());
        assert!(g.line244.is_some());
        assert!(g.line246.is_none());
    }

    #[test]
    fn advancement_strips_trailing_periods() {
        let g = generate_sections(&project(), SectionSelector::Line242);
        let text = g.line242.unwrap();
        assert!(text.starts_with(LINE_242_HEADER));
        assert!(text.contains(
            "in the field of distributed systems through a scheduler that adapts to bursty workloads.\n\n"
        ));
        assert!(text.contains("The technological advancement sought was a feedback-driven scheduling algorithm.\n"));
        assert!(text.ends_with("standard industry methodologies."));
    }

    #[test]
    fn advancement_defaults_field() {
        let g = generate_sections(&ProjectInput::default(), SectionSelector::Line242);
        assert_eq!(
            g.line242.unwrap(),
            format!(
                "{LINE_242_HEADER}\n\nThe objective of this project was to achieve a \
                 technological advancement in the field of technology."
            )
        );
    }

    #[test]
    fn uncertainties_are_numbered_and_prefixed() {
        let text = generate_sections(&project(), SectionSelector::Line244)
            .line244
            .unwrap();
        assert!(text.contains("1. It was uncertain whether latency could stay under 5 ms\n"));
        assert!(text.contains("2. It was uncertain if the model would converge\n"));
        assert!(text.contains("because the interaction between queues was not documented.\n"));
    }

    #[test]
    fn hypothesis_markers_stripped_but_words_kept() {
        let text = generate_sections(&project(), SectionSelector::Line244)
            .line244
            .unwrap();
        assert!(text.contains("H1: a sliding window predicts bursts\n"));
        assert!(text.ends_with("H2: Higher sampling rates reduce error"));
    }

    #[test]
    fn work_lists_experiments_and_iterations() {
        let text = generate_sections(&project(), SectionSelector::Line246)
            .line246
            .unwrap();
        assert!(text.contains("by a team of three software engineers"));
        assert!(text.contains("• load test at 10k rps\n• soak test for 48 h\n"));
        assert!(text.contains("• replaced EWMA with Kalman filter\n"));
        assert!(text.contains("results and conclusions: Latency dropped by 40%."));
        assert!(text.ends_with(WORK_CLOSING));
    }

    #[test]
    fn drafted_work_covers_every_required_element() {
        let text = generate_sections(&project(), SectionSelector::Line246)
            .line246
            .unwrap();
        let r = analyze_section(&text, &RuleSet::work());
        assert!(r.elements.iter().all(|e| e.found), "{:?}", r.elements);
    }
}
