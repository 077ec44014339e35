//! Offline improvement hints for an existing T661 draft.

use sred_core::Section;

pub const IMPROVEMENTS_HEADER: &str = "--- SUGGESTED IMPROVEMENTS ---";

/// Phrasing suggestions for anything key to `section` that `text` lacks.
pub fn improvement_hints(text: &str, section: Section) -> Vec<String> {
    let lower = text.to_lowercase();
    let has = |needle: &str| lower.contains(needle);
    let mut hints = Vec::new();

    match section {
        Section::Advancement => {
            if !has("technological advancement") {
                hints.push("Consider adding: 'The technological advancement sought was...'");
            }
            if !has("standard practice") && !has("competent professional") {
                hints.push(
                    "Consider adding: 'This could not be achieved through standard practice because...'",
                );
            }
            if !has("state of technology") && !has("baseline") {
                hints.push(
                    "Consider adding: 'At the outset of this project, the state of technology was...'",
                );
            }
        }
        Section::Uncertainty => {
            if !has("it was uncertain") {
                hints.push("Frame uncertainties as: 'It was uncertain whether...'");
            }
            if !has("competent professional") {
                hints.push(
                    "Add: 'A competent professional could not resolve these through standard practice because...'",
                );
            }
            if !has("hypothes") {
                hints.push("Consider adding hypotheses: 'H1: ...'");
            }
        }
        Section::Work => {
            if !has("systematic") {
                hints.push("Add: 'A systematic investigation was conducted...'");
            }
            if !has("experiment") && !has("test") {
                hints.push("Describe specific experiments and tests performed");
            }
            if !has("iteration") && !has("modif") {
                hints.push("Describe iterations/modifications made based on results");
            }
        }
    }

    hints.into_iter().map(String::from).collect()
}

/// Append a suggestions block to `text`; unchanged when nothing is missing.
pub fn template_improve(text: &str, section: Section) -> String {
    let hints = improvement_hints(text, section);
    if hints.is_empty() {
        return text.to_string();
    }
    let mut out = format!("{text}\n\n{IMPROVEMENTS_HEADER}\n");
    for hint in hints {
        out.push_str(&format!("• {hint}\n"));
    }
    out
}
