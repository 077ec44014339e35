//! Export reviewer feedback as binary preference data (prompt, completion, label).
//!
//! Each paragraph judgement becomes one example: a thumbs-up with no marked
//! words is desirable, anything else is undesirable. The fine-tuning
//! pipeline that consumes this file lives outside this workspace.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sred_core::{FeedbackRecord, Section};
use tracing::info;

use crate::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceExample {
    pub prompt: String,
    pub completion: String,
    pub label: bool,
}

fn section_title(section: Section) -> &'static str {
    match section {
        Section::Advancement => "Scientific or Technological Advancement",
        Section::Uncertainty => "Scientific or Technological Uncertainty",
        Section::Work => "Work Performed",
    }
}

pub fn export_preferences(records: &[FeedbackRecord]) -> Vec<PreferenceExample> {
    records
        .iter()
        .filter(|r| !r.paragraph.trim().is_empty())
        .map(|r| PreferenceExample {
            prompt: format!(
                "Write a paragraph for T661 Line {} ({}) of an SR&ED project description.",
                r.section.line(),
                section_title(r.section)
            ),
            completion: r.paragraph.clone(),
            label: r.is_positive(),
        })
        .collect()
}

/// Write examples for `records` to `path` as JSON Lines. Returns the number written.
pub fn write_preferences(records: &[FeedbackRecord], path: &Path) -> Result<usize, StoreError> {
    let examples = export_preferences(records);
    let mut out = BufWriter::new(File::create(path)?);
    for example in &examples {
        serde_json::to_writer(&mut out, example)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    info!(path = %path.display(), count = examples.len(), "wrote preference data");
    Ok(examples.len())
}
