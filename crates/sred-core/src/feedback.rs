//! Human feedback on generated report paragraphs.

use serde::{Deserialize, Serialize};

use crate::rules::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Up,
    Down,
}

/// One reviewer judgement on a paragraph of a generated report.
///
/// Appended to the local feedback log and pushed to the report AI server,
/// where it becomes preference-tuning data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: String,
    pub report_id: String,
    pub section: Section,
    pub paragraph_index: usize,
    pub paragraph: String,
    pub rating: Rating,
    /// Words the reviewer marked as bad within the paragraph.
    #[serde(default)]
    pub bad_words: Vec<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// ISO 8601 timestamp string.
    pub created_at: String,
}

impl FeedbackRecord {
    /// Approved without reservation: thumbs up and nothing marked.
    pub fn is_positive(&self) -> bool {
        self.rating == Rating::Up && self.bad_words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rating: Rating, bad_words: &[&str]) -> FeedbackRecord {
        FeedbackRecord {
            id: "fb-1".into(),
            report_id: "rpt-7".into(),
            section: Section::Uncertainty,
            paragraph_index: 2,
            paragraph: "It was uncertain whether the cache could stay coherent.".into(),
            rating,
            bad_words: bad_words.iter().map(|w| w.to_string()).collect(),
            comment: None,
            created_at: "2026-10-16T09:00:00Z".into(),
        }
    }

    #[test]
    fn positive_requires_up_and_no_marks() {
        assert!(record(Rating::Up, &[]).is_positive());
        assert!(!record(Rating::Up, &["basically"]).is_positive());
        assert!(!record(Rating::Down, &[]).is_positive());
    }

    #[test]
    fn json_uses_lowercase_tags() {
        let json = serde_json::to_value(record(Rating::Down, &["maybe"])).unwrap();
        assert_eq!(json["rating"], "down");
        assert_eq!(json["section"], "uncertainty");
        assert_eq!(json["bad_words"][0], "maybe");
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{
            "id": "fb-2",
            "report_id": "rpt-1",
            "section": "work",
            "paragraph_index": 0,
            "paragraph": "A systematic investigation was conducted.",
            "rating": "up",
            "created_at": "2026-10-16T09:00:00Z"
        }"#;
        let parsed: FeedbackRecord = serde_json::from_str(json).unwrap();
        assert!(parsed.bad_words.is_empty());
        assert!(parsed.comment.is_none());
        assert_eq!(parsed.section, Section::Work);
    }
}
