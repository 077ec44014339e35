use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule set '{label}' has no required elements")]
    NoRequiredElements { label: String },

    #[error("required element '{element}' in rule set '{label}' has weight zero")]
    ZeroWeight { label: String, element: String },

    #[error("required element '{element}' in rule set '{label}' has no patterns")]
    EmptyPatterns { label: String, element: String },

    #[error("required element '{element}' in rule set '{label}' has a blank pattern")]
    BlankPattern { label: String, element: String },

    #[error("red flag {index} in rule set '{label}' has a blank pattern")]
    BlankRedFlag { label: String, index: usize },

    #[error("rule set '{label}' has min_words {min} greater than max_words {max}")]
    WordBand { label: String, min: usize, max: usize },

    #[error("unknown section: {0} (expected 242, 244, 246, advancement, uncertainty or work)")]
    UnknownSection(String),

    #[error("rule book JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
