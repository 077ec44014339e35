pub mod error;
pub mod feedback;
pub mod project;
pub mod report;
pub mod rules;
pub mod scorer;

pub use error::RuleError;
pub use feedback::{FeedbackRecord, Rating};
pub use project::{GeneratedSections, ProjectInput, SectionSelector};
pub use report::{OverallStatus, ReportAnalysis, ReportText, analyze_report};
pub use rules::{RuleBook, RuleSet, Section};
pub use scorer::{AnalysisResult, Issue, IssueKind, Status, analyze_section};
