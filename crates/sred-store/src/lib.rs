//! Storage layer: append-only feedback log with an explicit sync cursor, and preference-data export.

mod error;
pub use error::StoreError;

mod log;
pub use log::FeedbackLog;

pub mod export;
pub use export::{PreferenceExample, export_preferences, write_preferences};
