//! Drafting layer: template generation, offline improvement hints, and prompts for the report model.

pub mod improve;
pub mod prompt;
pub mod templates;

pub use improve::{improvement_hints, template_improve};
pub use prompt::{SYSTEM_PROMPT, build_generate_prompt, build_improve_prompt, split_sections};
pub use templates::generate_sections;
