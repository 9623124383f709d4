//! Model-facing helpers for PCOS analysis and meal planning.
//!
//! This crate builds prompts, parses model replies into typed plans, and
//! supplies static fallbacks. It never calls a model itself; the host app
//! sends the prompt and hands the reply (or `None`) back.

pub mod extraction;
pub mod fallback;
pub mod prompts;
pub mod questionnaire;

pub use extraction::*;
pub use fallback::*;
pub use prompts::*;
pub use questionnaire::*;
