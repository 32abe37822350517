//! quizmate-report — report rendering for graded attempts.

pub mod markdown;
pub mod summary;

pub use markdown::{generate_markdown, write_markdown_report};
pub use summary::{format_duration, performance_blurb, performance_level};
