//! quizmate-client — Quiz backend integrations.
//!
//! Implements the `QuizService` trait over HTTP for the real backend and
//! as an in-process mock for tests and offline development.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{load_config, load_config_from, ClientConfig};
pub use http::HttpQuizService;
pub use mock::MockQuizService;
