//! The quiz backend trait and its wire shapes.
//!
//! The session controller only ever talks to the backend through
//! [`QuizService`]; the `quizmate-client` crate provides the HTTP
//! implementation and a mock for tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::model::{QuestionKind, Quiz, QuizSummary, SubmissionRecord};

/// Trait for the quiz system of record.
#[async_trait]
pub trait QuizService: Send + Sync {
    /// Human-readable backend name (e.g. "http").
    fn name(&self) -> &str;

    /// Fetch the full quiz descriptor for an attempt.
    async fn fetch_quiz(&self, quiz_id: i64) -> Result<Quiz, ServiceError>;

    /// Submit an attempt's answers and receive the graded raw payload.
    async fn submit_attempt(
        &self,
        quiz_id: i64,
        answers: &[SubmissionRecord],
    ) -> Result<RawSubmitResponse, ServiceError>;

    /// Fetch stored results from the system of record.
    ///
    /// Fails with `BadRequest` when the quiz was never submitted.
    async fn fetch_basic_results(&self, quiz_id: i64) -> Result<BasicResults, ServiceError>;

    /// Fetch the quiz descriptor again, used to recover category labels
    /// when rendering a degraded results view.
    async fn fetch_quiz_descriptor(&self, quiz_id: i64) -> Result<Quiz, ServiceError> {
        self.fetch_quiz(quiz_id).await
    }

    /// Export the quiz as an opaque binary document.
    async fn export_attempt(&self, quiz_id: i64) -> Result<Vec<u8>, ServiceError>;

    /// List the learner's quizzes.
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, ServiceError>;
}

/// The raw graded payload returned by a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSubmitResponse {
    pub score: f64,
    pub correct_answers: u32,
    pub total_questions: u32,
    #[serde(default)]
    pub results: Vec<RawResultEntry>,
}

/// Summary-only results fetched from the system of record.
///
/// `results` is usually empty (the degraded view); when the backend kept the
/// detailed payload of the last submission it is carried through as raw
/// entries for the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicResults {
    pub score: f64,
    pub total_questions: u32,
    pub quiz_title: String,
    #[serde(default)]
    pub correct_answers: Option<u32>,
    #[serde(default)]
    pub results: Vec<RawResultEntry>,
}

/// One per-question entry of a raw results payload, before normalization.
///
/// The payload may originate from two producers (the immediate submission
/// response vs. a stored fetch) with inconsistent shapes: the correctness
/// flag may arrive as a boolean or a number under either `is_correct` or
/// `correct`, and the category label under either `bloom_level` or
/// `cognitive_level`. The normalizer resolves both; nothing downstream of
/// it sees this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResultEntry {
    pub question_id: i64,
    #[serde(default)]
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionKind>,
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cognitive_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_context: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_entry_accepts_both_flag_shapes() {
        let boolean: RawResultEntry = serde_json::from_value(serde_json::json!({
            "question_id": 1,
            "question_text": "Q",
            "user_answer": "A",
            "correct_answer": "A",
            "is_correct": true,
            "bloom_level": "Remember"
        }))
        .unwrap();
        assert_eq!(boolean.is_correct, Some(serde_json::Value::Bool(true)));
        assert!(boolean.correct.is_none());

        let numeric: RawResultEntry = serde_json::from_value(serde_json::json!({
            "question_id": 2,
            "correct": 1,
            "cognitive_level": "Apply"
        }))
        .unwrap();
        assert!(numeric.is_correct.is_none());
        assert_eq!(numeric.correct, Some(serde_json::json!(1)));
        assert_eq!(numeric.cognitive_level.as_deref(), Some("Apply"));
    }

    #[test]
    fn submit_response_defaults_results() {
        let response: RawSubmitResponse = serde_json::from_value(serde_json::json!({
            "score": 50.0,
            "correct_answers": 1,
            "total_questions": 2
        }))
        .unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn basic_results_degraded_shape() {
        let basic: BasicResults = serde_json::from_value(serde_json::json!({
            "score": 80.0,
            "total_questions": 5,
            "quiz_title": "Chapter 3"
        }))
        .unwrap();
        assert!(basic.results.is_empty());
        assert!(basic.correct_answers.is_none());
    }
}
