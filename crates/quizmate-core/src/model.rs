//! Core data model types for quizmate.
//!
//! These are the fundamental types the entire quizmate system uses to
//! represent a quiz, its questions, the learner's in-progress answers, and
//! the canonical per-question results after normalization.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of a question, as the system of record names it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "MCQ")]
    MultipleChoice,
    #[serde(rename = "True/False")]
    TrueFalse,
    #[serde(rename = "Short Answer")]
    ShortAnswer,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "MCQ"),
            QuestionKind::TrueFalse => write!(f, "True/False"),
            QuestionKind::ShortAnswer => write!(f, "Short Answer"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mcq" | "multiple choice" => Ok(QuestionKind::MultipleChoice),
            "true/false" | "true-false" => Ok(QuestionKind::TrueFalse),
            "short answer" | "short-answer" => Ok(QuestionKind::ShortAnswer),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// The six fixed cognitive categories, in taxonomy order.
pub const TAXONOMY: [CognitiveLevel; 6] = [
    CognitiveLevel::Remember,
    CognitiveLevel::Understand,
    CognitiveLevel::Apply,
    CognitiveLevel::Analyze,
    CognitiveLevel::Evaluate,
    CognitiveLevel::Create,
];

/// A label from the fixed cognitive taxonomy.
///
/// Parsing is total: a label outside the fixed six is carried verbatim as
/// `Other` and sorts after them. The `"Unknown"` sentinel used by the
/// results normalizer is an `Other` label like any other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CognitiveLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
    Other(String),
}

impl CognitiveLevel {
    /// The sentinel category assigned when a result carries no label.
    pub fn unknown() -> Self {
        CognitiveLevel::Other("Unknown".to_string())
    }

    /// Position in the fixed taxonomy; unrecognized labels sort last.
    pub fn rank(&self) -> usize {
        match self {
            CognitiveLevel::Remember => 0,
            CognitiveLevel::Understand => 1,
            CognitiveLevel::Apply => 2,
            CognitiveLevel::Analyze => 3,
            CognitiveLevel::Evaluate => 4,
            CognitiveLevel::Create => 5,
            CognitiveLevel::Other(_) => 6,
        }
    }

    /// Parse a label, matching the fixed six case-insensitively.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "remember" => CognitiveLevel::Remember,
            "understand" => CognitiveLevel::Understand,
            "apply" => CognitiveLevel::Apply,
            "analyze" => CognitiveLevel::Analyze,
            "evaluate" => CognitiveLevel::Evaluate,
            "create" => CognitiveLevel::Create,
            _ => CognitiveLevel::Other(label.trim().to_string()),
        }
    }
}

impl From<String> for CognitiveLevel {
    fn from(label: String) -> Self {
        CognitiveLevel::from_label(&label)
    }
}

impl From<CognitiveLevel> for String {
    fn from(level: CognitiveLevel) -> Self {
        level.to_string()
    }
}

impl fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CognitiveLevel::Remember => write!(f, "Remember"),
            CognitiveLevel::Understand => write!(f, "Understand"),
            CognitiveLevel::Apply => write!(f, "Apply"),
            CognitiveLevel::Analyze => write!(f, "Analyze"),
            CognitiveLevel::Evaluate => write!(f, "Evaluate"),
            CognitiveLevel::Create => write!(f, "Create"),
            CognitiveLevel::Other(label) => write!(f, "{label}"),
        }
    }
}

/// A single question within a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the quiz.
    pub id: i64,
    /// The question text shown to the learner.
    #[serde(rename = "question_text")]
    pub text: String,
    /// Question kind.
    #[serde(rename = "question_type")]
    pub kind: QuestionKind,
    /// Answer options, present for multiple-choice questions only.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Cognitive category this question exercises.
    #[serde(rename = "bloom_level")]
    pub level: CognitiveLevel,
    /// Page of the source document the question was generated from.
    #[serde(default)]
    pub source_page: Option<u32>,
    /// Snippet of source text explaining the expected answer.
    #[serde(default, rename = "source_context_snippet")]
    pub source_context: Option<String>,
}

/// A quiz descriptor as served by the system of record.
///
/// Immutable once loaded for an attempt. The optional `score` is the
/// backend's memory of a prior submission; decode it exactly once with
/// [`Quiz::attempt_status`] instead of re-checking the option ad hoc.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Whether this quiz has a completed attempt on record.
    pub fn attempt_status(&self) -> AttemptStatus {
        AttemptStatus::from_score(self.score)
    }
}

/// Completion state of a quiz attempt, decided once at the ingestion
/// boundary from the descriptor's optional score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptStatus {
    NotStarted,
    Completed { score: f64 },
}

impl AttemptStatus {
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(score) => AttemptStatus::Completed { score },
            None => AttemptStatus::NotStarted,
        }
    }
}

/// Dashboard summary of a quiz, without its questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    pub total_questions: u32,
    pub created_at: DateTime<Utc>,
}

/// The learner's in-progress answers, keyed by question id.
///
/// A question absent from the map is unanswered. Pure data: the session
/// controller decides when writes are allowed.
#[derive(Debug, Clone, Default)]
pub struct AnswerMap {
    answers: HashMap<i64, String>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the answer for a question, overwriting any prior value.
    pub fn set(&mut self, question_id: i64, answer: impl Into<String>) {
        self.answers.insert(question_id, answer.into());
    }

    pub fn get(&self, question_id: i64) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    pub fn is_answered(&self, question_id: i64) -> bool {
        self.answers.contains_key(&question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }
}

/// One entry of the wire submission payload, in quiz order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub question_id: i64,
    pub user_answer: String,
}

/// A per-question result after normalization.
///
/// `is_correct` is a genuine boolean here, never the numeric or
/// alternate-field forms the raw payload may carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub question_id: i64,
    pub question_text: String,
    /// Absent when the producer (e.g. a degraded stored payload) did not
    /// record the kind; passed through unchanged.
    #[serde(default)]
    pub question_type: Option<QuestionKind>,
    #[serde(rename = "bloom_level")]
    pub level: CognitiveLevel,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub source_page: Option<u32>,
    #[serde(default)]
    pub source_context: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_kind_display_and_parse() {
        assert_eq!(QuestionKind::MultipleChoice.to_string(), "MCQ");
        assert_eq!(QuestionKind::TrueFalse.to_string(), "True/False");
        assert_eq!(
            "mcq".parse::<QuestionKind>().unwrap(),
            QuestionKind::MultipleChoice
        );
        assert_eq!(
            "Short Answer".parse::<QuestionKind>().unwrap(),
            QuestionKind::ShortAnswer
        );
        assert!("essay".parse::<QuestionKind>().is_err());
    }

    #[test]
    fn cognitive_level_parse_is_total() {
        assert_eq!(CognitiveLevel::from_label("Remember"), CognitiveLevel::Remember);
        assert_eq!(CognitiveLevel::from_label("analyze"), CognitiveLevel::Analyze);
        assert_eq!(
            CognitiveLevel::from_label("Synthesis"),
            CognitiveLevel::Other("Synthesis".into())
        );
    }

    #[test]
    fn cognitive_level_ordering() {
        assert!(CognitiveLevel::Remember.rank() < CognitiveLevel::Create.rank());
        assert!(CognitiveLevel::Create.rank() < CognitiveLevel::unknown().rank());
        for pair in TAXONOMY.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn cognitive_level_label_roundtrip() {
        for level in TAXONOMY {
            assert_eq!(CognitiveLevel::from_label(&level.to_string()), level);
        }
        let odd = CognitiveLevel::Other("Synthesis".into());
        assert_eq!(CognitiveLevel::from_label(&odd.to_string()), odd);
    }

    #[test]
    fn attempt_status_decoded_from_score() {
        assert_eq!(AttemptStatus::from_score(None), AttemptStatus::NotStarted);
        assert_eq!(
            AttemptStatus::from_score(Some(85.0)),
            AttemptStatus::Completed { score: 85.0 }
        );
    }

    #[test]
    fn quiz_deserializes_backend_shape() {
        let json = serde_json::json!({
            "id": 7,
            "title": "Chapter 3",
            "description": null,
            "score": null,
            "total_questions": 2,
            "questions": [
                {
                    "id": 1,
                    "question_text": "What is the capital of France?",
                    "question_type": "Short Answer",
                    "options": null,
                    "bloom_level": "Remember",
                    "source_page": 4
                },
                {
                    "id": 2,
                    "question_text": "Photosynthesis produces oxygen.",
                    "question_type": "True/False",
                    "bloom_level": "Understand"
                }
            ]
        });
        let quiz: Quiz = serde_json::from_value(json).unwrap();
        assert_eq!(quiz.question_count(), 2);
        assert_eq!(quiz.attempt_status(), AttemptStatus::NotStarted);
        assert_eq!(quiz.questions[0].kind, QuestionKind::ShortAnswer);
        assert_eq!(quiz.questions[1].level, CognitiveLevel::Understand);
        assert_eq!(quiz.questions[0].source_page, Some(4));
    }

    #[test]
    fn answer_map_upserts() {
        let mut answers = AnswerMap::new();
        assert_eq!(answers.answered_count(), 0);
        answers.set(1, "A");
        answers.set(1, "B");
        answers.set(2, "True");
        assert_eq!(answers.answered_count(), 2);
        assert_eq!(answers.get(1), Some("B"));
        assert!(!answers.is_answered(3));
    }
}
