//! Mock quiz backend for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use quizmate_core::error::ServiceError;
use quizmate_core::model::{Quiz, QuizSummary, SubmissionRecord};
use quizmate_core::traits::{BasicResults, QuizService, RawResultEntry, RawSubmitResponse};

/// A mock quiz backend for exercising the session pipeline without a
/// server.
///
/// Grades submissions against a configured answer key the way the real
/// backend does (case-insensitive, trimmed comparison) and remembers the
/// grading so a later `fetch_basic_results` behaves like the system of
/// record.
pub struct MockQuizService {
    quiz: Option<Quiz>,
    /// Answer key: question id → correct answer.
    answer_key: HashMap<i64, String>,
    /// Grading of the most recent submission, if any.
    graded: Mutex<Option<RawSubmitResponse>>,
    /// Last submission payload received.
    last_submission: Mutex<Option<Vec<SubmissionRecord>>>,
    submit_count: AtomicU32,
}

impl MockQuizService {
    pub fn new(quiz: Quiz, answer_key: HashMap<i64, String>) -> Self {
        Self {
            quiz: Some(quiz),
            answer_key,
            graded: Mutex::new(None),
            last_submission: Mutex::new(None),
            submit_count: AtomicU32::new(0),
        }
    }

    /// A mock with no quiz: every fetch fails with `NotFound`.
    pub fn empty() -> Self {
        Self {
            quiz: None,
            answer_key: HashMap::new(),
            graded: Mutex::new(None),
            last_submission: Mutex::new(None),
            submit_count: AtomicU32::new(0),
        }
    }

    /// Number of submissions received.
    pub fn submit_count(&self) -> u32 {
        self.submit_count.load(Ordering::Relaxed)
    }

    /// The last submission payload received.
    pub fn last_submission(&self) -> Option<Vec<SubmissionRecord>> {
        self.last_submission.lock().unwrap().clone()
    }

    fn grade(&self, quiz: &Quiz, answers: &[SubmissionRecord]) -> RawSubmitResponse {
        let mut correct_answers = 0;
        let mut results = Vec::new();

        for answer in answers {
            let Some(question) = quiz.questions.iter().find(|q| q.id == answer.question_id)
            else {
                continue;
            };
            let expected = self
                .answer_key
                .get(&question.id)
                .cloned()
                .unwrap_or_default();
            let is_correct =
                expected.trim().to_lowercase() == answer.user_answer.trim().to_lowercase();
            if is_correct {
                correct_answers += 1;
            }

            results.push(RawResultEntry {
                question_id: question.id,
                question_text: question.text.clone(),
                question_type: Some(question.kind),
                user_answer: answer.user_answer.clone(),
                correct_answer: expected,
                is_correct: Some(serde_json::Value::Bool(is_correct)),
                correct: None,
                bloom_level: Some(question.level.to_string()),
                cognitive_level: None,
                source_page: question.source_page,
                source_context: question.source_context.clone(),
            });
        }

        let total_questions = quiz.question_count() as u32;
        let score = if total_questions == 0 {
            0.0
        } else {
            (correct_answers as f64 / total_questions as f64) * 100.0
        };

        RawSubmitResponse {
            score,
            correct_answers,
            total_questions,
            results,
        }
    }
}

#[async_trait]
impl QuizService for MockQuizService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_quiz(&self, quiz_id: i64) -> Result<Quiz, ServiceError> {
        self.quiz
            .clone()
            .ok_or_else(|| ServiceError::NotFound(format!("quiz {quiz_id} not found")))
    }

    async fn submit_attempt(
        &self,
        quiz_id: i64,
        answers: &[SubmissionRecord],
    ) -> Result<RawSubmitResponse, ServiceError> {
        let Some(quiz) = &self.quiz else {
            return Err(ServiceError::NotFound(format!("quiz {quiz_id} not found")));
        };

        let known: Vec<i64> = quiz.questions.iter().map(|q| q.id).collect();
        let invalid: Vec<i64> = answers
            .iter()
            .map(|a| a.question_id)
            .filter(|id| !known.contains(id))
            .collect();
        if !invalid.is_empty() {
            return Err(ServiceError::BadRequest(format!(
                "Invalid question IDs: {invalid:?}"
            )));
        }

        self.submit_count.fetch_add(1, Ordering::Relaxed);
        *self.last_submission.lock().unwrap() = Some(answers.to_vec());

        let response = self.grade(quiz, answers);
        *self.graded.lock().unwrap() = Some(response.clone());
        Ok(response)
    }

    async fn fetch_basic_results(&self, quiz_id: i64) -> Result<BasicResults, ServiceError> {
        let Some(quiz) = &self.quiz else {
            return Err(ServiceError::NotFound(format!("quiz {quiz_id} not found")));
        };
        let Some(graded) = self.graded.lock().unwrap().clone() else {
            return Err(ServiceError::BadRequest(
                "Quiz has not been submitted yet".into(),
            ));
        };

        Ok(BasicResults {
            score: graded.score,
            total_questions: graded.total_questions,
            quiz_title: quiz.title.clone(),
            correct_answers: Some(graded.correct_answers),
            results: graded.results,
        })
    }

    async fn export_attempt(&self, quiz_id: i64) -> Result<Vec<u8>, ServiceError> {
        if self.quiz.is_none() {
            return Err(ServiceError::NotFound(format!("quiz {quiz_id} not found")));
        }
        Ok(b"PK\x03\x04mock-document".to_vec())
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, ServiceError> {
        Ok(self
            .quiz
            .iter()
            .map(|quiz| QuizSummary {
                id: quiz.id,
                title: quiz.title.clone(),
                description: quiz.description.clone(),
                score: self.graded.lock().unwrap().as_ref().map(|g| g.score),
                total_questions: quiz.question_count() as u32,
                created_at: Utc::now(),
            })
            .collect())
    }
}
