//! Quiz-taking session controller.
//!
//! Orchestrates a single attempt: current question pointer, elapsed time,
//! and the submission lifecycle. The controller owns the answer map and
//! only talks to the backend through the injected [`QuizService`].
//!
//! State machine: `Loading → InProgress → Submitting → Submitted`, with
//! `Loading → Failed` and `Submitting → Failed` on classified errors.
//! `Failed` is recoverable: the caller can [`QuizSession::resume`] and
//! retry, or navigate away. Dropping an in-flight `load` future discards
//! the eventual response, so a cancelled load never mutates the session.

use std::sync::Arc;

use crate::cache::ResultsCache;
use crate::error::SessionError;
use crate::model::{AnswerMap, CognitiveLevel, Question, Quiz, ResultRecord};
use crate::normalize::normalize_results;
use crate::report::GradedAttempt;
use crate::submission::build_submission;
use crate::traits::QuizService;

/// Lifecycle phase of a quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    InProgress,
    Submitting,
    Submitted,
    Failed,
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Loading => "loading",
            SessionPhase::InProgress => "in-progress",
            SessionPhase::Submitting => "submitting",
            SessionPhase::Submitted => "submitted",
            SessionPhase::Failed => "failed",
        }
    }
}

/// A single quiz attempt, from load to submission.
pub struct QuizSession {
    service: Arc<dyn QuizService>,
    phase: SessionPhase,
    quiz: Option<Quiz>,
    current_index: usize,
    answers: AnswerMap,
    elapsed_secs: u64,
}

impl QuizSession {
    pub fn new(service: Arc<dyn QuizService>) -> Self {
        Self {
            service,
            phase: SessionPhase::Loading,
            quiz: None,
            current_index: 0,
            answers: AnswerMap::new(),
            elapsed_secs: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question the pointer is on, once the quiz is loaded.
    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.as_ref()?.questions.get(self.current_index)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.answered_count()
    }

    pub fn unanswered_count(&self) -> usize {
        let total = self.quiz.as_ref().map_or(0, Quiz::question_count);
        total.saturating_sub(self.answered_count())
    }

    /// Completion progress as a whole percentage.
    pub fn progress_percent(&self) -> u32 {
        let total = self.quiz.as_ref().map_or(0, Quiz::question_count);
        if total == 0 {
            return 0;
        }
        ((self.answered_count() as f64 / total as f64) * 100.0).round() as u32
    }

    /// Load the quiz descriptor and start the attempt.
    ///
    /// Valid in `Loading` (initial) and `Failed` (retry after a load
    /// failure). On success the attempt starts at the first question with
    /// an empty answer map and a zeroed clock.
    pub async fn load(&mut self, quiz_id: i64) -> Result<(), SessionError> {
        if !matches!(self.phase, SessionPhase::Loading | SessionPhase::Failed) {
            return Err(SessionError::InvalidState {
                expected: "loading",
                actual: self.phase.name(),
            });
        }

        self.phase = SessionPhase::Loading;
        match self.service.fetch_quiz(quiz_id).await {
            Ok(quiz) => {
                tracing::info!(quiz_id, questions = quiz.question_count(), "quiz loaded");
                self.quiz = Some(quiz);
                self.current_index = 0;
                self.answers = AnswerMap::new();
                self.elapsed_secs = 0;
                self.phase = SessionPhase::InProgress;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(quiz_id, error = %err, "quiz load failed");
                self.phase = SessionPhase::Failed;
                Err(SessionError::LoadFailed(err))
            }
        }
    }

    /// Move the question pointer, clamping into `[0, question_count - 1]`.
    ///
    /// Only valid while in progress; a no-op in any other state. Performs
    /// no answer-completeness validation.
    pub fn select_question(&mut self, index: usize) {
        if self.phase != SessionPhase::InProgress {
            return;
        }
        let Some(quiz) = &self.quiz else { return };
        if quiz.questions.is_empty() {
            return;
        }
        self.current_index = index.min(quiz.question_count() - 1);
    }

    /// Upsert the learner's answer for a question.
    ///
    /// Overwrites any prior value and does not advance the pointer.
    /// Ignored outside `InProgress` (in particular after submission).
    pub fn set_answer(&mut self, question_id: i64, value: impl Into<String>) {
        if self.phase != SessionPhase::InProgress {
            return;
        }
        self.answers.set(question_id, value);
    }

    /// Advance the attempt clock by one second.
    ///
    /// The driver delivers ticks once per second while the attempt is in
    /// progress; stray ticks in any other state are ignored, so elapsed
    /// time freezes the instant the state leaves `InProgress`.
    pub fn tick(&mut self) {
        if self.phase == SessionPhase::InProgress {
            self.elapsed_secs += 1;
        }
    }

    /// Return a `Failed` session to `InProgress` so the learner can retry.
    ///
    /// Requires a loaded quiz; answers and elapsed time are preserved.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Failed || self.quiz.is_none() {
            return Err(SessionError::InvalidState {
                expected: "failed",
                actual: self.phase.name(),
            });
        }
        self.phase = SessionPhase::InProgress;
        Ok(())
    }

    /// Submit the attempt and cache the graded results.
    ///
    /// Valid only in `InProgress`; a second call while `Submitting` or
    /// after `Submitted` is rejected without issuing a network call.
    /// Confirmation of unanswered questions is the caller's policy — the
    /// controller accepts the call unconditionally.
    pub async fn submit(&mut self, cache: &ResultsCache) -> Result<GradedAttempt, SessionError> {
        if self.phase != SessionPhase::InProgress {
            return Err(SessionError::InvalidState {
                expected: "in-progress",
                actual: self.phase.name(),
            });
        }
        let Some(quiz) = self.quiz.as_ref() else {
            return Err(SessionError::InvalidState {
                expected: "in-progress",
                actual: "loading",
            });
        };

        self.phase = SessionPhase::Submitting;
        let submission = build_submission(quiz, &self.answers);
        tracing::info!(
            quiz_id = quiz.id,
            answered = self.answers.answered_count(),
            total = submission.len(),
            "submitting attempt"
        );

        match self.service.submit_attempt(quiz.id, &submission).await {
            Ok(response) => {
                let attempt = GradedAttempt {
                    quiz_id: quiz.id,
                    quiz_title: quiz.title.clone(),
                    score: response.score,
                    correct_answers: response.correct_answers,
                    total_questions: response.total_questions,
                    time_taken_secs: self.elapsed_secs,
                    records: normalize_results(response.results),
                };
                cache.put(quiz.id, attempt.clone());
                self.phase = SessionPhase::Submitted;
                tracing::info!(quiz_id = quiz.id, score = response.score, "attempt graded");
                Ok(attempt)
            }
            Err(err) => {
                tracing::warn!(quiz_id = quiz.id, error = %err, "submission failed");
                self.phase = SessionPhase::Failed;
                Err(SessionError::classify_submit(err))
            }
        }
    }
}

/// Resolve the results view for a quiz.
///
/// Fresh cached detail wins; otherwise fall back to the degraded summary
/// from the system of record. When the stored payload carries per-question
/// entries with missing labels, the quiz descriptor is fetched to recover
/// them (best effort — a descriptor failure leaves the sentinel labels in
/// place rather than failing the view).
pub async fn resolve_results(
    service: &dyn QuizService,
    cache: &ResultsCache,
    quiz_id: i64,
) -> Result<GradedAttempt, SessionError> {
    if let Some(attempt) = cache.get(quiz_id) {
        return Ok(attempt);
    }

    let basic = service
        .fetch_basic_results(quiz_id)
        .await
        .map_err(SessionError::classify_results)?;

    let mut records = normalize_results(basic.results);
    if records
        .iter()
        .any(|r| r.level == CognitiveLevel::unknown() || r.question_type.is_none())
    {
        match service.fetch_quiz_descriptor(quiz_id).await {
            Ok(quiz) => enrich_from_descriptor(&mut records, &quiz),
            Err(err) => {
                tracing::warn!(quiz_id, error = %err, "descriptor fetch failed, keeping sentinel labels");
            }
        }
    }

    let correct_answers = basic.correct_answers.unwrap_or_else(|| {
        if records.is_empty() {
            // Approximate from the score, as the stored summary keeps no count.
            ((basic.score / 100.0) * basic.total_questions as f64).round() as u32
        } else {
            records.iter().filter(|r| r.is_correct).count() as u32
        }
    });

    Ok(GradedAttempt {
        quiz_id,
        quiz_title: basic.quiz_title,
        score: basic.score,
        correct_answers,
        total_questions: basic.total_questions,
        // Not recorded by the system of record.
        time_taken_secs: 0,
        records,
    })
}

/// Fill labels a stored payload lost from the quiz descriptor.
fn enrich_from_descriptor(records: &mut [ResultRecord], quiz: &Quiz) {
    for record in records {
        let Some(question) = quiz.questions.iter().find(|q| q.id == record.question_id) else {
            continue;
        };
        if record.level == CognitiveLevel::unknown() {
            record.level = question.level.clone();
        }
        if record.question_type.is_none() {
            record.question_type = Some(question.kind);
        }
        if record.question_text.is_empty() {
            record.question_text = question.text.clone();
        }
    }
}
