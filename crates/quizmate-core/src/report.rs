//! Graded attempt and report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::{aggregate_results, AggregateStats};
use crate::model::ResultRecord;

/// A submission response joined with the attempt's context: the payload the
/// results cache holds for the lifetime of the results view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedAttempt {
    pub quiz_id: i64,
    pub quiz_title: String,
    /// Score as reported by the system of record (0..=100).
    pub score: f64,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub time_taken_secs: u64,
    /// Canonical per-question records; empty for a degraded attempt.
    pub records: Vec<ResultRecord>,
}

impl GradedAttempt {
    /// Whether per-question detail is available.
    pub fn has_detail(&self) -> bool {
        !self.records.is_empty()
    }

    /// Compute the report statistics for this attempt.
    ///
    /// The per-category breakdown is derived from the records; the overall
    /// percentage prefers the score the system of record supplied.
    pub fn aggregate(&self) -> AggregateStats {
        if self.records.is_empty() {
            return AggregateStats::from_score(
                self.score,
                self.correct_answers,
                self.total_questions,
            );
        }
        let mut stats = aggregate_results(&self.records);
        stats.overall_percent = self.score.round() as u32;
        stats
    }

    /// The questions the learner got wrong, in quiz order.
    pub fn wrong_answers(&self) -> Vec<&ResultRecord> {
        self.records.iter().filter(|r| !r.is_correct).collect()
    }
}

/// An archived attempt report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub quiz_id: i64,
    pub quiz_title: String,
    pub score: f64,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub time_taken_secs: u64,
    /// Aggregate statistics.
    pub aggregate: AggregateStats,
    /// Canonical per-question records.
    pub records: Vec<ResultRecord>,
}

impl AttemptReport {
    pub fn from_attempt(attempt: &GradedAttempt) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz_id: attempt.quiz_id,
            quiz_title: attempt.quiz_title.clone(),
            score: attempt.score,
            correct_answers: attempt.correct_answers,
            total_questions: attempt.total_questions,
            time_taken_secs: attempt.time_taken_secs,
            aggregate: attempt.aggregate(),
            records: attempt.records.clone(),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AttemptReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CognitiveLevel;

    fn record(id: i64, level: CognitiveLevel, is_correct: bool) -> ResultRecord {
        ResultRecord {
            question_id: id,
            question_text: format!("Question {id}"),
            question_type: None,
            level,
            user_answer: "A".into(),
            correct_answer: "B".into(),
            is_correct,
            source_page: None,
            source_context: None,
        }
    }

    fn attempt() -> GradedAttempt {
        GradedAttempt {
            quiz_id: 7,
            quiz_title: "Chapter 3".into(),
            score: 66.666,
            correct_answers: 2,
            total_questions: 3,
            time_taken_secs: 95,
            records: vec![
                record(1, CognitiveLevel::Remember, true),
                record(2, CognitiveLevel::Remember, false),
                record(3, CognitiveLevel::Apply, true),
            ],
        }
    }

    #[test]
    fn aggregate_prefers_supplied_score() {
        let mut attempt = attempt();
        // Server grading policy may disagree with a naive recount.
        attempt.score = 70.0;
        let stats = attempt.aggregate();
        assert_eq!(stats.overall_percent, 70);
        assert_eq!(stats.per_category.len(), 2);
    }

    #[test]
    fn degraded_attempt_aggregates_summary_only() {
        let mut attempt = attempt();
        attempt.records.clear();
        let stats = attempt.aggregate();
        assert_eq!(stats.overall_percent, 67);
        assert!(stats.per_category.is_empty());
        assert!(!attempt.has_detail());
    }

    #[test]
    fn wrong_answers_in_quiz_order() {
        let attempt = attempt();
        let wrong = attempt.wrong_answers();
        assert_eq!(wrong.len(), 1);
        assert_eq!(wrong[0].question_id, 2);
    }

    #[test]
    fn json_roundtrip() {
        let report = AttemptReport::from_attempt(&attempt());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attempt.json");

        report.save_json(&path).unwrap();
        let loaded = AttemptReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.quiz_title, "Chapter 3");
        assert_eq!(loaded.records.len(), 3);
        assert_eq!(loaded.aggregate, report.aggregate);
    }
}
