//! Per-category and overall statistics for the performance report.

use serde::{Deserialize, Serialize};

use crate::model::{CognitiveLevel, ResultRecord};

/// Aggregate statistics across a normalized result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Overall score, rounded to the nearest whole percent.
    pub overall_percent: u32,
    pub correct: u32,
    pub total: u32,
    /// Per-category breakdown, ordered by the fixed taxonomy with
    /// unrecognized labels last in first-seen order. Empty when no
    /// per-question detail was available; the caller must render a
    /// "data not available" state rather than a zero-filled chart.
    pub per_category: Vec<CategoryStats>,
}

/// Statistics for a single cognitive category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub level: CognitiveLevel,
    pub correct: u32,
    pub total: u32,
    pub percent: u32,
}

impl AggregateStats {
    /// Summary-only stats for a degraded view, with no per-question detail.
    pub fn from_score(score: f64, correct: u32, total: u32) -> Self {
        Self {
            overall_percent: score.round() as u32,
            correct,
            total,
            per_category: Vec::new(),
        }
    }
}

/// Compute aggregate statistics from normalized records.
pub fn aggregate_results(records: &[ResultRecord]) -> AggregateStats {
    let correct = records.iter().filter(|r| r.is_correct).count() as u32;
    let total = records.len() as u32;

    // Group by category, preserving first-seen order.
    let mut groups: Vec<CategoryStats> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|g| g.level == record.level) {
            Some(group) => {
                group.total += 1;
                group.correct += u32::from(record.is_correct);
            }
            None => groups.push(CategoryStats {
                level: record.level.clone(),
                correct: u32::from(record.is_correct),
                total: 1,
                percent: 0,
            }),
        }
    }

    // Taxonomy order first; the stable sort keeps first-seen order among
    // unrecognized labels, which all share the trailing rank.
    groups.sort_by_key(|g| g.level.rank());
    for group in &mut groups {
        group.percent = percent(group.correct, group.total);
    }

    AggregateStats {
        overall_percent: percent(correct, total),
        correct,
        total,
        per_category: groups,
    }
}

/// `round(correct/total*100)`, guarded against division by zero.
fn percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: CognitiveLevel, is_correct: bool) -> ResultRecord {
        ResultRecord {
            question_id: 0,
            question_text: String::new(),
            question_type: None,
            level,
            user_answer: String::new(),
            correct_answer: String::new(),
            is_correct,
            source_page: None,
            source_context: None,
        }
    }

    #[test]
    fn aggregates_per_category_and_overall() {
        let records = vec![
            record(CognitiveLevel::Remember, true),
            record(CognitiveLevel::Remember, false),
            record(CognitiveLevel::Apply, true),
        ];

        let stats = aggregate_results(&records);
        assert_eq!(stats.correct, 2);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.overall_percent, 67);
        assert_eq!(
            stats.per_category,
            vec![
                CategoryStats {
                    level: CognitiveLevel::Remember,
                    correct: 1,
                    total: 2,
                    percent: 50,
                },
                CategoryStats {
                    level: CognitiveLevel::Apply,
                    correct: 1,
                    total: 1,
                    percent: 100,
                },
            ]
        );
    }

    #[test]
    fn empty_input_is_safe() {
        let stats = aggregate_results(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.correct, 0);
        assert_eq!(stats.overall_percent, 0);
        assert!(stats.per_category.is_empty());
    }

    #[test]
    fn taxonomy_order_with_unrecognized_last() {
        let records = vec![
            record(CognitiveLevel::Other("Synthesis".into()), true),
            record(CognitiveLevel::Create, false),
            record(CognitiveLevel::unknown(), false),
            record(CognitiveLevel::Remember, true),
        ];

        let stats = aggregate_results(&records);
        let order: Vec<String> = stats
            .per_category
            .iter()
            .map(|g| g.level.to_string())
            .collect();
        assert_eq!(order, vec!["Remember", "Create", "Synthesis", "Unknown"]);
    }

    #[test]
    fn degraded_summary_has_no_categories() {
        let stats = AggregateStats::from_score(66.666, 2, 3);
        assert_eq!(stats.overall_percent, 67);
        assert!(stats.per_category.is_empty());
    }
}
