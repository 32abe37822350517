//! Results normalization.
//!
//! Raw result payloads may originate from two producers (the immediate
//! submission response vs. a stored fetch) with inconsistent shapes. This
//! module is the single point that reconciles them into the canonical
//! [`ResultRecord`]; everything downstream only ever sees that shape.
//! Normalization never fails: unresolvable fields degrade to safe defaults
//! with a warning on the tracing channel.

use serde_json::Value;

use crate::model::{CognitiveLevel, ResultRecord};
use crate::traits::RawResultEntry;

/// Normalize a raw results payload into canonical records.
pub fn normalize_results(raw: Vec<RawResultEntry>) -> Vec<ResultRecord> {
    raw.into_iter().map(normalize_entry).collect()
}

fn normalize_entry(entry: RawResultEntry) -> ResultRecord {
    let is_correct = resolve_correctness(
        entry.is_correct.as_ref().or(entry.correct.as_ref()),
        entry.question_id,
    );

    let level = entry
        .bloom_level
        .as_deref()
        .or(entry.cognitive_level.as_deref())
        .map(CognitiveLevel::from_label)
        .unwrap_or_else(CognitiveLevel::unknown);

    ResultRecord {
        question_id: entry.question_id,
        question_text: entry.question_text,
        question_type: entry.question_type,
        level,
        user_answer: entry.user_answer,
        correct_answer: entry.correct_answer,
        is_correct,
        source_page: entry.source_page,
        source_context: entry.source_context,
    }
}

/// Resolve the correctness flag to a genuine boolean.
///
/// Accepted as `true`: boolean `true`, numeric `1`, string `"true"`.
/// Accepted as `false`: boolean `false`, numeric `0`, string `"false"`,
/// absence. Anything else resolves to `false` with a warning naming the
/// question, so the policy decision stays visible in the logs.
fn resolve_correctness(flag: Option<&Value>, question_id: i64) -> bool {
    match flag {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => true,
            Some(0) => false,
            _ => {
                tracing::warn!(
                    question_id,
                    flag = %n,
                    "unrecognized correctness flag, treating as incorrect"
                );
                false
            }
        },
        Some(Value::String(s)) => match s.to_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => {
                tracing::warn!(
                    question_id,
                    flag = %s,
                    "unrecognized correctness flag, treating as incorrect"
                );
                false
            }
        },
        Some(other) => {
            tracing::warn!(
                question_id,
                flag = %other,
                "unrecognized correctness flag, treating as incorrect"
            );
            false
        }
    }
}

impl From<ResultRecord> for RawResultEntry {
    fn from(record: ResultRecord) -> Self {
        RawResultEntry {
            question_id: record.question_id,
            question_text: record.question_text,
            question_type: record.question_type,
            user_answer: record.user_answer,
            correct_answer: record.correct_answer,
            is_correct: Some(Value::Bool(record.is_correct)),
            correct: None,
            bloom_level: Some(record.level.to_string()),
            cognitive_level: None,
            source_page: record.source_page,
            source_context: record.source_context,
        }
    }
}
