//! Markdown report generator.
//!
//! Produces a self-contained review document for an attempt: score
//! overview, per-category breakdown, and a walk through the questions the
//! learner got wrong with their source explanations.

use std::path::Path;

use anyhow::{Context, Result};

use quizmate_core::report::AttemptReport;

use crate::summary::{format_duration, performance_blurb, performance_level};

/// Generate a markdown report from an attempt report.
pub fn generate_markdown(report: &AttemptReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Quiz results — {}\n\n", report.quiz_title));
    md.push_str(&format!(
        "_{}_ | quiz #{}\n\n",
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.quiz_id
    ));

    // Score overview
    md.push_str(&format!(
        "**Score:** {:.1}% ({}) — {} of {} correct",
        report.score,
        performance_level(report.score),
        report.correct_answers,
        report.total_questions
    ));
    if report.time_taken_secs > 0 {
        md.push_str(&format!(
            " in {}",
            format_duration(report.time_taken_secs)
        ));
    }
    md.push_str("\n\n");
    md.push_str(&performance_blurb(
        report.correct_answers,
        report.total_questions,
    ));
    md.push_str("\n\n");

    // Per-category breakdown
    md.push_str("## Performance by cognitive level\n\n");
    if report.aggregate.per_category.is_empty() {
        md.push_str(
            "Detailed performance data is not available for this attempt. \
             Retake the quiz to see the cognitive-level analysis.\n\n",
        );
    } else {
        md.push_str("| Level | Correct | Total | Percent |\n");
        md.push_str("|-------|---------|-------|---------|\n");
        for group in &report.aggregate.per_category {
            md.push_str(&format!(
                "| {} | {} | {} | {}% |\n",
                group.level, group.correct, group.total, group.percent
            ));
        }
        md.push('\n');
    }

    // Wrong answers review
    if !report.records.is_empty() {
        md.push_str("## Questions you got wrong\n\n");
        let wrong: Vec<_> = report.records.iter().filter(|r| !r.is_correct).collect();
        if wrong.is_empty() {
            md.push_str("None — you answered every question correctly.\n");
        } else {
            for (position, record) in report.records.iter().enumerate() {
                if record.is_correct {
                    continue;
                }
                md.push_str(&format!(
                    "### Question {} ({})\n\n",
                    position + 1,
                    record.level
                ));
                md.push_str(&format!("{}\n\n", record.question_text));
                let answered = if record.user_answer.is_empty() {
                    "No answer provided"
                } else {
                    &record.user_answer
                };
                md.push_str(&format!("- Your answer: {answered}\n"));
                md.push_str(&format!("- Correct answer: {}\n", record.correct_answer));
                if let Some(context) = &record.source_context {
                    match record.source_page {
                        Some(page) => md.push_str(&format!(
                            "- Explanation (page {page}): {context}\n"
                        )),
                        None => md.push_str(&format!("- Explanation: {context}\n")),
                    }
                }
                md.push('\n');
            }
        }
    }

    md
}

/// Write the markdown report to a file.
pub fn write_markdown_report(report: &AttemptReport, path: &Path) -> Result<()> {
    let md = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmate_core::model::{CognitiveLevel, ResultRecord};
    use quizmate_core::report::GradedAttempt;

    fn attempt(records: Vec<ResultRecord>) -> AttemptReport {
        let correct = records.iter().filter(|r| r.is_correct).count() as u32;
        let total = records.len().max(3) as u32;
        AttemptReport::from_attempt(&GradedAttempt {
            quiz_id: 7,
            quiz_title: "Chapter 3".into(),
            score: 66.7,
            correct_answers: correct,
            total_questions: total,
            time_taken_secs: 95,
            records,
        })
    }

    fn record(id: i64, level: CognitiveLevel, is_correct: bool) -> ResultRecord {
        ResultRecord {
            question_id: id,
            question_text: format!("Question text {id}"),
            question_type: None,
            level,
            user_answer: if is_correct { "right".into() } else { String::new() },
            correct_answer: "right".into(),
            is_correct,
            source_page: Some(4),
            source_context: Some("See the section on water cycles.".into()),
        }
    }

    #[test]
    fn detailed_report_includes_breakdown_and_review() {
        let report = attempt(vec![
            record(1, CognitiveLevel::Remember, true),
            record(2, CognitiveLevel::Remember, false),
            record(3, CognitiveLevel::Apply, true),
        ]);
        let md = generate_markdown(&report);

        assert!(md.contains("# Quiz results — Chapter 3"));
        assert!(md.contains("| Remember | 1 | 2 | 50% |"));
        assert!(md.contains("### Question 2 (Remember)"));
        assert!(md.contains("No answer provided"));
        assert!(md.contains("Explanation (page 4)"));
        assert!(md.contains("1m 35s"));
    }

    #[test]
    fn degraded_report_names_the_missing_data() {
        let report = attempt(vec![]);
        let md = generate_markdown(&report);
        assert!(md.contains("Detailed performance data is not available"));
        assert!(md.contains("Retake the quiz"));
        assert!(!md.contains("Questions you got wrong"));
    }

    #[test]
    fn writes_to_disk() {
        let report = attempt(vec![record(1, CognitiveLevel::Create, true)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/attempt.md");

        write_markdown_report(&report, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Chapter 3"));
    }
}
