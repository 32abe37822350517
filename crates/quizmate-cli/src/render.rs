//! Terminal rendering of graded attempts.

use comfy_table::{Cell, Table};

use quizmate_core::report::GradedAttempt;
use quizmate_report::{format_duration, performance_blurb, performance_level};

/// Print the results view for an attempt: score overview, per-category
/// table, and the wrong-answer review when detail is available.
pub fn print_attempt(attempt: &GradedAttempt) {
    println!("\n=== {} ===", attempt.quiz_title);
    println!(
        "Score: {:.1}% ({}) — {}/{} correct",
        attempt.score,
        performance_level(attempt.score),
        attempt.correct_answers,
        attempt.total_questions
    );
    if attempt.time_taken_secs > 0 {
        println!("Time taken: {}", format_duration(attempt.time_taken_secs));
    }
    println!(
        "{}",
        performance_blurb(attempt.correct_answers, attempt.total_questions)
    );

    let stats = attempt.aggregate();
    if stats.per_category.is_empty() {
        println!(
            "\nDetailed performance data is not available for this attempt."
        );
        println!("Retake the quiz to see the cognitive-level analysis.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Cognitive level", "Correct", "Total", "Percent"]);
    for group in &stats.per_category {
        table.add_row(vec![
            Cell::new(&group.level),
            Cell::new(group.correct),
            Cell::new(group.total),
            Cell::new(format!("{}%", group.percent)),
        ]);
    }
    println!("\n{table}");

    let wrong = attempt.wrong_answers();
    if wrong.is_empty() {
        return;
    }
    println!("\nQuestions you got wrong:");
    for (position, record) in attempt.records.iter().enumerate() {
        if record.is_correct {
            continue;
        }
        println!("\n  Question {} ({})", position + 1, record.level);
        println!("    {}", record.question_text);
        let answered = if record.user_answer.is_empty() {
            "No answer provided"
        } else {
            &record.user_answer
        };
        println!("    Your answer:    {answered}");
        println!("    Correct answer: {}", record.correct_answer);
        if let Some(context) = &record.source_context {
            match record.source_page {
                Some(page) => println!("    Explanation (page {page}): {context}"),
                None => println!("    Explanation: {context}"),
            }
        }
    }
}
