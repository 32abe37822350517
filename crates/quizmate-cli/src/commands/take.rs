//! The `quizmate take` command — an interactive quiz attempt.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use quizmate_client::{load_config_from, HttpQuizService};
use quizmate_core::cache::ResultsCache;
use quizmate_core::model::{Question, QuestionKind};
use quizmate_core::report::AttemptReport;
use quizmate_core::session::QuizSession;
use quizmate_core::traits::QuizService;
use quizmate_report::{format_duration, write_markdown_report};

use crate::render::print_attempt;

pub async fn execute(
    quiz_id: i64,
    report_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let service: Arc<dyn QuizService> = Arc::new(HttpQuizService::from_config(&config));
    let cache = ResultsCache::new();
    let mut session = QuizSession::new(service);

    session.load(quiz_id).await?;

    if let Some(quiz) = session.quiz() {
        println!("{} — {} questions", quiz.title, quiz.question_count());
        println!("Type an answer, or: next, prev, goto N, status, submit, quit");
    }
    print_question(&session);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut clock = tokio::time::interval(Duration::from_secs(1));
    // An interval yields immediately on its first tick; consume it so the
    // attempt clock starts at zero.
    clock.tick().await;

    let mut confirming_submit = false;

    loop {
        tokio::select! {
            _ = clock.tick() => {
                session.tick();
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    println!("Input closed, abandoning attempt.");
                    return Ok(());
                };
                let input = line.trim().to_string();

                if confirming_submit {
                    confirming_submit = false;
                    if input.eq_ignore_ascii_case("y") || input.eq_ignore_ascii_case("yes") {
                        if try_submit(&mut session, &cache).await? {
                            break;
                        }
                    } else {
                        println!("Submission cancelled.");
                    }
                    continue;
                }

                match input.as_str() {
                    "" => {}
                    "help" => print_help(),
                    "next" | "n" => {
                        let index = session.current_index() + 1;
                        session.select_question(index);
                        print_question(&session);
                    }
                    "prev" | "p" => {
                        let index = session.current_index().saturating_sub(1);
                        session.select_question(index);
                        print_question(&session);
                    }
                    "status" => print_status(&session),
                    "quit" | "q" => {
                        println!("Attempt abandoned.");
                        return Ok(());
                    }
                    "submit" => {
                        let unanswered = session.unanswered_count();
                        if unanswered > 0 {
                            println!(
                                "You have {unanswered} unanswered questions. Submit anyway? [y/N]"
                            );
                            confirming_submit = true;
                        } else if try_submit(&mut session, &cache).await? {
                            break;
                        }
                    }
                    other if other.starts_with("goto ") => {
                        match other["goto ".len()..].trim().parse::<usize>() {
                            Ok(number) if number >= 1 => {
                                session.select_question(number - 1);
                                print_question(&session);
                            }
                            _ => println!("Usage: goto <question number>"),
                        }
                    }
                    answer => record_answer(&mut session, answer),
                }
            }
        }
    }

    // Results view: the cached detail lives only while it is on screen.
    {
        let view = cache.view(quiz_id);
        if let Some(attempt) = view.get() {
            print_attempt(&attempt);
            if let Some(path) = &report_path {
                let report = AttemptReport::from_attempt(&attempt);
                write_markdown_report(&report, path)?;
                println!("\nReport saved to: {}", path.display());
            }
        }
    }

    Ok(())
}

/// Submit the attempt. Returns `true` when graded, `false` when the
/// learner can retry from the restored session.
async fn try_submit(session: &mut QuizSession, cache: &ResultsCache) -> Result<bool> {
    match session.submit(cache).await {
        Ok(_) => Ok(true),
        Err(err) if err.is_retryable() => {
            println!("Submission failed: {err:#}");
            println!("Type 'submit' to retry or 'quit' to abandon the attempt.");
            session.resume()?;
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

fn record_answer(session: &mut QuizSession, input: &str) {
    let Some(question) = session.current_question() else {
        return;
    };
    match resolve_answer(question, input) {
        Ok(answer) => {
            let question_id = question.id;
            session.set_answer(question_id, answer.clone());
            println!("Answer recorded: {answer}  (type 'next' to continue)");
        }
        Err(hint) => println!("{hint}"),
    }
}

/// Map terminal input onto the stored answer form for a question.
fn resolve_answer(question: &Question, input: &str) -> Result<String, String> {
    match question.kind {
        QuestionKind::MultipleChoice => {
            let options = question.options.as_deref().unwrap_or_default();
            if input.len() == 1 {
                let letter = input.chars().next().unwrap().to_ascii_uppercase();
                let index = (letter as usize).wrapping_sub('A' as usize);
                if let Some(option) = options.get(index) {
                    return Ok(option.clone());
                }
            }
            if let Some(option) = options.iter().find(|o| o.eq_ignore_ascii_case(input)) {
                return Ok(option.clone());
            }
            let last = (b'A' + options.len().saturating_sub(1) as u8) as char;
            Err(format!("Answer with a letter A-{last} or the option text."))
        }
        QuestionKind::TrueFalse => match input.to_lowercase().as_str() {
            "true" | "t" | "yes" => Ok("True".to_string()),
            "false" | "f" | "no" => Ok("False".to_string()),
            _ => Err("Answer with 'true' or 'false'.".to_string()),
        },
        QuestionKind::ShortAnswer => Ok(input.to_string()),
    }
}

fn print_question(session: &QuizSession) {
    let Some(question) = session.current_question() else {
        return;
    };
    let total = session.quiz().map_or(0, |q| q.question_count());
    println!(
        "\n[{}/{}] {} | {}",
        session.current_index() + 1,
        total,
        question.kind,
        question.level
    );
    println!("{}", question.text);
    if let Some(options) = &question.options {
        for (index, option) in options.iter().enumerate() {
            let letter = (b'A' + index as u8) as char;
            println!("  {letter}. {option}");
        }
    }
    if let Some(answer) = session.answers().get(question.id) {
        println!("Current answer: {answer}");
    }
}

fn print_status(session: &QuizSession) {
    let total = session.quiz().map_or(0, |q| q.question_count());
    println!(
        "Answered {}/{} ({}%) — elapsed {}",
        session.answered_count(),
        total,
        session.progress_percent(),
        format_duration(session.elapsed_secs())
    );
}

fn print_help() {
    println!("Commands:");
    println!("  <answer>   record an answer for the current question");
    println!("  next/prev  move between questions");
    println!("  goto N     jump to question N");
    println!("  status     answered count and elapsed time");
    println!("  submit     submit the attempt");
    println!("  quit       abandon the attempt");
}
