//! The `quizmate results` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use quizmate_client::{load_config_from, HttpQuizService};
use quizmate_core::cache::ResultsCache;
use quizmate_core::error::SessionError;
use quizmate_core::report::AttemptReport;
use quizmate_core::session::resolve_results;
use quizmate_core::traits::QuizService;
use quizmate_report::write_markdown_report;

use crate::render::print_attempt;

pub async fn execute(
    quiz_id: i64,
    report_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let service: Arc<dyn QuizService> = Arc::new(HttpQuizService::from_config(&config));

    // A fresh process has no cached submission, so this resolves to the
    // system of record; the view guard still tears the entry down on every
    // exit path.
    let cache = ResultsCache::new();
    let view = cache.view(quiz_id);

    match resolve_results(service.as_ref(), &cache, quiz_id).await {
        Ok(attempt) => {
            print_attempt(&attempt);
            if !attempt.has_detail() {
                println!(
                    "\nPer-question feedback is only available immediately after \
                     submission. Retake the quiz to see it: quizmate take --quiz {quiz_id}"
                );
            }
            if let Some(path) = &report_path {
                let report = AttemptReport::from_attempt(&attempt);
                write_markdown_report(&report, path)?;
                println!("\nReport saved to: {}", path.display());
            }
            drop(view);
            Ok(())
        }
        Err(SessionError::NotYetSubmitted) => {
            println!("This quiz has not been submitted yet.");
            println!("Take it first: quizmate take --quiz {quiz_id}");
            Ok(())
        }
        Err(SessionError::AttemptNotFound(detail)) => {
            println!("Quiz not found: {detail}");
            println!("See your quizzes with: quizmate list");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
