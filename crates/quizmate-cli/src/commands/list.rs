//! The `quizmate list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizmate_client::{load_config_from, HttpQuizService};
use quizmate_core::model::AttemptStatus;
use quizmate_core::traits::QuizService;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let service = HttpQuizService::from_config(&config);

    let summaries = service.list_quizzes().await?;
    if summaries.is_empty() {
        println!("No quizzes yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Questions", "Status", "Created"]);
    for summary in &summaries {
        let status = match AttemptStatus::from_score(summary.score) {
            AttemptStatus::Completed { score } => format!("Completed ({score:.1}%)"),
            AttemptStatus::NotStarted => "Not started".to_string(),
        };
        table.add_row(vec![
            Cell::new(summary.id),
            Cell::new(&summary.title),
            Cell::new(summary.total_questions),
            Cell::new(status),
            Cell::new(summary.created_at.format("%Y-%m-%d")),
        ]);
    }
    println!("{table}");
    Ok(())
}
