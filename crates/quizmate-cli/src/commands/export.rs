//! The `quizmate export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizmate_client::{load_config_from, HttpQuizService};
use quizmate_core::traits::QuizService;

pub async fn execute(
    quiz_id: i64,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let service = HttpQuizService::from_config(&config);

    let bytes = service.export_attempt(quiz_id).await?;
    let path = output.unwrap_or_else(|| PathBuf::from(format!("quiz-{quiz_id}.docx")));
    std::fs::write(&path, &bytes)
        .with_context(|| format!("failed to write export to {}", path.display()))?;

    println!("Exported quiz {quiz_id} to {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
