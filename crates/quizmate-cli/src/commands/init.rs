//! The `quizmate init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizmate.toml").exists() {
        println!("quizmate.toml already exists, skipping.");
    } else {
        std::fs::write("quizmate.toml", SAMPLE_CONFIG)?;
        println!("Created quizmate.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizmate.toml with your backend URL and token");
    println!("  2. Run: quizmate list");
    println!("  3. Run: quizmate take --quiz <id>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmate configuration

base_url = "http://localhost:8000"
token = "${QUIZMATE_TOKEN}"
timeout_secs = 30
"#;
