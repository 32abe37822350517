//! quizmate CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "quizmate", version, about = "Take generated quizzes and review results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively
    Take {
        /// Quiz id to attempt
        #[arg(long)]
        quiz: i64,

        /// Save a markdown report of the attempt
        #[arg(long)]
        report: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show results for a quiz
    Results {
        /// Quiz id
        #[arg(long)]
        quiz: i64,

        /// Save a markdown report of the results
        #[arg(long)]
        report: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export a quiz as a document
    Export {
        /// Quiz id
        #[arg(long)]
        quiz: i64,

        /// Output file (default: quiz-<id>.docx)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List your quizzes
    List {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmate=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            quiz,
            report,
            config,
        } => commands::take::execute(quiz, report, config).await,
        Commands::Results {
            quiz,
            report,
            config,
        } => commands::results::execute(quiz, report, config).await,
        Commands::Export {
            quiz,
            output,
            config,
        } => commands::export::execute(quiz, output, config).await,
        Commands::List { config } => commands::list::execute(config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
