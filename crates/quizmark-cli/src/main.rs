//! quizmark CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "quizmark", version, about = "Markdown quizzes in the terminal and the browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check quiz files and report problems
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take a quiz in the terminal
    Play {
        /// Path to a quiz file
        #[arg(long)]
        quiz: PathBuf,

        /// Seed for question and answer shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the results report as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the results as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Render a static HTML preview of a quiz
    Render {
        /// Path to a quiz file
        #[arg(long)]
        quiz: PathBuf,

        /// Output HTML file
        #[arg(long, default_value = "quiz.html")]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and example quiz
    Init,
}

#[tokio::main]
async fn main() {
    let directive = match "quizmark=info".parse() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: invalid log directive: {e}");
            process::exit(1);
        }
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { quiz, config } => commands::validate::execute(quiz, config),
        Commands::Play {
            quiz,
            seed,
            config,
            output,
            html,
        } => commands::play::execute(quiz, seed, config, output, html).await,
        Commands::Render {
            quiz,
            output,
            config,
        } => commands::render::execute(quiz, output, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
