//! gradebatch CLI, the operator-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "gradebatch",
    version,
    about = "Bulk evaluation of student answers against a reference"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the reference answer comes from.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct ReferenceArgs {
    /// Reference answer text
    #[arg(long)]
    reference: Option<String>,

    /// File containing the reference answer
    #[arg(long)]
    reference_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a CSV of student answers
    Evaluate {
        /// CSV file: column 1 is the student ID, column 2 the answer
        #[arg(long)]
        csv: PathBuf,

        #[command(flatten)]
        reference: ReferenceArgs,

        /// Marks each answer is scored out of (default from config, else 10)
        #[arg(long)]
        marks_out_of: Option<u32>,

        /// Question text, shown in reports only
        #[arg(long)]
        question: Option<String>,

        /// Output directory (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: csv, json, html, all (comma-separated)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a single answer
    Score {
        /// The student's answer
        #[arg(long)]
        answer: String,

        #[command(flatten)]
        reference: ReferenceArgs,

        /// Marks the answer is scored out of (default from config, else 10)
        #[arg(long)]
        marks_out_of: Option<u32>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check an answers CSV without contacting the scoring service
    Validate {
        /// CSV file to check
        #[arg(long)]
        csv: PathBuf,
    },

    /// Print cohort statistics from a saved JSON report
    Stats {
        /// Report JSON written by `evaluate --format json`
        #[arg(long)]
        report: PathBuf,
    },

    /// Create starter config and example answers file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradebatch=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            csv,
            reference,
            marks_out_of,
            question,
            output,
            format,
            config,
        } => {
            commands::evaluate::execute(
                csv,
                reference.reference,
                reference.reference_file,
                marks_out_of,
                question,
                output,
                format,
                config,
            )
            .await
        }
        Commands::Score {
            answer,
            reference,
            marks_out_of,
            config,
        } => {
            commands::score::execute(
                answer,
                reference.reference,
                reference.reference_file,
                marks_out_of,
                config,
            )
            .await
        }
        Commands::Validate { csv } => commands::validate::execute(csv),
        Commands::Stats { report } => commands::stats::execute(report),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
