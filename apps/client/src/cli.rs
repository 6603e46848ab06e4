use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "match-scorer")]
#[command(about = "Scores a resume against a job description", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a resume and job description and print the result
    Score(ScoreArgs),

    /// Check that the scoring service is reachable
    Health {
        /// Scoring service base URL (overrides SCORER_BASE_URL)
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[derive(Args)]
pub struct ScoreArgs {
    /// Resume file (.pdf, .docx or .txt)
    #[arg(short, long)]
    pub resume: Option<PathBuf>,

    /// Job description text
    #[arg(short, long, conflicts_with = "job_description_file")]
    pub job_description: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    pub job_description_file: Option<PathBuf>,

    /// Position title (optional)
    #[arg(short, long, default_value = "")]
    pub position_title: String,

    /// Scoring service base URL (overrides SCORER_BASE_URL)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Print the view as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Disable colored chart output
    #[arg(long)]
    pub no_color: bool,
}
