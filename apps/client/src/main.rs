mod cli;
mod config;
mod errors;
mod form;
mod projection;
mod scoring_client;
mod submission;
mod view;

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands, ScoreArgs};
use crate::config::{parse_base_url, Config};
use crate::form::{FormState, ResumeFile};
use crate::scoring_client::{HttpScoringClient, ScoringService};
use crate::submission::{SubmissionController, SubmitOutcome};
use crate::view::terminal::{render_text, TerminalStyle};

const EXIT_FAILED: u8 = 1;
const EXIT_BLOCKED: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries only the rendered view.
    tracing_subscriber::registry()
        .with(log_filter(cli.verbose, &config.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Score(args) => run_score(&config, args).await,
        Commands::Health { endpoint } => run_health(&config, endpoint.as_deref()).await,
    }
}

/// `--verbose` wins over `RUST_LOG`.
fn log_filter(verbose: bool, default_level: &str) -> EnvFilter {
    if verbose {
        return EnvFilter::new(format!("{}=debug", env!("CARGO_CRATE_NAME")));
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), default_level))
    })
}

async fn run_score(config: &Config, args: ScoreArgs) -> Result<ExitCode> {
    let client = build_client(config, args.endpoint.as_deref())?;
    info!("Scoring service: {}", client.score_url());
    let controller = SubmissionController::new(Arc::new(client));

    let mut form = FormState::new();
    form.set_position_title(args.position_title);

    let job_description = match (args.job_description, args.job_description_file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read job description from {}", path.display()))?,
        (None, None) => String::new(),
    };
    form.set_job_description(job_description);

    if let Some(path) = args.resume {
        let file = ResumeFile::from_path(&path)
            .await
            .with_context(|| format!("Failed to read resume {}", path.display()))?;
        form.set_resume_file(Some(file));
    }

    // The in-flight view goes to stderr, and only for an interactive text run, so
    // stdout still carries exactly one final view.
    let show_progress = !args.json && std::io::stderr().is_terminal();
    let progress_style = TerminalStyle {
        color: !args.no_color,
    };
    let outcome = controller
        .submit_observed(&mut form, |form| {
            if show_progress && form.lifecycle().is_loading() {
                let view = view::render(form.lifecycle(), form.input());
                eprint!("{}", render_text(&view, progress_style));
            }
        })
        .await;

    let view = view::render(form.lifecycle(), form.input());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let style = TerminalStyle {
            color: !args.no_color && std::io::stdout().is_terminal(),
        };
        print!("{}", render_text(&view, style));
    }

    if let SubmitOutcome::Blocked(reason) = &outcome {
        eprintln!("Nothing submitted: {reason}");
    }
    Ok(ExitCode::from(exit_code(&outcome)))
}

fn exit_code(outcome: &SubmitOutcome) -> u8 {
    match outcome {
        SubmitOutcome::Succeeded => 0,
        SubmitOutcome::Failed(_) | SubmitOutcome::Discarded => EXIT_FAILED,
        SubmitOutcome::Blocked(_) => EXIT_BLOCKED,
    }
}

async fn run_health(config: &Config, endpoint: Option<&str>) -> Result<ExitCode> {
    let client = build_client(config, endpoint)?;
    match client.health().await {
        Ok(health) => {
            println!("{}", health.status);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("Health check failed: {e}");
            Ok(ExitCode::from(EXIT_FAILED))
        }
    }
}

fn build_client(config: &Config, endpoint: Option<&str>) -> Result<HttpScoringClient> {
    let base_url = match endpoint {
        Some(raw) => parse_base_url(raw)?,
        None => config.scorer_base_url.clone(),
    };
    HttpScoringClient::new(&base_url, config.timeout).context("Failed to build HTTP client")
}
