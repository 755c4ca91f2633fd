use chrono::Local;
use clap::Parser;
use indicatif::{MultiProgress, ProgressBar};
use jira_status_report::jira::{fetch_report_input, JiraClient};
use jira_status_report::model::{ReportConfig, ReportError, ReportInput, Result};
use jira_status_report::report::ReportFormat;
use jira_status_report::utils::{run_progress, MultiProgressNew, ProgressStyleTemplate, SingleFlight};
use jira_status_report::write_report;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
struct Args {
    #[arg(long = "config", default_value = "report.json")]
    config_path: String,
    #[arg(long = "jira_url", required_unless_present = "snapshot_path")]
    jira_url: Option<String>,
    #[arg(long = "jira_email", required_unless_present = "snapshot_path")]
    jira_email: Option<String>,
    #[arg(long = "jira_token", required_unless_present = "snapshot_path")]
    jira_token: Option<String>,
    /// Read projects and issues from a JSON snapshot instead of Jira
    #[arg(long = "snapshot")]
    snapshot_path: Option<String>,
    #[arg(long = "output_dir", default_value = "WSR Reports")]
    output_dir: PathBuf,
    #[arg(long = "format", value_enum, default_value = "xlsx")]
    format: ReportFormat,
    /// Keep running and build a report every N seconds
    #[arg(long = "interval_secs")]
    interval_secs: Option<u64>,
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match load_config(&args.config_path) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match args.interval_secs {
        None => match run(&args, &config).await {
            Ok(path) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("failed to generate report: {err}");
                ExitCode::FAILURE
            }
        },
        Some(secs) => {
            schedule(args.clone(), config, Duration::from_secs(secs.max(1))).await;
            ExitCode::SUCCESS
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &str) -> Result<ReportConfig> {
    if !Path::new(path).exists() {
        info!("config `{path}` not found, using defaults");
        return Ok(ReportConfig::default());
    }
    let config = ReportConfig::from_config(path)?;
    info!(
        completed_statuses = ?config.completed_statuses,
        mapped_fields = config.field_mapping.fields.len(),
        "loaded config `{path}`"
    );
    Ok(config)
}

/// Builds a report every `period` until interrupted. A tick that arrives while
/// the previous build is still running is skipped.
async fn schedule(args: Args, config: ReportConfig, period: Duration) {
    let flight = SingleFlight::new();
    let mut ticker = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("stopping scheduler");
                return;
            }
        }
        let flight = flight.clone();
        let (args, config) = (args.clone(), config.clone());
        tokio::spawn(async move {
            let outcome = flight.try_run(run(&args, &config)).await;
            if let Some(Err(err)) = outcome {
                error!("failed to generate report: {err}");
            }
        });
    }
}

async fn run(args: &Args, config: &ReportConfig) -> Result<PathBuf> {
    let started_at = Local::now();
    info!("starting report generation at {}", started_at.format("%Y-%m-%d %H:%M:%S"));

    let input = match &args.snapshot_path {
        Some(path) => ReportInput::from_snapshot(path, &config.field_mapping)?,
        None => jira_fetch(args, config).await?,
    };
    if input.projects.is_empty() {
        warn!("no projects found, the report will only contain section titles");
    }

    let writer = args.format.writer();
    write_report(&input, config, writer.as_ref(), &args.output_dir, Local::now())
}

async fn jira_fetch(args: &Args, config: &ReportConfig) -> Result<ReportInput> {
    let (Some(url), Some(email), Some(token)) = (&args.jira_url, &args.jira_email, &args.jira_token) else {
        return Err(ReportError::config("--jira_url, --jira_email and --jira_token are required"));
    };
    let client = JiraClient::new(url, email, token, config.field_mapping.clone());

    let multi_progress: MultiProgress = run_progress(std::io::stderr().is_terminal());
    let pb = multi_progress.add_with_style(ProgressBar::new_spinner(), ProgressStyleTemplate::only_message());
    pb.set_message("Fetching projects ...");

    let input = fetch_report_input(&client, |project, page| {
        pb.set_message(format!("Fetch issues of `{}` (#{} page) ...", project.key, page + 1));
    })
    .await;

    match &input {
        Ok(input) => pb.finish_with_message(format!(
            "✅ Completed fetch (find {} projects, {} issues)",
            input.project_count(),
            input.issue_count()
        )),
        Err(_) => pb.abandon_with_message("❌ Fetch failed"),
    }
    input
}
