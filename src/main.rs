use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};

use app_update_checker::config::{CheckerConfig, github_output_path};
use app_update_checker::fetch::HttpPageSource;
use app_update_checker::logging::init_logging;
use app_update_checker::page::{default_scrapers, scraper_for};
use app_update_checker::runner;
use app_update_checker::tracking::Ledger;

#[derive(Parser)]
#[command(name = "app-update-checker")]
#[command(version, about = "Report new artifacts on software distribution pages")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Check every listed page and persist the report and ledger (default)
    Check(CheckArgs),
    /// Run extraction on a saved page and print the update records
    Inspect(InspectArgs),
}

#[derive(Args, Default)]
struct CheckArgs {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// URL list file
    #[arg(long)]
    urls: Option<PathBuf>,

    /// Version ledger file
    #[arg(long)]
    tracker: Option<PathBuf>,

    /// Update report file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct InspectArgs {
    /// Saved page markup
    html_file: PathBuf,

    /// URL the page was saved from
    #[arg(long)]
    url: String,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Version ledger file
    #[arg(long)]
    tracker: Option<PathBuf>,
}

fn load_config(
    path: Option<&Path>,
    urls: Option<PathBuf>,
    tracker: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<CheckerConfig> {
    let mut config = CheckerConfig::load(path)?;
    if let Some(urls) = urls {
        config.paths.urls = urls;
    }
    if let Some(tracker) = tracker {
        config.paths.tracker = tracker;
    }
    if let Some(output) = output {
        config.paths.output = output;
    }
    Ok(config)
}

async fn check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(args.config.as_deref(), args.urls, args.tracker, args.output)?;
    let source = HttpPageSource::new(&config.fetch).context("Failed to build HTTP client")?;
    let step_output = github_output_path();

    let outcome = runner::run(
        &config.paths,
        &config.fetch,
        &source,
        &default_scrapers(),
        step_output.as_deref(),
    )
    .await?;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn inspect(args: InspectArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(args.config.as_deref(), None, args.tracker, None)?;
    let markup = std::fs::read_to_string(&args.html_file)
        .with_context(|| format!("Failed to read {}", args.html_file.display()))?;

    let scrapers = default_scrapers();
    let Some(scraper) = scraper_for(&scrapers, &args.url) else {
        bail!("No scraper for {}", args.url);
    };

    let ledger = Ledger::load(&config.paths.tracker);
    let updates = runner::scrape_markup(scraper.as_ref(), &args.url, &markup, &ledger);
    println!("{}", serde_json::to_string_pretty(&updates)?);
    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file.as_deref(), cli.log_json)?;

    match cli.command {
        Some(Command::Inspect(args)) => inspect(args),
        command => {
            let args = match command {
                Some(Command::Check(args)) => args,
                _ => CheckArgs::default(),
            };
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(check(args))
        }
    }
}
