use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use schedule_scraper::config::{DEFAULT_HOST, DEFAULT_OUTPUT_DIR};
use schedule_scraper::ScraperConfig;

#[derive(Parser)]
#[command(
    name = "schedule-scraper",
    about = "Scrape class rooms and meeting times from a university class schedule",
    version
)]
struct Cli {
    /// Term to scrape, as it appears in the schedule URL (e.g. "fall-2025")
    #[arg(long, env = "SCHEDULE_SEMESTER", default_value = "summer-2025")]
    semester: String,

    /// Host serving /class-schedule/<term>/
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Directory the <term>_schedule.json file is written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Chrome/Chromium executable (auto-detected if omitted)
    #[arg(long, env = "CHROME_PATH")]
    chrome_path: Option<String>,

    /// Show the browser window
    #[arg(long)]
    headful: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> schedule_scraper::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let mut builder = ScraperConfig::builder(cli.semester)
        .host(cli.host)
        .output_dir(cli.output_dir)
        .headless(!cli.headful);
    if let Some(path) = cli.chrome_path {
        builder = builder.chrome_path(path);
    }
    let config = builder.build()?;

    schedule_scraper::run(&config).await?;
    Ok(())
}
