use clap::Parser;
use roster::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roster", about = "Browse a paginated user directory")]
struct Args {
    /// Directory API endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Seed that keeps pages stable between requests
    #[arg(long)]
    seed: Option<String>,

    /// Records per page
    #[arg(long)]
    results: Option<u32>,

    /// Where to write the log file
    #[arg(long, default_value = "roster.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The TUI owns the terminal, so logs go to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{}, using defaults", e);
            config::RosterConfig::default()
        }
    };
    let cli = CliOverrides {
        base_url: args.base_url,
        seed: args.seed,
        results_per_page: args.results,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Roster starting up: base_url={}, seed={}, results={}, on_failure={:?}",
        resolved.base_url,
        resolved.seed,
        resolved.results_per_page,
        resolved.failure_policy
    );

    roster::tui::run(resolved)
}
