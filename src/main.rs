use clap::Parser;
use postboard::core::config::{self, CliOverrides, PostboardConfig};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "postboard", about = "Browse authors, posts and comments from the terminal")]
struct Args {
    /// Base URL of the board API (overrides config and POSTBOARD_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config problems can't be logged yet; remember them until the logger is up
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (PostboardConfig::default(), Some(e)),
    };
    let cli = CliOverrides {
        api_url: args.api_url,
        timeout_secs: args.timeout,
        verbose: args.verbose,
    };
    let resolved = config::resolve(&file_config, &cli);

    // File logger: the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file, using defaults: {}", e);
    }
    log::info!(
        "Postboard starting up against {} (timeout {:?})",
        resolved.api_url,
        resolved.timeout
    );

    postboard::tui::run(resolved)
}
