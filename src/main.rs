use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use skincare_advisor::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "advisor", about = "Terminal chat client for the SkinCare Advisor")]
struct Args {
    /// Backend base URL (overrides config file and ADVISOR_API_URL)
    #[arg(short, long)]
    url: Option<String>,

    /// Path to a config file instead of ~/.skincare-advisor/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request timeout in seconds; 0 waits indefinitely
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Skip the startup probe of /api/health
    #[arg(long)]
    no_health_check: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger: the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("advisor.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("advisor: {e}");
            log::error!("Failed to load config: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    let cli = CliOverrides {
        base_url: args.url,
        timeout_secs: args.timeout,
        no_health_check: args.no_health_check,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "SkinCare Advisor starting up (backend: {}, timeout: {:?})",
        resolved.api_base_url,
        resolved.request_timeout
    );

    skincare_advisor::tui::run(resolved)
}
