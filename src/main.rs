use campusgpt::core::config::{self, CampusConfig, CliOverrides};
use campusgpt::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "campusgpt", about = "Ask questions about your college from the terminal")]
struct Args {
    /// Base URL of the answer service (e.g. http://localhost:8000)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Where to write the log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (CampusConfig::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            endpoint: args.endpoint,
            log_file: args.log_file,
            log_level: args.log_level,
        },
    );

    // File logger - the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
        eprintln!("campusgpt: ignoring config file ({e}), using defaults");
    }

    log::info!("CampusGPT starting up against {}", resolved.base_url);

    tui::run(resolved)
}
