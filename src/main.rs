use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use vita::core::config::{self, CliOverrides, VitaConfig};
use vita::tui;

#[derive(Parser)]
#[command(name = "vita", about = "Terminal front end for an interactive resume session")]
struct Args {
    /// Backend base URL (overrides VITA_BASE_URL and the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Delay between lines of a multi-line reply, in milliseconds
    #[arg(long)]
    stagger_ms: Option<u64>,

    /// Write an HTML transcript of the session here on exit
    #[arg(short, long)]
    transcript: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to vita.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("vita.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, falling back to defaults", e);
        VitaConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.url,
            stagger_ms: args.stagger_ms,
            transcript_file: args.transcript,
        },
    );

    log::info!("Vita starting up against {}", resolved.base_url);

    tui::run(resolved)
}
