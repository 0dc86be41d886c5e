use std::fs::File;
use std::path::PathBuf;

use blue::core::config::{self, BlueConfig};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "blue", about = "Terminal chat client for the Blue marketplace assistant")]
struct Args {
    /// Assistant service base URL (overrides config file and BLUE_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Config file to use instead of ~/.blue/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The TUI owns stdout, so logs go to blue.log in the working directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("blue.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config(args.config.as_deref()).unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        BlueConfig::default()
    });
    let resolved = config::resolve(&file_config, args.base_url.as_deref());

    log::info!("Blue starting up against {}", resolved.base_url);

    blue::tui::run(resolved)
}
