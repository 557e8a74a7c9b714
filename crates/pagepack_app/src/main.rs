mod config;
mod logging;
mod run;

use clap::Parser;
use log::error;
use std::process;

#[derive(clap::Parser)]
#[command(about = "Fetch pages, download their images, and zip them per page")]
struct Args {
    /// Path to the TOML config describing page groups.
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Also write logs to ./pagepack.log.
    #[arg(long)]
    log_file: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let destination = if args.log_file {
        logging::LogDestination::Both
    } else {
        logging::LogDestination::Terminal
    };
    logging::initialize(destination);

    let settings = match config::Settings::load(&args.config) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Configuration error: {e:#}");
            process::exit(1);
        }
    };

    if let Err(e) = run::run(settings).await {
        error!("Application error: {e:#}");
        process::exit(1);
    }
}
