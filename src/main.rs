mod cli;

use clap::Parser;
use cli::Cli;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Initialise logging on stderr so stdout stays machine readable
fn init_logging(default_level: &str, default_format: &str) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| default_level.to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| default_format.to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match cli::load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            init_logging("info", "compact");
            error!("Failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);
    info!("Configuration loaded successfully");

    if let Err(e) = cli::run(cli, settings).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
