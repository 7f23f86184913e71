use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use zuliantv_bot::config::Settings;
use zuliantv_bot::logging::{init_logging, RedactionPatterns};
use zuliantv_bot::runner::run_bot;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenv().ok();

    // Redaction must be ready before the first log line
    let patterns = Arc::new(RedactionPatterns::new().map_err(|e| {
        eprintln!("Failed to compile regex patterns: {e}");
        e
    })?);
    init_logging(patterns);

    info!("Starting ZulianTV Bot...");

    let settings = init_settings();
    run_bot(settings).await;

    Ok(())
}

fn init_settings() -> Arc<Settings> {
    match Settings::new() {
        Ok(settings) => {
            info!(
                "Configuration loaded successfully ({} allowed users).",
                settings.allowed_users.len()
            );
            Arc::new(settings)
        }
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}
