mod accounts;
mod campaigns;
mod classifier;
mod config;
mod constants;
mod facebook;
mod metrics;
mod models;
mod worker;

use std::error::Error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    let api = match &config.base_url {
        Some(base_url) => facebook::FacebookApi::with_base_url(base_url),
        None => facebook::FacebookApi::new(),
    };

    // Run the worker
    let worker = worker::ReportWorker::new(api, config.date_preset);
    worker.run(&config.access_token).await?;

    Ok(())
}
