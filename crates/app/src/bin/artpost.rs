// Artpost - generate an art prompt, render it, post it to Instagram

use artpost_app::{run_pipeline, PipelineSettings, Services};
use artpost_common::{Config, Deadline};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("artpost=info,artpost_app=info")),
        )
        .init();

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // The clock starts once configuration is in hand.
    let deadline = Deadline::after(config.timeout);
    info!(budget = ?config.timeout, "Configuration loaded");

    let services = Services::from_config(&config)?;
    let report = run_pipeline(&services, &PipelineSettings::default(), &deadline)
        .await
        .map_err(|e| {
            error!(step = %e.step, code = e.source.error_code(), "{}", e);
            e
        })?;

    info!(media_id = %report.media_id, "Run complete");
    println!("Image posted to Instagram.");
    Ok(())
}
