//! Gym Desk service entry point.
//!
//! Wires the in-memory adapters, loads configuration, and runs the
//! expiry notifier until Ctrl-C.

use std::sync::Arc;

use tokio::sync::watch;

use gymdesk::adapters::memory::{
    InMemoryMemberDirectory, InMemoryMembershipRepository, RecordingMailer,
};
use gymdesk::application::{ExpiryNotifier, ExpiryNotifierConfig};
use gymdesk::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gymdesk=info".into()),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;
    tracing::info!(
        window_days = config.notifier.window_days,
        from = %config.email.from_header(),
        "configuration loaded"
    );

    let memberships = Arc::new(InMemoryMembershipRepository::new());
    let directory = Arc::new(InMemoryMemberDirectory::new());
    let mailer = Arc::new(RecordingMailer::new());

    let notifier = ExpiryNotifier::with_config(
        memberships,
        directory,
        mailer,
        ExpiryNotifierConfig::default()
            .with_window_days(config.notifier.window_days)
            .with_sweep_interval(config.notifier.sweep_interval()),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(async move { notifier.run(shutdown_rx).await });

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    shutdown_tx.send(true)?;
    handle.await??;

    Ok(())
}
