//! Wiring for one run: schema setup, store, orchestrator.

use crate::config::Settings;
use crate::faker::run_faker_only;
use anyhow::Context;
use loadgen_populate::{LoadOrchestrator, LoadSummary};
use loadgen_populate_mysql::{ensure_schema, MySQLRecordStore};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Log the effective settings. The password is never printed.
pub fn log_startup(settings: &Settings) {
    info!(
        "mysqldbgen: host={} port={} user={} dbname={} workers={} records={} config={:?} runOnlyFaker={}",
        settings.connection.host,
        settings.connection.port,
        settings.connection.user,
        settings.connection.dbname,
        settings.load.workers,
        settings.load.target,
        settings
            .config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        settings.run_only_faker
    );
}

/// Validate settings, then either print samples or load the database.
///
/// Returns the load summary, or `None` in faker-only mode.
pub async fn run(settings: &Settings, cancel: CancellationToken) -> anyhow::Result<Option<LoadSummary>> {
    settings.validate().context("Invalid configuration")?;
    log_startup(settings);

    if settings.run_only_faker {
        run_faker_only(&settings.load);
        return Ok(None);
    }

    let summary = load_database(settings, cancel).await?;
    info!("done");
    Ok(Some(summary))
}

/// Create the schema and commit `settings.load.target` records.
pub async fn load_database(
    settings: &Settings,
    cancel: CancellationToken,
) -> anyhow::Result<LoadSummary> {
    ensure_schema(&settings.connection)
        .await
        .context("setup failed")?;

    let store = MySQLRecordStore::connect(&settings.connection, settings.load.pool_size())
        .await
        .context("Failed to connect to MySQL")?;
    let store = Arc::new(store);

    let orchestrator = LoadOrchestrator::new(Arc::clone(&store)).with_cancellation(cancel);
    let result = orchestrator.load(&settings.load).await;

    if result.is_ok() {
        match store.table_counts().await {
            Ok(counts) => info!("table rows: {}", counts),
            Err(e) => warn!("Failed to count table rows: {}", e),
        }
    }

    drop(orchestrator);
    match Arc::try_unwrap(store) {
        Ok(store) => {
            if let Err(e) = store.disconnect().await {
                warn!("Failed to close MySQL pool: {}", e);
            }
        }
        Err(_) => warn!("MySQL pool still shared at shutdown; leaving it to drop"),
    }

    result.context("load failed")
}

/// Fire `cancel` on the first Ctrl-C.
pub fn cancel_on_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received interrupt signal (Ctrl+C), cancelling load");
                cancel.cancel();
            }
            Err(e) => warn!("Failed to install Ctrl+C handler: {}", e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadgen_populate::{ConfigError, LoadError};

    #[tokio::test]
    async fn test_faker_only_never_connects() {
        let mut settings = Settings::default();
        settings.run_only_faker = true;
        // Nothing listens here; a connection attempt would fail.
        settings.connection.port = 1;

        let summary = run(&settings, CancellationToken::new()).await.unwrap();
        assert!(summary.is_none());
    }

    #[tokio::test]
    async fn test_invalid_settings_fail_before_connecting() {
        let mut settings = Settings::default();
        settings.load.target = 0;
        settings.connection.port = 1;

        let err = run(&settings, CancellationToken::new()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::ZeroTarget)
        );
        assert!(err.downcast_ref::<LoadError>().is_none());
    }
}
