use tracing::{Subscriber, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::shared::config::LoggingConfig;

/// File name prefix of the daily-rolled log under `log_dir`.
pub const LOG_FILE_PREFIX: &str = "chunkview.log";

/// Stdout and daily file layers, each filtered at its configured level.
pub fn subscriber(cfg: &LoggingConfig) -> anyhow::Result<impl Subscriber + Send + Sync + 'static> {
    let stdout_filter = cfg.stdout_level.parse::<LevelFilter>()?;
    let file_filter = cfg.file_level.parse::<LevelFilter>()?;

    let stdout_layer = fmt::layer().with_ansi(true).with_filter(stdout_filter);

    let file_appender = tracing_appender::rolling::daily(&cfg.log_dir, LOG_FILE_PREFIX);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(file_filter);

    Ok(tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer))
}

/// Installs [`subscriber`] globally. Fails if a global subscriber is already set.
pub fn init(cfg: &LoggingConfig) -> anyhow::Result<()> {
    subscriber(cfg)?.try_init()?;
    info!(log_dir = %cfg.log_dir, "Logging initialized");
    Ok(())
}

#[cfg(test)]
pub fn init_for_tests() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env().add_directive("chunkview=debug".parse().unwrap());

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
