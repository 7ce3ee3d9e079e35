use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub decoder: DecoderConfig,
    pub reader: ReaderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecoderConfig {
    /// Longest string kept inside its vector slot; engine-specific.
    pub inline_threshold: usize,
    /// Fail on invalid UTF-8 in VARCHAR instead of substituting U+FFFD
    pub strict_utf8: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// Rows per chunk when splitting in-memory columns
    pub chunk_rows: usize,
    /// Rows buffered between a background decoder and its consumer
    pub stream_buffer: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("CHUNKVIEW_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

/// Defaults, then the file at `path` if it exists, then `CHUNKVIEW__*` env vars.
pub fn load_settings_from(path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .set_default("decoder.inline_threshold", 12_i64)?
        .set_default("decoder.strict_utf8", true)?
        .set_default("reader.chunk_rows", 2048_i64)?
        .set_default("reader.stream_buffer", 64_i64)?
        .set_default("logging.log_dir", "logs")?
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("CHUNKVIEW").separator("__"))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
