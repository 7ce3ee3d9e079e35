use thiserror::Error;
use tracing::{debug, error};

/// Errors raised while turning engine chunks into values.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Caller or producer broke the chunk contract: out-of-range row/column,
    /// buffers that disagree with the declared row count, malformed descriptors.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Invalid UTF-8 in VARCHAR row {row}: {source}")]
    InvalidUtf8 {
        row: usize,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Chunk source failed: {0}")]
    Source(String),
}

impl DecodeError {
    pub fn log_error(&self) {
        match self {
            DecodeError::ContractViolation(e) => {
                error!("Contract violation: {}", e);
                debug!("Contract violation details: {:?}", e);
            }
            DecodeError::UnsupportedType(e) => {
                error!("Unsupported type: {}", e);
                debug!("Unsupported type details: {:?}", e);
            }
            DecodeError::InvalidUtf8 { row, source } => {
                error!("Invalid UTF-8 at row {}: {}", row, source);
                debug!("Invalid UTF-8 bytes: {:?}", source.as_bytes());
            }
            DecodeError::Source(e) => {
                error!("Chunk source failed: {}", e);
                debug!("Chunk source error details: {:?}", e);
            }
        }
    }
}
