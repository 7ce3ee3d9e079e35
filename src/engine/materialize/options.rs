use crate::shared::config::model::DecoderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Reject VARCHAR rows that are not valid UTF-8 instead of replacing the
    /// offending bytes with U+FFFD.
    pub strict_utf8: bool,
}

impl MaterializeOptions {
    pub fn from_config(cfg: &DecoderConfig) -> Self {
        Self {
            strict_utf8: cfg.strict_utf8,
        }
    }
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self { strict_utf8: true }
    }
}
