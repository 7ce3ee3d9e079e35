use serde::{Deserialize, Serialize};

use crate::engine::errors::DecodeError;
use crate::shared::config::model::DecoderConfig;

/// Bytes used by the u32 length at the start of every string slot.
pub const STRING_LENGTH_BYTES: usize = 4;
/// Bytes of the value kept next to the heap offset for out-of-line strings.
pub const STRING_PREFIX_BYTES: usize = 4;
/// Bytes of the heap offset for out-of-line strings.
pub const STRING_OFFSET_BYTES: usize = 8;

/// Physical parameters the engine reports alongside its chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChunkLayout")]
pub struct ChunkLayout {
    inline_threshold: usize,
}

// Deserialized form; checked through `ChunkLayout::new`
#[derive(Deserialize)]
struct RawChunkLayout {
    inline_threshold: usize,
}

impl TryFrom<RawChunkLayout> for ChunkLayout {
    type Error = DecodeError;

    fn try_from(raw: RawChunkLayout) -> Result<Self, Self::Error> {
        ChunkLayout::new(raw.inline_threshold)
    }
}

impl ChunkLayout {
    pub const DEFAULT_INLINE_THRESHOLD: usize = 12;
    pub const MIN_INLINE_THRESHOLD: usize = STRING_PREFIX_BYTES + STRING_OFFSET_BYTES;

    pub fn new(inline_threshold: usize) -> Result<Self, DecodeError> {
        if inline_threshold < Self::MIN_INLINE_THRESHOLD {
            return Err(DecodeError::ContractViolation(format!(
                "inline threshold {inline_threshold} leaves no room for prefix and heap offset (min {})",
                Self::MIN_INLINE_THRESHOLD
            )));
        }
        Ok(Self { inline_threshold })
    }

    pub fn from_config(cfg: &DecoderConfig) -> Result<Self, DecodeError> {
        Self::new(cfg.inline_threshold)
    }

    /// Strings of at most this many bytes live inside their slot.
    #[inline]
    pub fn inline_threshold(&self) -> usize {
        self.inline_threshold
    }

    #[inline]
    pub fn string_slot_width(&self) -> usize {
        STRING_LENGTH_BYTES + self.inline_threshold
    }
}

impl Default for ChunkLayout {
    fn default() -> Self {
        Self {
            inline_threshold: Self::DEFAULT_INLINE_THRESHOLD,
        }
    }
}
