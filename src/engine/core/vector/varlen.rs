use crate::engine::chunk::ChunkLayout;
use crate::engine::chunk::layout::{STRING_LENGTH_BYTES, STRING_PREFIX_BYTES, STRING_OFFSET_BYTES};
use crate::engine::core::vector::primitive::FixedWidth;
use crate::engine::errors::DecodeError;

/// Reader for VARCHAR/BLOB slots.
///
/// Each slot starts with a u32 length. Up to `inline_threshold` bytes follow the
/// length directly. Longer values keep a 4-byte prefix and a u64 offset into the
/// vector's heap instead. The length is authoritative: values may contain zero
/// bytes and are never terminated.
#[derive(Debug, Clone, Copy)]
pub struct VarLenReader<'a> {
    slots: &'a [u8],
    heap: &'a [u8],
    layout: ChunkLayout,
}

impl<'a> VarLenReader<'a> {
    pub fn new(slots: &'a [u8], heap: &'a [u8], layout: ChunkLayout) -> Self {
        Self {
            slots,
            heap,
            layout,
        }
    }

    /// Borrowed bytes of `row`. Callers copy before handing values out.
    #[inline]
    pub fn read_bytes(&self, row: usize) -> Result<&'a [u8], DecodeError> {
        let width = self.layout.string_slot_width();
        let slot = row
            .checked_mul(width)
            .and_then(|start| start.checked_add(width).map(|end| (start, end)))
            .and_then(|(start, end)| self.slots.get(start..end))
            .ok_or_else(|| {
                DecodeError::ContractViolation(format!("string slot {row} outside buffer"))
            })?;
        let len = u32::from_le_slice(&slot[..STRING_LENGTH_BYTES]) as usize;
        if len <= self.layout.inline_threshold() {
            return Ok(&slot[STRING_LENGTH_BYTES..STRING_LENGTH_BYTES + len]);
        }
        let at = STRING_LENGTH_BYTES + STRING_PREFIX_BYTES;
        let offset = u64::from_le_slice(&slot[at..at + STRING_OFFSET_BYTES]) as usize;
        offset
            .checked_add(len)
            .and_then(|end| self.heap.get(offset..end))
            .ok_or_else(|| {
                DecodeError::ContractViolation(format!(
                    "string {row} of {len} bytes at heap offset {offset} outside {}-byte heap",
                    self.heap.len()
                ))
            })
    }

    pub fn read_blob(&self, row: usize) -> Result<Vec<u8>, DecodeError> {
        self.read_bytes(row).map(<[u8]>::to_vec)
    }

    pub fn read_string(&self, row: usize) -> Result<String, DecodeError> {
        let bytes = self.read_bytes(row)?.to_vec();
        String::from_utf8(bytes).map_err(|source| DecodeError::InvalidUtf8 { row, source })
    }

    pub fn read_string_lossy(&self, row: usize) -> Result<String, DecodeError> {
        Ok(String::from_utf8_lossy(self.read_bytes(row)?).into_owned())
    }
}
