use crate::engine::chunk::{ChunkLayout, DataChunk, Vector};
use crate::engine::core::vector::validity::ValidityMask;
use crate::engine::errors::DecodeError;
use crate::engine::types::LogicalType;

/// Borrowed, typed window onto one vector of a chunk. Cannot outlive the chunk.
///
/// Construction checks that the buffers are large enough for `len` rows, so the
/// readers built from a view never index past the end of what the engine handed
/// over.
#[derive(Debug, Clone, Copy)]
pub struct VectorView<'a> {
    vector: &'a Vector,
    logical_type: &'a LogicalType,
    len: usize,
    layout: ChunkLayout,
}

/// Bytes each row occupies in the vector's own data area.
pub fn slot_width(logical_type: &LogicalType, layout: ChunkLayout) -> usize {
    match logical_type.fixed_width() {
        Some(w) => w,
        None => match logical_type {
            LogicalType::Varchar | LogicalType::Blob => layout.string_slot_width(),
            _ => 0,
        },
    }
}

fn expected_children(logical_type: &LogicalType) -> usize {
    match logical_type {
        LogicalType::List(_) | LogicalType::Map { .. } | LogicalType::Array { .. } => 1,
        LogicalType::Struct(fields) => fields.len(),
        // tag vector first, then one vector per member
        LogicalType::Union(members) => members.len() + 1,
        _ => 0,
    }
}

impl<'a> VectorView<'a> {
    pub fn new(
        vector: &'a Vector,
        logical_type: &'a LogicalType,
        len: usize,
        layout: ChunkLayout,
    ) -> Result<Self, DecodeError> {
        if let Some(words) = vector.validity() {
            let need = ValidityMask::words_for(len);
            if words.len() < need {
                return Err(DecodeError::ContractViolation(format!(
                    "{logical_type} validity has {} words, {len} rows need {need}",
                    words.len()
                )));
            }
        }
        let need = len
            .checked_mul(slot_width(logical_type, layout))
            .ok_or_else(|| DecodeError::ContractViolation("vector size overflow".into()))?;
        if vector.data().len() < need {
            return Err(DecodeError::ContractViolation(format!(
                "{logical_type} data has {} bytes, {len} rows need {need}",
                vector.data().len()
            )));
        }
        let children = expected_children(logical_type);
        if vector.children().len() != children {
            return Err(DecodeError::ContractViolation(format!(
                "{logical_type} vector has {} children, expected {children}",
                vector.children().len()
            )));
        }
        Ok(Self {
            vector,
            logical_type,
            len,
            layout,
        })
    }

    /// View of column `index` spanning every row of the chunk.
    pub fn column(
        chunk: &'a DataChunk,
        index: usize,
        logical_type: &'a LogicalType,
    ) -> Result<Self, DecodeError> {
        Self::new(
            chunk.column(index)?,
            logical_type,
            chunk.row_count(),
            chunk.layout(),
        )
    }

    /// View of the `index`-th child vector with its own row count.
    pub fn child(
        &self,
        index: usize,
        logical_type: &'a LogicalType,
        len: usize,
    ) -> Result<VectorView<'a>, DecodeError> {
        let child = self.vector.child(index).ok_or_else(|| {
            DecodeError::ContractViolation(format!(
                "{} has no child vector {index}",
                self.logical_type
            ))
        })?;
        VectorView::new(child, logical_type, len, self.layout)
    }

    /// View of child `inner` of child `outer`. MAP vectors keep their keys and
    /// values one level down, under a key/value entry vector.
    pub fn grandchild(
        &self,
        outer: usize,
        inner: usize,
        logical_type: &'a LogicalType,
        len: usize,
    ) -> Result<VectorView<'a>, DecodeError> {
        let grandchild = self
            .vector
            .child(outer)
            .and_then(|c| c.child(inner))
            .ok_or_else(|| {
                DecodeError::ContractViolation(format!(
                    "{} has no child vector {outer}.{inner}",
                    self.logical_type
                ))
            })?;
        VectorView::new(grandchild, logical_type, len, self.layout)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn logical_type(&self) -> &'a LogicalType {
        self.logical_type
    }

    #[inline]
    pub fn layout(&self) -> ChunkLayout {
        self.layout
    }

    #[inline]
    pub fn validity(&self) -> ValidityMask<'a> {
        ValidityMask::new(self.vector.validity())
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.vector.data()
    }

    #[inline]
    pub fn heap(&self) -> &'a [u8] {
        self.vector.heap()
    }

    /// Row count of the LIST/MAP child as reported by the engine.
    #[inline]
    pub fn child_len(&self) -> usize {
        self.vector.child_len()
    }

    #[inline]
    pub fn check_row(&self, row: usize) -> Result<(), DecodeError> {
        if row >= self.len {
            return Err(DecodeError::ContractViolation(format!(
                "row {row} out of bounds for {} vector of {} rows",
                self.logical_type, self.len
            )));
        }
        Ok(())
    }
}
