use crate::engine::chunk::layout::ChunkLayout;
use crate::engine::chunk::vector::Vector;
use crate::engine::errors::DecodeError;

/// A batch of rows delivered by the engine, stored column by column.
#[derive(Debug, Clone)]
pub struct DataChunk {
    row_count: usize,
    columns: Vec<Vector>,
    layout: ChunkLayout,
}

impl DataChunk {
    pub fn new(row_count: usize, columns: Vec<Vector>) -> Self {
        Self {
            row_count,
            columns,
            layout: ChunkLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: ChunkLayout) -> Self {
        self.layout = layout;
        self
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Vector] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Result<&Vector, DecodeError> {
        self.columns.get(index).ok_or_else(|| {
            DecodeError::ContractViolation(format!(
                "column {index} out of bounds ({} columns)",
                self.columns.len()
            ))
        })
    }

    pub fn layout(&self) -> ChunkLayout {
        self.layout
    }
}
