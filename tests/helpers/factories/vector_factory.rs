use crate::engine::chunk::Vector;
use crate::engine::core::vector::ValidityMask;
use crate::engine::types::{LogicalType, TypeDescriptor};

/// Hand-assembled vectors, for layouts the encoder would never produce.
pub struct VectorFactory {
    logical_type: LogicalType,
    data: Vec<u8>,
    nulls: Vec<usize>,
    rows: usize,
    heap: Vec<u8>,
    children: Vec<Vector>,
    child_len: usize,
}

impl VectorFactory {
    pub fn new(logical_type: LogicalType) -> Self {
        Self {
            logical_type,
            data: Vec::new(),
            nulls: Vec::new(),
            rows: 0,
            heap: Vec::new(),
            children: Vec::new(),
            child_len: 0,
        }
    }

    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Appends little-endian `i32` slots.
    pub fn with_i32s(mut self, values: &[i32]) -> Self {
        for v in values {
            self.data.extend_from_slice(&v.to_le_bytes());
        }
        self
    }

    /// Appends `(offset, length)` list entries.
    pub fn with_entries(mut self, entries: &[(u64, u64)]) -> Self {
        for (offset, length) in entries {
            self.data.extend_from_slice(&offset.to_le_bytes());
            self.data.extend_from_slice(&length.to_le_bytes());
        }
        self
    }

    /// Marks `nulls` as null in a bitmap covering `rows` rows.
    pub fn with_nulls(mut self, rows: usize, nulls: &[usize]) -> Self {
        self.rows = rows;
        self.nulls = nulls.to_vec();
        self
    }

    pub fn with_heap(mut self, heap: Vec<u8>) -> Self {
        self.heap = heap;
        self
    }

    pub fn with_child(mut self, child: Vector) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_child_len(mut self, child_len: usize) -> Self {
        self.child_len = child_len;
        self
    }

    pub fn create(self) -> Vector {
        let mut vector = Vector::new(TypeDescriptor::from(&self.logical_type), self.data)
            .with_heap(self.heap)
            .with_children(self.children)
            .with_child_len(self.child_len);
        if self.rows > 0 {
            let mut words = vec![u64::MAX; ValidityMask::words_for(self.rows)];
            for row in self.nulls {
                words[row / ValidityMask::BITS_PER_WORD] &= !(1u64 << (row % ValidityMask::BITS_PER_WORD));
            }
            vector = vector.with_validity(words);
        }
        vector
    }
}
