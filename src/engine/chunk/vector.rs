use bytes::Bytes;

use crate::engine::types::TypeDescriptor;

/// Storage of one column for one chunk, as handed over by the engine.
///
/// `data` holds one fixed-width slot per row (list entries for LIST/MAP, string
/// slots for VARCHAR/BLOB, nothing for STRUCT/ARRAY/UNION). `heap` holds the
/// out-of-line bytes of long strings. `child_len` is the row count of the child
/// of a LIST/MAP vector, which is independent of the parent's row count.
#[derive(Debug, Clone)]
pub struct Vector {
    descriptor: TypeDescriptor,
    data: Bytes,
    validity: Option<Vec<u64>>,
    heap: Bytes,
    children: Vec<Vector>,
    child_len: usize,
}

impl Vector {
    pub fn new(descriptor: TypeDescriptor, data: impl Into<Bytes>) -> Self {
        Self {
            descriptor,
            data: data.into(),
            validity: None,
            heap: Bytes::new(),
            children: Vec::new(),
            child_len: 0,
        }
    }

    pub fn with_validity(mut self, words: Vec<u64>) -> Self {
        self.validity = Some(words);
        self
    }

    pub fn with_heap(mut self, heap: impl Into<Bytes>) -> Self {
        self.heap = heap.into();
        self
    }

    pub fn with_children(mut self, children: Vec<Vector>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child_len(mut self, child_len: usize) -> Self {
        self.child_len = child_len;
        self
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn validity(&self) -> Option<&[u64]> {
        self.validity.as_deref()
    }

    pub fn heap(&self) -> &[u8] {
        &self.heap
    }

    pub fn children(&self) -> &[Vector] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Vector> {
        self.children.get(index)
    }

    pub fn child_len(&self) -> usize {
        self.child_len
    }
}
