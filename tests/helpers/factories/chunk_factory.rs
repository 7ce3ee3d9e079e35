use crate::engine::chunk::{ChunkBuilder, ChunkLayout, DataChunk};
use crate::engine::query::{MemorySource, RowReader};
use crate::engine::types::{LogicalType, Value};

/// Builds chunks and sources from whole columns of owned values.
pub struct ChunkFactory {
    columns: Vec<(String, LogicalType, Vec<Value>)>,
    layout: ChunkLayout,
    chunk_rows: usize,
}

impl ChunkFactory {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            layout: ChunkLayout::default(),
            chunk_rows: 2048,
        }
    }

    pub fn with_column(
        mut self,
        name: &str,
        logical_type: LogicalType,
        values: Vec<Value>,
    ) -> Self {
        self.columns.push((name.to_string(), logical_type, values));
        self
    }

    pub fn with_layout(mut self, layout: ChunkLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_chunk_rows(mut self, chunk_rows: usize) -> Self {
        self.chunk_rows = chunk_rows;
        self
    }

    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|(n, _, _)| n.clone()).collect()
    }

    /// One chunk holding every row.
    pub fn create(&self) -> DataChunk {
        let builder = self.columns.iter().fold(
            ChunkBuilder::new().with_layout(self.layout),
            |b, (name, ty, values)| b.column(name.clone(), ty.clone(), values.clone()),
        );
        builder.build().expect("chunk should encode")
    }

    /// Rows split into chunks of `chunk_rows`.
    pub fn source(&self) -> MemorySource {
        MemorySource::from_columns(self.columns.clone(), self.chunk_rows, self.layout)
            .expect("columns should encode")
    }

    pub fn reader(&self) -> RowReader<MemorySource> {
        RowReader::new(self.source())
    }
}
