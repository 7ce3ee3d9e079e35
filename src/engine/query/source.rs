use std::collections::VecDeque;

use crate::engine::chunk::{ChunkBuilder, ChunkLayout, DataChunk, VectorBuilder};
use crate::engine::errors::DecodeError;
use crate::engine::types::{LogicalType, Value};
use crate::shared::config::CONFIG;

/// The query engine's side of a result: column names up front, then one chunk
/// at a time until `Ok(None)`.
pub trait ChunkSource {
    fn column_names(&self) -> &[String];

    fn next_chunk(&mut self) -> Result<Option<DataChunk>, DecodeError>;
}

impl<S: ChunkSource + ?Sized> ChunkSource for Box<S> {
    fn column_names(&self) -> &[String] {
        (**self).column_names()
    }

    fn next_chunk(&mut self) -> Result<Option<DataChunk>, DecodeError> {
        (**self).next_chunk()
    }
}

impl<S: ChunkSource + ?Sized> ChunkSource for &mut S {
    fn column_names(&self) -> &[String] {
        (**self).column_names()
    }

    fn next_chunk(&mut self) -> Result<Option<DataChunk>, DecodeError> {
        (**self).next_chunk()
    }
}

/// Chunks already sitting in memory, handed out in order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    names: Vec<String>,
    chunks: VecDeque<DataChunk>,
}

impl MemorySource {
    pub fn new(names: Vec<String>, chunks: Vec<DataChunk>) -> Self {
        Self {
            names,
            chunks: chunks.into(),
        }
    }

    /// Single-chunk source.
    pub fn from_builder(builder: &ChunkBuilder) -> Result<Self, DecodeError> {
        Ok(Self::new(builder.names().to_vec(), vec![builder.build()?]))
    }

    /// Splits whole columns into chunks of at most `chunk_rows` rows.
    pub fn from_columns(
        columns: Vec<(String, LogicalType, Vec<Value>)>,
        chunk_rows: usize,
        layout: ChunkLayout,
    ) -> Result<Self, DecodeError> {
        if chunk_rows == 0 {
            return Err(DecodeError::ContractViolation(
                "chunk_rows must be positive".into(),
            ));
        }
        let total = columns.first().map_or(0, |(_, _, v)| v.len());
        if let Some((name, _, values)) = columns.iter().find(|(_, _, v)| v.len() != total) {
            return Err(DecodeError::ContractViolation(format!(
                "column {name} has {} rows, expected {total}",
                values.len()
            )));
        }
        let mut chunks = Vec::with_capacity(total.div_ceil(chunk_rows));
        let mut start = 0;
        while start < total {
            let end = (start + chunk_rows).min(total);
            let vectors = columns
                .iter()
                .map(|(_, ty, values)| VectorBuilder::new(ty, layout).build(&values[start..end]))
                .collect::<Result<Vec<_>, DecodeError>>()?;
            chunks.push(DataChunk::new(end - start, vectors).with_layout(layout));
            start = end;
        }
        let names = columns.into_iter().map(|(name, _, _)| name).collect();
        Ok(Self::new(names, chunks))
    }

    /// Chunk size and string layout taken from the loaded settings.
    pub fn from_columns_configured(
        columns: Vec<(String, LogicalType, Vec<Value>)>,
    ) -> Result<Self, DecodeError> {
        let layout = ChunkLayout::from_config(&CONFIG.decoder)?;
        Self::from_columns(columns, CONFIG.reader.chunk_rows, layout)
    }

    pub fn push_chunk(&mut self, chunk: DataChunk) {
        self.chunks.push_back(chunk);
    }

    pub fn remaining(&self) -> usize {
        self.chunks.len()
    }
}

impl ChunkSource for MemorySource {
    fn column_names(&self) -> &[String] {
        &self.names
    }

    fn next_chunk(&mut self) -> Result<Option<DataChunk>, DecodeError> {
        Ok(self.chunks.pop_front())
    }
}
