use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::engine::chunk::DataChunk;
use crate::engine::errors::DecodeError;
use crate::engine::materialize::{MaterializeOptions, Materializer};
use crate::engine::query::row::Row;
use crate::engine::query::schema::ResultSchema;
use crate::engine::query::source::ChunkSource;
use crate::shared::config::CONFIG;

/// Forward-only, single-pass iteration over every row of a [`ChunkSource`].
///
/// At most one chunk is held at a time. A chunk is decoded row by row, column by
/// column; if a row fails, the rows before it are still yielded, then the error,
/// and the reader stops.
pub struct RowReader<S: ChunkSource> {
    source: S,
    materializer: Materializer,
    schema: Option<Arc<ResultSchema>>,
    pending: VecDeque<Row>,
    deferred: Option<DecodeError>,
    finished: bool,
    chunks_read: usize,
    rows_read: usize,
}

impl<S: ChunkSource> RowReader<S> {
    pub fn new(source: S) -> Self {
        let options = MaterializeOptions::from_config(&CONFIG.decoder);
        Self::with_materializer(source, Materializer::new(options))
    }

    pub fn with_materializer(source: S, materializer: Materializer) -> Self {
        Self {
            source,
            materializer,
            schema: None,
            pending: VecDeque::new(),
            deferred: None,
            finished: false,
            chunks_read: 0,
            rows_read: 0,
        }
    }

    pub fn column_names(&self) -> &[String] {
        self.source.column_names()
    }

    /// Known once the first chunk has arrived.
    pub fn schema(&self) -> Option<&Arc<ResultSchema>> {
        self.schema.as_ref()
    }

    pub fn chunks_read(&self) -> usize {
        self.chunks_read
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    fn schema_for(&mut self, chunk: &DataChunk) -> Result<Arc<ResultSchema>, DecodeError> {
        match &self.schema {
            Some(schema) => {
                schema.check_chunk(chunk)?;
                Ok(Arc::clone(schema))
            }
            None => {
                let schema = Arc::new(ResultSchema::resolve(self.source.column_names(), chunk)?);
                debug!(columns = schema.len(), "Resolved result schema");
                self.schema = Some(Arc::clone(&schema));
                Ok(schema)
            }
        }
    }

    fn decode_chunk(&mut self, chunk: &DataChunk) -> Result<(), DecodeError> {
        let schema = self.schema_for(chunk)?;
        let decoders = self.materializer.prepare_chunk(chunk, schema.types())?;
        for row in 0..chunk.row_count() {
            let values = decoders
                .iter()
                .map(|decoder| decoder.decode(row))
                .collect::<Result<Vec<_>, _>>()?;
            self.pending.push_back(Row::new(Arc::clone(&schema), values));
        }
        Ok(())
    }
}

impl<S: ChunkSource> Iterator for RowReader<S> {
    type Item = Result<Row, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.pending.pop_front() {
                self.rows_read += 1;
                return Some(Ok(row));
            }
            if let Some(err) = self.deferred.take() {
                self.finished = true;
                return Some(Err(err));
            }
            if self.finished {
                return None;
            }
            match self.source.next_chunk() {
                Ok(Some(chunk)) => {
                    self.chunks_read += 1;
                    debug!(
                        chunk = self.chunks_read,
                        rows = chunk.row_count(),
                        "Decoding chunk"
                    );
                    if let Err(err) = self.decode_chunk(&chunk) {
                        warn!(
                            chunk = self.chunks_read,
                            buffered = self.pending.len(),
                            "Chunk decode failed; yielding buffered rows first"
                        );
                        err.log_error();
                        self.deferred = Some(err);
                    }
                }
                Ok(None) => {
                    debug!(
                        chunks = self.chunks_read,
                        rows = self.rows_read,
                        "Chunk source exhausted"
                    );
                    self.finished = true;
                    return None;
                }
                Err(err) => {
                    err.log_error();
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<S: ChunkSource> std::iter::FusedIterator for RowReader<S> {}
