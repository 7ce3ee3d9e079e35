use crate::engine::chunk::DataChunk;
use crate::engine::core::vector::VectorView;
use crate::engine::errors::DecodeError;
use crate::engine::materialize::decoder::ColumnDecoder;
use crate::engine::materialize::options::MaterializeOptions;
use crate::engine::types::{LogicalType, Value};

/// Turns borrowed vectors into owned [`Value`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Materializer {
    options: MaterializeOptions,
}

impl Materializer {
    pub fn new(options: MaterializeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> MaterializeOptions {
        self.options
    }

    /// Resolves children and offset tables once; decode rows from the result.
    pub fn prepare<'a>(&self, view: VectorView<'a>) -> Result<ColumnDecoder<'a>, DecodeError> {
        ColumnDecoder::new(view, self.options)
    }

    pub fn materialize(&self, view: &VectorView<'_>, row: usize) -> Result<Value, DecodeError> {
        self.prepare(*view)?.decode(row)
    }

    pub fn materialize_column(&self, view: &VectorView<'_>) -> Result<Vec<Value>, DecodeError> {
        self.prepare(*view)?.decode_all()
    }

    /// Decoders for every column of `chunk`, in column order.
    pub fn prepare_chunk<'a>(
        &self,
        chunk: &'a DataChunk,
        types: &'a [LogicalType],
    ) -> Result<Vec<ColumnDecoder<'a>>, DecodeError> {
        if types.len() != chunk.column_count() {
            return Err(DecodeError::ContractViolation(format!(
                "chunk has {} columns, {} types declared",
                chunk.column_count(),
                types.len()
            )));
        }
        types
            .iter()
            .enumerate()
            .map(|(i, ty)| self.prepare(VectorView::column(chunk, i, ty)?))
            .collect()
    }
}
