pub mod engine;
pub mod logging;
pub mod shared;

pub use engine::chunk::{ChunkBuilder, ChunkLayout, DataChunk, Vector, VectorBuilder};
pub use engine::errors::DecodeError;
pub use engine::materialize::{MaterializeOptions, Materializer};
pub use engine::query::{BackgroundRowStream, ChunkSource, MemorySource, ResultSchema, Row, RowReader, RowStream};
pub use engine::types::{LogicalType, TypeDescriptor, TypeId, Value};


#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
