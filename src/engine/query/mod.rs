pub mod row;
pub mod row_reader;
pub mod schema;
pub mod source;
pub mod stream;

#[cfg(test)]
mod stream_test;

pub use row::Row;
pub use row_reader::RowReader;
pub use schema::{ColumnInfo, ResultSchema};
pub use source::{ChunkSource, MemorySource};
pub use stream::{BackgroundRowStream, RowStream};
