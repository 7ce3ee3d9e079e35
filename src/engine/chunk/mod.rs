pub mod builder;
pub mod data_chunk;
pub mod layout;
pub mod vector;

#[cfg(test)]
mod layout_test;

pub use builder::{ChunkBuilder, VectorBuilder};
pub use data_chunk::DataChunk;
pub use layout::ChunkLayout;
pub use vector::Vector;
