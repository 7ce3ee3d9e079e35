pub use super::factories::{ChunkFactory, VectorFactory};

use crate::engine::types::LogicalType;

pub struct Factory;

impl Factory {
    pub fn chunk() -> ChunkFactory {
        ChunkFactory::new()
    }

    pub fn vector(logical_type: LogicalType) -> VectorFactory {
        VectorFactory::new(logical_type)
    }
}
