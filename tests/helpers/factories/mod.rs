pub mod chunk_factory;
pub mod vector_factory;

pub use chunk_factory::ChunkFactory;
pub use vector_factory::VectorFactory;

#[cfg(test)]
mod chunk_factory_test;
#[cfg(test)]
mod vector_factory_test;
