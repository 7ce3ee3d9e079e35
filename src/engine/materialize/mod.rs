pub mod decoder;
pub mod materializer;
pub mod options;

#[cfg(test)]
mod nested_test;

pub use decoder::ColumnDecoder;
pub use materializer::Materializer;
pub use options::MaterializeOptions;
