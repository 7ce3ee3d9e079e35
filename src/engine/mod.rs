pub mod chunk;
pub mod core;
pub mod errors;
pub mod materialize;
pub mod query;
pub mod types;

#[cfg(test)]
mod errors_test;

pub use errors::*;
