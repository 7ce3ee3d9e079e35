pub mod json;

#[cfg(test)]
mod json_test;

pub use json::JsonRenderer;
