pub mod global;
pub mod model;


pub use global::CONFIG;
pub use model::{DecoderConfig, LoggingConfig, ReaderConfig, Settings, load_settings};
