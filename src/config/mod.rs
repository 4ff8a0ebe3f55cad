//! Configuration model for clashlock.
//!
//! The config is a small YAML file passed with `--config`. Parsing is
//! forward compatible (unknown fields are ignored) and every field has a
//! default, so an empty file is a valid config.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::BootTimeSource;
