//! Tracker configuration.
//!
//! Connection settings come from explicit values or the environment; the
//! custom field ids used to read rank and hierarchy links can be overridden
//! from a TOML file.

mod error;
mod fields;
mod tracker;

pub use error::ConfigError;
pub use fields::{load_field_map, FieldMap};
pub use tracker::{TrackerConfig, DEFAULT_URL, TOKEN_ENV, URL_ENV};
