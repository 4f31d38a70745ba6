//! Configuration models and layered config loading for Roster.
//!
//! This crate owns the config schema (remote endpoint, form layout, validation
//! rules), its validation, and the layer-merging logic used by the CLI and SDK.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Layered config types and loader options.
pub use loader::{ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions};
/// Configuration schema models.
pub use model::*;
