//! Controller configuration
//!
//! Timeouts, thresholds and poll behavior. Defaults reproduce the field
//! values the controller was tuned with; boards can override them in code or,
//! with the `toml` feature, from a settings file.

pub mod types;

#[cfg(feature = "toml")]
mod toml;

pub use types::*;
