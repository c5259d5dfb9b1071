//! Settings management for the zendo ambience engine.
//!
//! Settings are TOML files with full defaults: an absent file, an empty
//! file, and a partial file are all valid. Values are validated at load
//! time so the engine never sees an out-of-range sample rate or a
//! divergent feedback gain.
//!
//! # Example
//!
//! ```rust,no_run
//! use zendo_config::Settings;
//!
//! let settings = Settings::load("zendo.toml").unwrap();
//! println!("rendering at {} Hz", settings.sample_rate);
//! ```

mod error;
mod settings;

/// Settings validation.
pub mod validation;

pub use error::ConfigError;
pub use settings::{DelaySettings, GlassSettings, Settings};
pub use validation::{validate_settings, ValidationError, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE};
