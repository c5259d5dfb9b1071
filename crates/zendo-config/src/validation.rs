//! Settings validation.
//!
//! Validation happens at load time, before any value reaches the engine,
//! so a bad file produces one readable error instead of a runaway
//! feedback loop or a zero-rate division later.

use thiserror::Error;

use crate::settings::Settings;

/// Sample rates the engine is prepared to run at.
pub const MIN_SAMPLE_RATE: u32 = 8_000;
/// Upper bound on the configurable sample rate.
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// A single validation failure.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Sample rate outside the supported range
    #[error("sample rate {0} outside supported range {MIN_SAMPLE_RATE}..={MAX_SAMPLE_RATE}")]
    SampleRate(u32),

    /// Delay feedback at or above unity would make the loop diverge
    #[error("delay feedback {0} must be in [0, 1)")]
    Feedback(f32),

    /// Master ceiling outside (0, 1]
    #[error("master ceiling {0} must be in (0, 1]")]
    MasterCeiling(f32),

    /// Glass interval bounds empty or non-positive
    #[error("glass interval bounds [{min}, {max}] must satisfy 0 < min <= max")]
    GlassInterval {
        /// Configured minimum in seconds.
        min: f32,
        /// Configured maximum in seconds.
        max: f32,
    },
}

/// Validate a settings value.
pub fn validate_settings(settings: &Settings) -> Result<(), ValidationError> {
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&settings.sample_rate) {
        return Err(ValidationError::SampleRate(settings.sample_rate));
    }
    let feedback = settings.delay.feedback;
    if !(0.0..1.0).contains(&feedback) || !feedback.is_finite() {
        return Err(ValidationError::Feedback(feedback));
    }
    let ceiling = settings.master_ceiling;
    if !(ceiling > 0.0 && ceiling <= 1.0) {
        return Err(ValidationError::MasterCeiling(ceiling));
    }
    let (min, max) = (
        settings.glass.interval_min_secs,
        settings.glass.interval_max_secs,
    );
    if !(min > 0.0 && min <= max && max.is_finite()) {
        return Err(ValidationError::GlassInterval { min, max });
    }
    Ok(())
}
