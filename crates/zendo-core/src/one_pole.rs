//! One-pole lowpass filter.
//!
//! Difference equation:
//!
//! ```text
//! y[n] = x[n] + coeff * (y[n-1] - x[n])
//! coeff = exp(-2π * cutoff / sample_rate)
//! ```
//!
//! 6 dB/octave rolloff, one multiply per sample. Used three ways in the
//! engine: darkening the noise bed into its low rumble, damping the
//! resonant delay's feedback path so repeats lose highs instead of
//! accumulating them, and as the breath bed's phase-reactive cutoff.

use crate::flush_denormal;
use libm::expf;

/// One-pole (6 dB/oct) lowpass filter.
///
/// `coeff` stays in [0, 1) so the filter is unconditionally stable.
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    coeff: f32,
    sample_rate: f32,
    cutoff_hz: f32,
}

impl OnePole {
    /// Create a lowpass with the given cutoff frequency in Hz.
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            coeff: 0.0,
            sample_rate,
            cutoff_hz,
        };
        filter.recalculate_coeff();
        filter
    }

    /// Move the cutoff. Callers that automate the cutoff (the breath bed)
    /// feed this from a [`crate::SmoothedParam`] at control rate.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
        self.recalculate_coeff();
    }

    /// Current cutoff in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// Filter one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(input + self.coeff * (self.state - input));
        self.state
    }

    /// Clear filter memory.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    /// Update sample rate, preserving the cutoff frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    fn recalculate_coeff(&mut self) {
        self.coeff = expf(-core::f32::consts::TAU * self.cutoff_hz / self.sample_rate);
    }
}
