//! Phase-accumulation oscillators.
//!
//! The drone voices run triangles in the low hundreds of Hz and the
//! transient voices run sines, so naive (non-band-limited) waveforms are
//! clean enough; there is no PolyBLEP here. The one synthesis-specific
//! feature is [`Oscillator::advance_fm`], which lets the glass-note
//! modulator push the carrier frequency around sample by sample.

use core::f32::consts::TAU;
use libm::sinf;

/// Oscillator waveform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// Pure sine — transient voices, LFOs.
    #[default]
    Sine,
    /// Triangle — drone pad voices.
    Triangle,
}

/// Audio-rate oscillator.
#[derive(Debug, Clone)]
pub struct Oscillator {
    phase: f32,
    phase_inc: f32,
    sample_rate: f32,
    frequency: f32,
    waveform: Waveform,
}

impl Oscillator {
    /// Create an oscillator at the given sample rate and frequency.
    pub fn new(sample_rate: f32, freq_hz: f32, waveform: Waveform) -> Self {
        Self {
            phase: 0.0,
            phase_inc: freq_hz / sample_rate,
            sample_rate,
            frequency: freq_hz,
            waveform,
        }
    }

    /// Set frequency in Hz.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.frequency = freq_hz.max(0.0);
        self.phase_inc = self.frequency / self.sample_rate;
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Update sample rate, preserving frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.phase_inc = self.frequency / sample_rate;
    }

    /// Reset phase to zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Next sample in [-1, 1].
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.advance_fm(0.0)
    }

    /// Next sample with an instantaneous frequency offset in Hz.
    ///
    /// The offset applies to this sample's phase step only, which is how
    /// the glass-note modulator deviates the carrier: the caller computes
    /// `modulator_output * deviation_hz` each sample and passes it here.
    #[inline]
    pub fn advance_fm(&mut self, freq_offset_hz: f32) -> f32 {
        let output = match self.waveform {
            Waveform::Sine => sinf(self.phase * TAU),
            Waveform::Triangle => {
                if self.phase < 0.5 {
                    4.0 * self.phase - 1.0
                } else {
                    3.0 - 4.0 * self.phase
                }
            }
        };

        self.phase += self.phase_inc + freq_offset_hz / self.sample_rate;
        while self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        while self.phase < 0.0 {
            self.phase += 1.0;
        }

        output
    }
}
