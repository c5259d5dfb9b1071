//! Slow sine modulators for drone movement.
//!
//! Each drone voice carries its own amplitude LFO at a slightly different
//! rate (0.04 Hz, 0.052 Hz, ...) so the voices breathe against each other
//! instead of beating in lockstep. The focus bed adds a 0.02 Hz pan LFO
//! per voice.

use core::f32::consts::TAU;
use libm::sinf;

/// Low-frequency sine oscillator, bipolar output.
#[derive(Debug, Clone)]
pub struct Lfo {
    phase: f32,
    phase_inc: f32,
    sample_rate: f32,
}

impl Lfo {
    /// Create an LFO at the given rate in Hz.
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: freq_hz / sample_rate,
            sample_rate,
        }
    }

    /// Set rate in Hz.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.phase_inc = freq_hz / self.sample_rate;
    }

    /// Offset the starting phase (0.0 to 1.0), so simultaneous voices
    /// don't all begin at the same point of their swell.
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = phase.clamp(0.0, 1.0);
    }

    /// Next value in [-1, 1].
    #[inline]
    pub fn next(&mut self) -> f32 {
        let output = sinf(self.phase * TAU);
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        output
    }

    /// Update sample rate, preserving rate in Hz.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let freq = self.phase_inc * self.sample_rate;
        self.sample_rate = sample_rate;
        self.set_frequency(freq);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_range() {
        let mut lfo = Lfo::new(48000.0, 0.04);
        for _ in 0..100_000 {
            let v = lfo.next();
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn phase_offset_decorrelates() {
        let mut a = Lfo::new(48000.0, 2.0);
        let mut b = Lfo::new(48000.0, 2.0);
        b.set_phase(0.5);
        let va = a.next();
        let vb = b.next();
        assert!((va + vb).abs() < 0.01, "expected opposition, {va} vs {vb}");
    }
}
