//! The temple bed's noise floor and its resonant delay network.

use zendo_core::{BrownNoise, DelayLine, OnePole};

/// Lowpass cutoff that turns the brownian walk into a low rumble.
const WATER_CUTOFF_HZ: f32 = 120.0;

/// Level of the noise floor inside the temple bed.
const WATER_LEVEL: f32 = 0.08;

/// Brownian noise lowpassed into a distant-water texture.
///
/// Runs continuously for the life of the engine; the temple bed gain
/// decides how much of it reaches the master bus.
#[derive(Debug, Clone)]
pub struct NoiseBed {
    noise: BrownNoise,
    filter: OnePole,
}

impl NoiseBed {
    /// Create the noise bed.
    pub fn new(sample_rate: f32, seed: u32) -> Self {
        Self {
            noise: BrownNoise::new(seed),
            filter: OnePole::new(sample_rate, WATER_CUTOFF_HZ),
        }
    }

    /// Next mono sample of the water texture.
    #[inline]
    pub fn process(&mut self) -> f32 {
        self.filter.process(self.noise.next()) * WATER_LEVEL
    }
}

/// Fixed tap time of the resonant loop.
const DELAY_SECS: f32 = 0.75;

/// Feedback gain. Must stay strictly below 1 or the loop diverges.
const FEEDBACK: f32 = 0.4;

/// Hard ceiling on feedback, below the instability bound with margin.
const MAX_FEEDBACK: f32 = 0.95;

/// Lowpass inside the feedback loop, so repeats darken instead of
/// accumulating high-frequency energy.
const DAMP_CUTOFF_HZ: f32 = 800.0;

/// A single-tap feedback delay with in-loop damping.
///
/// The temple bed's post-gain signal feeds the loop; the delayed return
/// sums into the master bus in parallel with the dry signal, which reads
/// as a diffuse, reverberant space around the bed.
#[derive(Debug, Clone)]
pub struct ResonantDelayNetwork {
    line: DelayLine,
    damp: OnePole,
    feedback: f32,
    tap_samples: usize,
}

impl ResonantDelayNetwork {
    /// Create the network at the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        let tap_samples = ((DELAY_SECS * sample_rate) as usize).max(1);
        Self {
            line: DelayLine::new(tap_samples + 1),
            damp: OnePole::new(sample_rate, DAMP_CUTOFF_HZ),
            feedback: FEEDBACK,
            tap_samples,
        }
    }

    /// Set the feedback gain, clamped to [0, 0.95].
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, MAX_FEEDBACK);
    }

    /// Current feedback gain.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Inject one input sample and return the wet (delayed) sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let wet = self.line.read(self.tap_samples);
        let back = self.damp.process(wet) * self.feedback;
        self.line.write(input + back);
        wet
    }

    /// Clear the loop.
    pub fn clear(&mut self) {
        self.line.clear();
        self.damp.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_bed_produces_bounded_output() {
        let mut bed = NoiseBed::new(48000.0, 11);
        let mut sum = 0.0f32;
        for _ in 0..48000 {
            let v = bed.process();
            assert!(v.abs() < 1.0);
            sum += v.abs();
        }
        assert!(sum > 0.0, "bed is silent");
    }

    #[test]
    fn feedback_always_below_unity() {
        let mut net = ResonantDelayNetwork::new(48000.0);
        net.set_feedback(1.7);
        assert!(net.feedback() < 1.0);
        net.set_feedback(-0.5);
        assert!(net.feedback() >= 0.0);
    }

    #[test]
    fn impulse_envelope_strictly_decreasing_across_loop_periods() {
        let sample_rate = 8000.0; // short loop keeps the test fast
        let mut net = ResonantDelayNetwork::new(sample_rate);
        let period = ((DELAY_SECS * sample_rate) as usize).max(1);

        // Inject a unit impulse, then track the peak magnitude within each
        // successive loop period.
        let mut peaks = Vec::new();
        let mut peak = 0.0f32;
        for n in 0..(period * 6) {
            let input = if n == 0 { 1.0 } else { 0.0 };
            let wet = net.process(input);
            peak = peak.max(wet.abs());
            if (n + 1) % period == 0 {
                peaks.push(peak);
                peak = 0.0;
            }
        }

        // First period is the impulse arriving; every later echo is
        // strictly smaller than its predecessor.
        for pair in peaks.windows(2).skip(1) {
            assert!(
                pair[1] < pair[0],
                "echo envelope not decreasing: {peaks:?}"
            );
        }
        assert!(peaks[1] > 0.0, "no echo came back at all");
    }
}
