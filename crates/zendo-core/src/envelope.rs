//! Attack–decay envelope for one-shot transient voices.
//!
//! Every transient in the engine (glass note, bell partial, chime) has the
//! same contour: a short linear attack up to a peak, then a long
//! exponential glide down to a near-zero floor. The decay multiplies the
//! level by a constant ratio per sample, which is the discrete form of
//! `peak * (floor/peak)^(t/decay)`.
//!
//! The envelope also carries the voice's total lifetime; once elapsed, the
//! owner drops the voice.

use libm::{expf, logf};

/// One-shot linear-attack / exponential-decay envelope.
#[derive(Debug, Clone)]
pub struct AttackDecay {
    level: f32,
    peak: f32,
    attack_step: f32,
    decay_ratio: f32,
    attack_remaining: u32,
    lifetime_remaining: u64,
}

impl AttackDecay {
    /// Create an envelope.
    ///
    /// - `attack_secs`: linear rise from 0 to `peak`
    /// - `decay_secs`: exponential fall from `peak` to `floor`
    /// - `floor`: decay endpoint, must be > 0 (exponential never reaches 0)
    /// - `lifetime_secs`: total voice duration, after which
    ///   [`is_finished`](Self::is_finished) reports true
    pub fn new(
        sample_rate: f32,
        attack_secs: f32,
        peak: f32,
        decay_secs: f32,
        floor: f32,
        lifetime_secs: f32,
    ) -> Self {
        let floor = floor.max(1e-6);
        let peak = peak.max(0.0);
        let attack_samples = ((attack_secs * sample_rate) as u32).max(1);
        let decay_samples = ((decay_secs * sample_rate) as u32).max(1);
        // ratio^decay_samples == floor/peak
        let decay_ratio = if peak > floor {
            expf(logf(floor / peak) / decay_samples as f32)
        } else {
            1.0
        };
        Self {
            level: 0.0,
            peak,
            attack_step: peak / attack_samples as f32,
            decay_ratio,
            attack_remaining: attack_samples,
            lifetime_remaining: (lifetime_secs * sample_rate) as u64,
        }
    }

    /// Advance one sample and return the envelope level.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.lifetime_remaining == 0 {
            return 0.0;
        }
        self.lifetime_remaining -= 1;
        if self.attack_remaining > 0 {
            self.attack_remaining -= 1;
            self.level = (self.level + self.attack_step).min(self.peak);
        } else {
            self.level *= self.decay_ratio;
        }
        self.level
    }

    /// Current level without advancing.
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Whether the voice has run out its lifetime.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.lifetime_remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_peak_at_end_of_attack() {
        let mut env = AttackDecay::new(48000.0, 0.1, 0.6, 5.0, 0.001, 6.0);
        let mut max = 0.0f32;
        for _ in 0..4800 {
            max = max.max(env.advance());
        }
        assert!((max - 0.6).abs() < 1e-3, "peak was {max}");
    }

    #[test]
    fn decay_is_strictly_decreasing() {
        let mut env = AttackDecay::new(48000.0, 0.02, 1.0, 2.0, 0.001, 3.0);
        for _ in 0..(0.02 * 48000.0) as usize + 1 {
            env.advance();
        }
        let mut prev = env.level();
        for _ in 0..48000 {
            let v = env.advance();
            assert!(v < prev, "decay not monotone: {v} >= {prev}");
            prev = v;
        }
    }

    #[test]
    fn hits_floor_at_end_of_decay() {
        let mut env = AttackDecay::new(48000.0, 0.01, 1.0, 1.0, 0.001, 2.0);
        let total = (1.01 * 48000.0) as usize;
        let mut level = 0.0;
        for _ in 0..total {
            level = env.advance();
        }
        assert!((level - 0.001).abs() < 0.0005, "floor miss: {level}");
    }

    #[test]
    fn finishes_after_lifetime() {
        let sr = 48000.0;
        let mut env = AttackDecay::new(sr, 0.01, 0.5, 0.2, 0.001, 0.5);
        for _ in 0..(0.5 * sr) as usize {
            env.advance();
        }
        assert!(env.is_finished());
        assert_eq!(env.advance(), 0.0);
    }

    #[test]
    fn zero_peak_is_silent_but_safe() {
        let mut env = AttackDecay::new(48000.0, 0.02, 0.0, 1.0, 0.001, 1.5);
        for _ in 0..1000 {
            assert!(env.advance().abs() < 1e-6);
        }
    }
}
