//! Noise sources and the engine's PRNG.
//!
//! The engine needs randomness at three places: per-voice detune chosen
//! once at construction, the glass-note scheduler's pitch/pan/interval
//! jitter, and the noise bed's white noise input. None of it needs
//! cryptographic quality, but tests want determinism, so everything draws
//! from a small seedable xorshift generator instead of an OS source.

/// Xorshift32 pseudo-random generator.
///
/// Period 2^32 - 1; state must be non-zero.
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator from a seed. A zero seed is remapped, since the
    /// all-zero state is a fixed point of the xorshift step.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9e3779b9 } else { seed },
        }
    }

    /// Next raw 32-bit value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // 24 mantissa bits of uniformity is plenty for audio jitter.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in [-1, 1).
    #[inline]
    pub fn next_bipolar(&mut self) -> f32 {
        self.next_f32() * 2.0 - 1.0
    }

    /// Uniform float in [lo, hi).
    #[inline]
    pub fn next_range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// Uniform index in [0, len).
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u32() as usize) % len
    }
}

/// Brownian (leaky-integrator) noise.
///
/// Each sample blends the previous output with a little fresh white
/// noise:
///
/// ```text
/// b[n] = (b[n-1] + 0.02 * white) / 1.02
/// out  = b[n] * 3.5
/// ```
///
/// The 1/1.02 leak keeps the walk bounded; the 3.5 makeup gain restores
/// level lost to the integration. Lowpassed further downstream this reads
/// as distant water rather than hiss.
#[derive(Debug, Clone)]
pub struct BrownNoise {
    rng: XorShift32,
    last: f32,
}

/// Integrator leak per the original voicing.
const LEAK: f32 = 1.02;
/// White-noise injection amount.
const INJECT: f32 = 0.02;
/// Makeup gain after integration.
const MAKEUP: f32 = 3.5;

impl BrownNoise {
    /// Create a brownian noise source with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            rng: XorShift32::new(seed),
            last: 0.0,
        }
    }

    /// Next noise sample, roughly within [-1, 1].
    #[inline]
    pub fn next(&mut self) -> f32 {
        let white = self.rng.next_bipolar();
        self.last = (self.last + INJECT * white) / LEAK;
        self.last * MAKEUP
    }

    /// Clear integrator state.
    pub fn reset(&mut self) {
        self.last = 0.0;
    }
}
