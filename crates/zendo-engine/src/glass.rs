//! Glass notes: sparse FM chimes inside the temple bed.
//!
//! A two-operator FM voice (sine carrier, sine modulator at twice the
//! carrier frequency) whose modulation depth collapses from 100 Hz to
//! 1 Hz over the first second. The note starts inharmonic and metallic
//! and relaxes into a near-pure tone as it rings out, which is what makes
//! it read as struck glass.
//!
//! Notes are spawned by a sample-counted scheduler at random intervals of
//! 3 to 7 seconds. The scheduler always re-arms itself when its countdown
//! elapses, even when firing is currently suppressed (music muted or the
//! engine suspended), so the stream of notes resumes on its own once
//! suppression lifts.

use zendo_core::{constant_power_pan, AttackDecay, Oscillator, Waveform, XorShift32};

/// Pentatonic fragment the notes are drawn from: Eb3, F3, G3, Bb3, C4.
const GLASS_SCALE: [f32; 5] = [155.56, 174.61, 196.00, 233.08, 261.63];

/// Initial FM deviation in Hz.
const MOD_INDEX_START_HZ: f32 = 100.0;

/// Deviation floor the glide settles on.
const MOD_INDEX_END_HZ: f32 = 1.0;

/// Duration of the deviation glide in seconds.
const MOD_GLIDE_SECS: f32 = 1.0;

/// Amplitude contour: fast rise, five-second ring-out, voice dropped at
/// six seconds.
const GLASS_ATTACK_SECS: f32 = 0.1;
const GLASS_PEAK: f32 = 0.06;
const GLASS_DECAY_SECS: f32 = 4.9;
const GLASS_FLOOR: f32 = 0.001;
const GLASS_LIFETIME_SECS: f32 = 6.0;

/// Notes land anywhere in the middle of the stereo field.
const GLASS_PAN_SPREAD: f32 = 0.8;

/// Default scheduler interval bounds in seconds.
const INTERVAL_MIN_SECS: f32 = 3.0;
const INTERVAL_MAX_SECS: f32 = 7.0;

/// One sounding glass note.
#[derive(Debug, Clone)]
pub struct GlassVoice {
    carrier: Oscillator,
    modulator: Oscillator,
    mod_index_hz: f32,
    mod_glide_ratio: f32,
    env: AttackDecay,
    pan: f32,
}

impl GlassVoice {
    /// Start a note at `freq_hz`, panned to `pan`.
    pub fn new(sample_rate: f32, freq_hz: f32, pan: f32) -> Self {
        let glide_samples = (MOD_GLIDE_SECS * sample_rate).max(1.0);
        Self {
            carrier: Oscillator::new(sample_rate, freq_hz, Waveform::Sine),
            modulator: Oscillator::new(sample_rate, freq_hz * 2.0, Waveform::Sine),
            mod_index_hz: MOD_INDEX_START_HZ,
            // ratio^glide_samples == end/start
            mod_glide_ratio: libm::expf(
                libm::logf(MOD_INDEX_END_HZ / MOD_INDEX_START_HZ) / glide_samples,
            ),
            env: AttackDecay::new(
                sample_rate,
                GLASS_ATTACK_SECS,
                GLASS_PEAK,
                GLASS_DECAY_SECS,
                GLASS_FLOOR,
                GLASS_LIFETIME_SECS,
            ),
            pan,
        }
    }

    /// Next stereo sample. Returns silence once finished.
    #[inline]
    pub fn process_stereo(&mut self) -> (f32, f32) {
        let deviation = self.modulator.advance() * self.mod_index_hz;
        let sample = self.carrier.advance_fm(deviation);
        self.mod_index_hz = (self.mod_index_hz * self.mod_glide_ratio).max(MOD_INDEX_END_HZ);
        constant_power_pan(sample * self.env.advance(), self.pan)
    }

    /// Whether the note has rung out and can be dropped.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.env.is_finished()
    }
}

/// Sample-counted scheduler that spawns [`GlassVoice`]s.
#[derive(Debug, Clone)]
pub struct GlassScheduler {
    rng: XorShift32,
    sample_rate: f32,
    countdown: u64,
    interval_min_secs: f32,
    interval_max_secs: f32,
    cancelled: bool,
}

impl GlassScheduler {
    /// Create a scheduler that fires on its first tick.
    pub fn new(sample_rate: f32, seed: u32) -> Self {
        Self {
            rng: XorShift32::new(seed),
            sample_rate,
            countdown: 0,
            interval_min_secs: INTERVAL_MIN_SECS,
            interval_max_secs: INTERVAL_MAX_SECS,
            cancelled: false,
        }
    }

    /// Override the interval bounds in seconds. Bounds are sanitized so
    /// the scheduler can never spin: the minimum is floored at 0.1 s and
    /// the maximum never falls below the minimum.
    pub fn set_interval_bounds(&mut self, min_secs: f32, max_secs: f32) {
        self.interval_min_secs = min_secs.max(0.1);
        self.interval_max_secs = max_secs.max(self.interval_min_secs);
    }

    /// Advance one sample. Returns a new voice when the countdown elapses
    /// and `allowed` is true.
    ///
    /// The countdown re-arms on every expiry regardless of `allowed`; a
    /// suppressed firing is skipped, not deferred.
    #[inline]
    pub fn tick(&mut self, allowed: bool) -> Option<GlassVoice> {
        if self.cancelled {
            return None;
        }
        if self.countdown > 0 {
            self.countdown -= 1;
            return None;
        }
        let interval_secs = self.rng.next_range(self.interval_min_secs, self.interval_max_secs);
        self.countdown = (interval_secs * self.sample_rate) as u64;
        if !allowed {
            return None;
        }
        let freq = GLASS_SCALE[self.rng.next_index(GLASS_SCALE.len())];
        let pan = self.rng.next_range(-GLASS_PAN_SPREAD, GLASS_PAN_SPREAD);
        Some(GlassVoice::new(self.sample_rate, freq, pan))
    }

    /// Permanently stop the scheduler. Used at engine teardown.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Whether the scheduler has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 8000.0;

    #[test]
    fn voice_peaks_near_its_target_level() {
        let mut voice = GlassVoice::new(SR, 196.0, 0.0);
        let mut peak = 0.0f32;
        for _ in 0..(SR as usize) {
            let (l, r) = voice.process_stereo();
            peak = peak.max(l.abs().max(r.abs()));
        }
        // Constant-power center pan scales by cos(π/4).
        let expected = GLASS_PEAK * core::f32::consts::FRAC_1_SQRT_2;
        assert!(
            (peak - expected).abs() < expected * 0.2,
            "peak {peak}, expected ~{expected}"
        );
    }

    #[test]
    fn voice_finishes_after_lifetime() {
        let mut voice = GlassVoice::new(SR, 233.08, 0.5);
        for _ in 0..(GLASS_LIFETIME_SECS * SR) as usize {
            voice.process_stereo();
        }
        assert!(voice.is_finished());
        let (l, r) = voice.process_stereo();
        assert_eq!((l, r), (0.0, 0.0));
    }

    #[test]
    fn first_tick_fires_immediately() {
        let mut sched = GlassScheduler::new(SR, 7);
        assert!(sched.tick(true).is_some());
    }

    #[test]
    fn intervals_stay_within_three_to_seven_seconds() {
        let mut sched = GlassScheduler::new(SR, 21);
        sched.tick(true);
        let mut since_last = 0u64;
        let mut fired = 0;
        for _ in 0..(60.0 * SR) as usize {
            since_last += 1;
            if sched.tick(true).is_some() {
                let secs = since_last as f32 / SR;
                assert!(
                    (INTERVAL_MIN_SECS..=INTERVAL_MAX_SECS + 0.01).contains(&secs),
                    "interval {secs}s out of range"
                );
                since_last = 0;
                fired += 1;
            }
        }
        assert!(fired >= 8, "only {fired} notes in a minute");
    }

    #[test]
    fn suppressed_scheduler_skips_but_keeps_running() {
        let mut sched = GlassScheduler::new(SR, 3);
        // Suppressed through what would have been several firings.
        for _ in 0..(30.0 * SR) as usize {
            assert!(sched.tick(false).is_none());
        }
        // Once allowed again, a note arrives within one full interval.
        let max_wait = (INTERVAL_MAX_SECS * SR) as usize + 1;
        let fired = (0..max_wait).any(|_| sched.tick(true).is_some());
        assert!(fired, "scheduler never recovered from suppression");
    }

    #[test]
    fn interval_bounds_are_sanitized() {
        let mut sched = GlassScheduler::new(SR, 11);
        sched.set_interval_bounds(2.0, 0.5);
        sched.tick(true); // arm with the new bounds
        let mut since_last = 0u64;
        for _ in 0..(10.0 * SR) as usize {
            since_last += 1;
            if sched.tick(true).is_some() {
                let secs = since_last as f32 / SR;
                assert!(secs >= 2.0 - 0.01, "max below min not clamped: {secs}s");
                since_last = 0;
            }
        }
    }

    #[test]
    fn cancelled_scheduler_never_fires_again() {
        let mut sched = GlassScheduler::new(SR, 9);
        sched.tick(true);
        sched.cancel();
        for _ in 0..(20.0 * SR) as usize {
            assert!(sched.tick(true).is_none());
        }
    }
}
