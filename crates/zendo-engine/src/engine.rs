//! The ambience engine: one pull-model stereo synthesizer.
//!
//! Signal flow, per sample:
//!
//! ```text
//! water ─┐
//! glass ─┴→ temple bus ──× temple gain ──┬──────────────┐
//!                                        └→ delay (wet) ┤
//! breath bank ──× breath gain ───────────────────────────┤
//! focus bank ───× focus gain ────────────────────────────┤
//!                                                        ×  master gain
//! bell / chime ──────────────────────────────────────────┴→ out
//! ```
//!
//! The bell and chime sum in after the master multiply: they are event
//! feedback and must sound at full level even mid-fade. All control
//! methods only retarget smoothers or push voices; nothing they do steps
//! an audible value.

use tracing::debug;
use zendo_core::XorShift32;

use crate::drone::DroneBank;
use crate::glass::{GlassScheduler, GlassVoice};
use crate::mixer::MixController;
use crate::mode::{BreathPhase, Mode};
use crate::noise_bed::{NoiseBed, ResonantDelayNetwork};
use crate::transient::{BellVoice, ChimeVoice};

/// Samples between breath-filter coefficient updates. The cutoff smoother
/// still advances per sample; only the filter recalculation is decimated.
const CUTOFF_CONTROL_INTERVAL: u32 = 64;

/// Concurrent glass notes are naturally 2 to 3 (intervals of at least 3 s
/// against a 6 s lifetime); the cap only guards against a pathological
/// scheduler seed.
const MAX_GLASS_VOICES: usize = 8;

/// Overlapping bell strikes worth keeping.
const MAX_BELLS: usize = 4;

/// The complete procedural ambience synthesizer.
///
/// Owns all DSP state and the mix automation. Not `Sync` by design: the
/// host wraps it in a mutex and shares it between the audio callback and
/// control threads.
pub struct AmbienceEngine {
    sample_rate: f32,
    mixer: MixController,
    noise_bed: NoiseBed,
    delay: ResonantDelayNetwork,
    breath_bank: DroneBank,
    focus_bank: DroneBank,
    scheduler: GlassScheduler,
    glass_voices: Vec<GlassVoice>,
    bells: Vec<BellVoice>,
    chimes: Vec<ChimeVoice>,
    suspended: bool,
    cutoff_countdown: u32,
}

impl AmbienceEngine {
    /// Create an engine. `seed` drives all randomness (detune, note
    /// choice, pan, intervals), so a fixed seed renders identically.
    pub fn new(sample_rate: f32, seed: u32) -> Self {
        let mut rng = XorShift32::new(seed);
        let noise_seed = rng.next_u32();
        let scheduler_seed = rng.next_u32();
        Self {
            sample_rate,
            mixer: MixController::new(sample_rate),
            noise_bed: NoiseBed::new(sample_rate, noise_seed),
            delay: ResonantDelayNetwork::new(sample_rate),
            breath_bank: DroneBank::breath(sample_rate, &mut rng),
            focus_bank: DroneBank::focus(sample_rate),
            scheduler: GlassScheduler::new(sample_rate, scheduler_seed),
            glass_voices: Vec::with_capacity(MAX_GLASS_VOICES),
            bells: Vec::with_capacity(MAX_BELLS),
            chimes: Vec::with_capacity(2),
            suspended: false,
            cutoff_countdown: 0,
        }
    }

    /// Sample rate the engine was built for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Switch the active mode.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mixer.set_mode(mode);
    }

    /// Active mode.
    pub fn mode(&self) -> Mode {
        self.mixer.mode()
    }

    /// Report a breathing phase.
    pub fn set_breath_phase(&mut self, phase: BreathPhase) {
        self.mixer.set_breath_phase(phase);
    }

    /// Enable or disable music.
    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.mixer.set_music_enabled(enabled);
    }

    /// Whether music is enabled.
    pub fn music_enabled(&self) -> bool {
        self.mixer.music_enabled()
    }

    /// Strike the zen bell. Silently ignored while music is disabled; the
    /// bell is part of the soundscape, not UI feedback.
    pub fn strike_bell(&mut self, multiplier: f32) {
        if !self.mixer.music_enabled() {
            debug!("bell strike ignored, music disabled");
            return;
        }
        if self.bells.len() >= MAX_BELLS {
            self.bells.remove(0);
        }
        debug!(multiplier, "bell strike");
        self.bells.push(BellVoice::new(self.sample_rate, multiplier));
    }

    /// Play the start chime. Plays even while music is disabled.
    pub fn play_chime(&mut self) {
        debug!("start chime");
        self.chimes.push(ChimeVoice::new(self.sample_rate));
    }

    /// Pause the engine. Output is silent and no state advances, so
    /// resuming picks up exactly where suspension left off.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// Resume after [`suspend`](Self::suspend).
    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// Whether the engine is suspended.
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Stop the glass-note scheduler permanently. Teardown only.
    pub fn cancel_scheduler(&mut self) {
        self.scheduler.cancel();
    }

    /// Number of glass notes currently ringing.
    pub fn glass_voice_count(&self) -> usize {
        self.glass_voices.len()
    }

    /// Override the resonant loop's feedback gain. Clamped below unity.
    pub fn set_delay_feedback(&mut self, feedback: f32) {
        self.delay.set_feedback(feedback);
    }

    /// Override the master ceiling. Clamped to (0, 1].
    pub fn set_master_ceiling(&mut self, ceiling: f32) {
        self.mixer.set_master_ceiling(ceiling);
    }

    /// Override the glass-note interval bounds in seconds.
    pub fn set_glass_interval_bounds(&mut self, min_secs: f32, max_secs: f32) {
        self.scheduler.set_interval_bounds(min_secs, max_secs);
    }

    /// Render one stereo sample.
    #[inline]
    pub fn process_stereo(&mut self) -> (f32, f32) {
        if self.suspended {
            return (0.0, 0.0);
        }

        let frame = self.mixer.advance();

        if self.cutoff_countdown == 0 {
            self.breath_bank.set_cutoff(frame.breath_cutoff_hz);
            self.cutoff_countdown = CUTOFF_CONTROL_INTERVAL;
        }
        self.cutoff_countdown -= 1;

        let allowed = self.mixer.music_enabled();
        if let Some(voice) = self.scheduler.tick(allowed) {
            if self.glass_voices.len() >= MAX_GLASS_VOICES {
                self.glass_voices.remove(0);
            }
            self.glass_voices.push(voice);
        }

        // Temple bus: water plus any ringing glass notes.
        let water = self.noise_bed.process();
        let mut temple_l = water;
        let mut temple_r = water;
        let mut any_glass_done = false;
        for voice in &mut self.glass_voices {
            let (l, r) = voice.process_stereo();
            temple_l += l;
            temple_r += r;
            any_glass_done |= voice.is_finished();
        }
        if any_glass_done {
            self.glass_voices.retain(|v| !v.is_finished());
        }
        temple_l *= frame.temple;
        temple_r *= frame.temple;

        // The post-gain temple signal feeds the resonant loop; its wet
        // return sits in parallel with the dry bus.
        let wet = self.delay.process((temple_l + temple_r) * 0.5);

        let (breath_l, breath_r) = self.breath_bank.process_stereo();
        let (focus_l, focus_r) = self.focus_bank.process_stereo();

        let mut left = temple_l + wet + breath_l * frame.breath + focus_l * frame.focus;
        let mut right = temple_r + wet + breath_r * frame.breath + focus_r * frame.focus;
        left *= frame.master;
        right *= frame.master;

        // Transients bypass the master.
        let mut any_transient_done = false;
        for bell in &mut self.bells {
            let v = bell.process();
            left += v;
            right += v;
            any_transient_done |= bell.is_finished();
        }
        for chime in &mut self.chimes {
            let v = chime.process();
            left += v;
            right += v;
            any_transient_done |= chime.is_finished();
        }
        if any_transient_done {
            self.bells.retain(|b| !b.is_finished());
            self.chimes.retain(|c| !c.is_finished());
        }

        (left, right)
    }

    /// Render into an interleaved stereo buffer.
    pub fn process_interleaved(&mut self, buffer: &mut [f32]) {
        for frame in buffer.chunks_exact_mut(2) {
            let (l, r) = self.process_stereo();
            frame[0] = l;
            frame[1] = r;
        }
    }
}

impl Drop for AmbienceEngine {
    fn drop(&mut self) {
        self.scheduler.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 8000.0;

    fn rms(engine: &mut AmbienceEngine, secs: f32) -> f32 {
        let n = (secs * SR) as usize;
        let mut acc = 0.0f64;
        for _ in 0..n {
            let (l, r) = engine.process_stereo();
            acc += f64::from(l * l + r * r);
        }
        ((acc / n as f64) as f32).sqrt()
    }

    #[test]
    fn produces_audio_in_default_mode() {
        let mut engine = AmbienceEngine::new(SR, 42);
        // Let the master and temple fades arrive.
        rms(&mut engine, 20.0);
        assert!(rms(&mut engine, 5.0) > 1e-4);
    }

    #[test]
    fn output_never_clips_or_blows_up() {
        let mut engine = AmbienceEngine::new(SR, 7);
        engine.strike_bell(1.2);
        engine.play_chime();
        for _ in 0..(60.0 * SR) as usize {
            let (l, r) = engine.process_stereo();
            assert!(l.is_finite() && r.is_finite());
            assert!(l.abs() < 2.0 && r.abs() < 2.0, "runaway: {l} {r}");
        }
    }

    #[test]
    fn suspension_is_silent_and_freezes_state() {
        let mut engine = AmbienceEngine::new(SR, 1);
        rms(&mut engine, 10.0);
        engine.suspend();
        for _ in 0..(5.0 * SR) as usize {
            assert_eq!(engine.process_stereo(), (0.0, 0.0));
        }
        engine.resume();
        assert!(rms(&mut engine, 5.0) > 1e-4, "did not resume");
    }

    #[test]
    fn music_toggle_fades_to_silence_and_back() {
        let mut engine = AmbienceEngine::new(SR, 5);
        rms(&mut engine, 20.0);
        engine.set_music_enabled(false);
        // 0.5 s constant: well settled after 5 s.
        rms(&mut engine, 5.0);
        assert!(rms(&mut engine, 3.0) < 1e-5, "master did not close");

        engine.set_music_enabled(true);
        rms(&mut engine, 10.0);
        assert!(rms(&mut engine, 3.0) > 1e-4, "master did not reopen");
    }

    #[test]
    fn bell_is_gated_on_music_but_chime_is_not() {
        let mut engine = AmbienceEngine::new(SR, 9);
        engine.set_music_enabled(false);
        rms(&mut engine, 5.0); // master fully closed

        engine.strike_bell(1.0);
        assert!(rms(&mut engine, 1.0) < 1e-5, "bell ignored the mute");

        engine.play_chime();
        assert!(rms(&mut engine, 0.5) > 1e-4, "chime must bypass the mute");
    }

    #[test]
    fn bell_rings_through_a_master_fade() {
        let mut engine = AmbienceEngine::new(SR, 13);
        rms(&mut engine, 20.0);
        engine.strike_bell(1.0);
        engine.set_music_enabled(false);
        // Beds fade out within ~2.5 s; the bell keeps ringing past that.
        rms(&mut engine, 4.0);
        assert!(rms(&mut engine, 1.0) > 1e-4, "bell was muted by the fade");
    }

    #[test]
    fn fixed_seed_renders_identically() {
        let mut a = AmbienceEngine::new(SR, 1234);
        let mut b = AmbienceEngine::new(SR, 1234);
        for _ in 0..(10.0 * SR) as usize {
            assert_eq!(a.process_stereo(), b.process_stereo());
        }
    }

    #[test]
    fn interleaved_matches_per_sample() {
        let mut a = AmbienceEngine::new(SR, 77);
        let mut b = AmbienceEngine::new(SR, 77);
        let mut buffer = vec![0.0f32; 512];
        a.process_interleaved(&mut buffer);
        for frame in buffer.chunks_exact(2) {
            let (l, r) = b.process_stereo();
            assert_eq!((frame[0], frame[1]), (l, r));
        }
    }
}
