//! Mix automation.
//!
//! The controller owns every smoothed gain in the engine plus the breath
//! bed's cutoff, and translates control events (mode switches, breath
//! phases, the music toggle) into retargets against the tables in
//! [`crate::profile`]. It never touches audio; the engine pulls one
//! [`MixFrame`] per sample and applies the values itself.

use tracing::debug;
use zendo_core::SmoothedParam;

use crate::mode::{BreathPhase, Mode};
use crate::profile::{
    mode_profile, phase_profile, MASTER_NOMINAL, MASTER_OFF_TAU, MASTER_ON_TAU,
};

/// Default breath-filter cutoff before any phase has been seen, in Hz.
const BREATH_CUTOFF_DEFAULT_HZ: f32 = 400.0;

/// One sample's worth of smoothed mix values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MixFrame {
    /// Temple bed gain.
    pub temple: f32,
    /// Breath bed gain.
    pub breath: f32,
    /// Focus bed gain.
    pub focus: f32,
    /// Master bus gain.
    pub master: f32,
    /// Breath-filter cutoff in Hz.
    pub breath_cutoff_hz: f32,
}

/// Owns the engine's automation state.
///
/// Everything starts silent: the master sits at zero until music is
/// enabled and every bed sits at zero until the first mode is applied, so
/// the engine comes up without a thump.
#[derive(Debug)]
pub struct MixController {
    mode: Mode,
    phase: BreathPhase,
    music_enabled: bool,
    master_ceiling: f32,
    master: SmoothedParam,
    temple: SmoothedParam,
    breath: SmoothedParam,
    focus: SmoothedParam,
    breath_cutoff: SmoothedParam,
}

impl MixController {
    /// Create a controller at the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        let mut controller = Self {
            mode: Mode::default(),
            phase: BreathPhase::default(),
            music_enabled: true,
            master_ceiling: MASTER_NOMINAL,
            master: SmoothedParam::new(0.0, sample_rate, MASTER_ON_TAU),
            temple: SmoothedParam::new(0.0, sample_rate, 3.0),
            breath: SmoothedParam::new(0.0, sample_rate, 3.0),
            focus: SmoothedParam::new(0.0, sample_rate, 3.0),
            breath_cutoff: SmoothedParam::new(BREATH_CUTOFF_DEFAULT_HZ, sample_rate, 2.0),
        };
        controller.apply_mode();
        controller.apply_master();
        controller
    }

    /// Switch the active mode, crossfading all beds. Re-applying the
    /// current mode is a no-op.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        debug!(from = %self.mode, to = %mode, "mode switch");
        self.mode = mode;
        self.apply_mode();
        self.apply_master();
    }

    /// Report a breathing-exercise phase.
    ///
    /// The phase is remembered in any mode but only moves the mix while
    /// the breathe mode is active.
    pub fn set_breath_phase(&mut self, phase: BreathPhase) {
        self.phase = phase;
        if self.mode == Mode::Breathe {
            self.apply_phase();
        }
    }

    /// Enable or disable music. Disabling ramps the master to silence on
    /// a short constant; the beds keep their targets underneath.
    pub fn set_music_enabled(&mut self, enabled: bool) {
        if enabled == self.music_enabled {
            return;
        }
        debug!(enabled, "music toggle");
        self.music_enabled = enabled;
        self.apply_master();
    }

    /// Active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Last reported breath phase.
    pub fn breath_phase(&self) -> BreathPhase {
        self.phase
    }

    /// Whether music is enabled.
    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// Override the master ceiling. Clamped to (0, 1]; non-finite values
    /// keep the current ceiling.
    pub fn set_master_ceiling(&mut self, ceiling: f32) {
        if ceiling.is_finite() {
            self.master_ceiling = ceiling.clamp(f32::MIN_POSITIVE, 1.0);
            self.apply_master();
        }
    }

    /// Advance every smoother one sample.
    #[inline]
    pub fn advance(&mut self) -> MixFrame {
        MixFrame {
            temple: self.temple.advance(),
            breath: self.breath.advance(),
            focus: self.focus.advance(),
            master: self.master.advance(),
            breath_cutoff_hz: self.breath_cutoff.advance(),
        }
    }

    fn apply_mode(&mut self) {
        let profile = mode_profile(self.mode);
        self.temple.retarget(profile.temple.gain, profile.temple.tau_secs);
        self.breath.retarget(profile.breath.gain, profile.breath.tau_secs);
        self.focus.retarget(profile.focus.gain, profile.focus.tau_secs);
        if self.mode == Mode::Breathe {
            self.apply_phase();
        }
    }

    fn apply_phase(&mut self) {
        let profile = phase_profile(self.phase);
        if let Some(gain) = profile.gain {
            self.breath.retarget(gain.gain, gain.tau_secs);
        }
        self.breath_cutoff
            .retarget(profile.cutoff_hz, profile.cutoff_tau_secs);
    }

    fn apply_master(&mut self) {
        if self.music_enabled {
            self.master.retarget(self.master_ceiling, MASTER_ON_TAU);
        } else {
            self.master.retarget(0.0, MASTER_OFF_TAU);
        }
    }
}
