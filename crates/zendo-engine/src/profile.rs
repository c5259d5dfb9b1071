//! Static mix profiles.
//!
//! Two lookup tables drive all gain automation: one maps [`Mode`] to a
//! target-gain/time-constant pair for every bed, the other maps
//! [`BreathPhase`] to the breath bed's gain and filter cutoff. Both are
//! plain `match` expressions resolved at compile time, not runtime
//! dictionaries; the whole mix policy is readable from this file.

use crate::mode::{BreathPhase, Mode};

/// Nominal master-gain ceiling when music is enabled. Below unity so the
/// beds can sum without clipping.
pub const MASTER_NOMINAL: f32 = 0.8;

/// Master ramp time constant when enabling music, in seconds.
pub const MASTER_ON_TAU: f32 = 1.0;

/// Master ramp time constant when disabling music, in seconds.
pub const MASTER_OFF_TAU: f32 = 0.5;

/// A gain destination and the time constant of the approach toward it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BedTarget {
    /// Target gain, always in [0, 1].
    pub gain: f32,
    /// Smoothing time constant in seconds.
    pub tau_secs: f32,
}

impl BedTarget {
    const fn new(gain: f32, tau_secs: f32) -> Self {
        Self { gain, tau_secs }
    }
}

/// Per-mode targets for all three beds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeProfile {
    /// Temple bed (water + resonant delay + glass notes).
    pub temple: BedTarget,
    /// Breath drone bed.
    pub breath: BedTarget,
    /// Focus drone bed.
    pub focus: BedTarget,
}

/// The mix profile for a mode.
///
/// The departing breath bed fades on a slightly faster constant (2 s)
/// than the 3 s crossfades around it, so the drone does not linger under
/// an arriving texture.
pub fn mode_profile(mode: Mode) -> ModeProfile {
    match mode {
        Mode::Chat => ModeProfile {
            temple: BedTarget::new(1.0, 3.0),
            breath: BedTarget::new(0.0, 2.0),
            focus: BedTarget::new(0.0, 3.0),
        },
        Mode::Breathe => ModeProfile {
            temple: BedTarget::new(0.0, 3.0),
            breath: BedTarget::new(1.0, 3.0),
            focus: BedTarget::new(0.0, 3.0),
        },
        Mode::Journal => ModeProfile {
            temple: BedTarget::new(0.2, 3.0),
            breath: BedTarget::new(0.0, 2.0),
            focus: BedTarget::new(0.0, 3.0),
        },
        Mode::Focus => ModeProfile {
            temple: BedTarget::new(0.0, 3.0),
            breath: BedTarget::new(0.0, 2.0),
            focus: BedTarget::new(1.0, 3.0),
        },
    }
}

/// Breath-bed reaction to a breathing phase. Consulted only under
/// [`Mode::Breathe`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseProfile {
    /// Breath bed gain override. `None` leaves the mode table's target in
    /// place; only the active inhale and exhale push the gain around.
    pub gain: Option<BedTarget>,
    /// Shared drone-filter cutoff target in Hz.
    pub cutoff_hz: f32,
    /// Cutoff smoothing time constant in seconds.
    pub cutoff_tau_secs: f32,
}

/// The breath bed's phase table.
///
/// Inhale ramps are faster than exhale ramps (urgency of an expanding
/// breath versus a slow release); the neutral phases settle toward a
/// midpoint cutoff without touching the gain. Gain targets are capped at
/// unity so the inhale swell never pushes the bed past its mode ceiling.
pub fn phase_profile(phase: BreathPhase) -> PhaseProfile {
    match phase {
        BreathPhase::Inhale => PhaseProfile {
            gain: Some(BedTarget::new(1.0, 3.0)),
            cutoff_hz: 1200.0,
            cutoff_tau_secs: 3.0,
        },
        BreathPhase::Exhale => PhaseProfile {
            gain: Some(BedTarget::new(0.4, 4.0)),
            cutoff_hz: 250.0,
            cutoff_tau_secs: 4.0,
        },
        BreathPhase::Idle
        | BreathPhase::Countdown
        | BreathPhase::Hold
        | BreathPhase::HoldEmpty => PhaseProfile {
            gain: None,
            cutoff_hz: 500.0,
            cutoff_tau_secs: 2.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_mode_targets_within_unit_interval() {
        for mode in Mode::ALL {
            let p = mode_profile(mode);
            for target in [p.temple, p.breath, p.focus] {
                assert!((0.0..=1.0).contains(&target.gain), "{mode}: {target:?}");
                assert!(target.tau_secs > 0.0);
            }
        }
    }

    #[test]
    fn exactly_one_bed_dominates_each_mode() {
        // Journal is the exception: it keeps a faint temple remainder.
        let chat = mode_profile(Mode::Chat);
        assert_eq!(chat.temple.gain, 1.0);
        assert_eq!(chat.breath.gain + chat.focus.gain, 0.0);

        let breathe = mode_profile(Mode::Breathe);
        assert_eq!(breathe.breath.gain, 1.0);
        assert_eq!(breathe.temple.gain + breathe.focus.gain, 0.0);

        let focus = mode_profile(Mode::Focus);
        assert_eq!(focus.focus.gain, 1.0);

        let journal = mode_profile(Mode::Journal);
        assert!(journal.temple.gain > 0.0 && journal.temple.gain < 0.5);
    }

    #[test]
    fn inhale_brighter_and_faster_than_exhale() {
        let inhale = phase_profile(BreathPhase::Inhale);
        let exhale = phase_profile(BreathPhase::Exhale);
        assert!(inhale.cutoff_hz > exhale.cutoff_hz);
        let inhale_gain = inhale.gain.unwrap();
        let exhale_gain = exhale.gain.unwrap();
        assert!(inhale_gain.tau_secs < exhale_gain.tau_secs);
        assert!(inhale_gain.gain > exhale_gain.gain);
        assert!(inhale_gain.gain <= 1.0);
    }

    #[test]
    fn neutral_phases_share_a_midpoint_and_leave_gain_alone() {
        let idle = phase_profile(BreathPhase::Idle);
        assert!(idle.gain.is_none());
        for phase in [
            BreathPhase::Countdown,
            BreathPhase::Hold,
            BreathPhase::HoldEmpty,
        ] {
            assert_eq!(phase_profile(phase), idle);
        }
        let inhale = phase_profile(BreathPhase::Inhale);
        let exhale = phase_profile(BreathPhase::Exhale);
        assert!(idle.cutoff_hz < inhale.cutoff_hz);
        assert!(idle.cutoff_hz > exhale.cutoff_hz);
    }
}
