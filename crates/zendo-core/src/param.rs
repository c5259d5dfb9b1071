//! Exponentially smoothed parameters for artifact-free automation.
//!
//! Every audible parameter change in the engine is expressed as "approach
//! this target with time constant tau", never as a step. The smoother is a
//! one-pole lowpass on the control value:
//!
//! ```text
//! y[n] = y[n-1] + coeff * (target - y[n-1])
//! coeff = 1 - exp(-1 / (tau * sample_rate))
//! ```
//!
//! After one time constant the value has covered ~63.2% of the distance;
//! after five it is settled for audio purposes. Retargeting mid-flight is
//! always safe: the new approach starts from the current value, so
//! overlapping automation never needs to cancel a previous ramp.

use libm::expf;

/// A control value that approaches its target exponentially.
///
/// Time constants are in seconds, matching the engine's mix tables where
/// crossfades run for whole seconds rather than the milliseconds typical
/// of click suppression.
///
/// # Invariants
///
/// - The value never overshoots: it moves monotonically from the current
///   value toward the target.
/// - `coeff` stays in (0, 1]; a zero or negative time constant snaps.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    coeff: f32,
    sample_rate: f32,
    tau_secs: f32,
}

impl SmoothedParam {
    /// Create a smoother at `initial`, already settled, with the given
    /// default time constant in seconds.
    pub fn new(initial: f32, sample_rate: f32, tau_secs: f32) -> Self {
        let mut param = Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate,
            tau_secs,
        };
        param.recalculate_coeff();
        param
    }

    /// Set a new target, keeping the current time constant.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set a new target together with the time constant for this approach.
    ///
    /// This is the primitive the mix controller uses: each table entry
    /// carries its own tau, so a departing bed can fade slower than the
    /// arriving one ramps up.
    #[inline]
    pub fn retarget(&mut self, target: f32, tau_secs: f32) {
        self.target = target;
        if (tau_secs - self.tau_secs).abs() > 1e-9 {
            self.tau_secs = tau_secs;
            self.recalculate_coeff();
        }
    }

    /// Jump to `value` immediately, with no smoothing.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    /// Advance one sample and return the smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Current smoothed value, without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// The value being approached.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// The active time constant in seconds.
    pub fn tau_secs(&self) -> f32 {
        self.tau_secs
    }

    /// Whether the value has effectively reached its target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }

    /// Update the sample rate and rescale the smoothing coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    fn recalculate_coeff(&mut self) {
        if self.tau_secs <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            self.coeff = 1.0 - expf(-1.0 / (self.tau_secs * self.sample_rate));
        }
    }
}
