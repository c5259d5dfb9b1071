//! One-shot transient voices: the zen bell and the start chime.
//!
//! Both route around the mix automation entirely. They are struck in
//! response to a user-visible event (a timer completing, an exercise
//! starting) and must land at full, predictable level no matter where the
//! bed crossfades currently sit, so the engine sums them in after the
//! master gain.

use zendo_core::{AttackDecay, Oscillator, Waveform};

/// Partial ratios of the bell, over a 55 Hz fundamental. The non-integer
/// ratios (1.1, 1.5, 2.7) are what give the strike its metallic clang.
const BELL_RATIOS: [f32; 6] = [1.0, 1.1, 1.5, 2.0, 2.7, 3.0];

/// Bell fundamental in Hz.
const BELL_FUNDAMENTAL_HZ: f32 = 55.0;

const BELL_ATTACK_SECS: f32 = 0.02;
const BELL_DECAY_SECS: f32 = 9.98;
const BELL_FLOOR: f32 = 0.0001;
const BELL_LIFETIME_SECS: f32 = 10.1;

/// Peak level of partial `i`: a dominant fundamental at 0.6, the
/// overtones falling off as 0.3/(i+1).
fn bell_partial_peak(index: usize) -> f32 {
    if index == 0 {
        0.6
    } else {
        0.3 / (index as f32 + 1.0)
    }
}

/// A struck bell: six sine partials sharing one strike time, each with
/// its own envelope, decaying over ten seconds.
#[derive(Debug, Clone)]
pub struct BellVoice {
    partials: Vec<(Oscillator, AttackDecay)>,
}

impl BellVoice {
    /// Strike the bell. `multiplier` scales every partial's peak; the
    /// timer-complete strike uses 1.2.
    pub fn new(sample_rate: f32, multiplier: f32) -> Self {
        let partials = BELL_RATIOS
            .iter()
            .enumerate()
            .map(|(i, &ratio)| {
                let osc = Oscillator::new(
                    sample_rate,
                    BELL_FUNDAMENTAL_HZ * ratio,
                    Waveform::Sine,
                );
                let env = AttackDecay::new(
                    sample_rate,
                    BELL_ATTACK_SECS,
                    bell_partial_peak(i) * multiplier.max(0.0),
                    BELL_DECAY_SECS,
                    BELL_FLOOR,
                    BELL_LIFETIME_SECS,
                );
                (osc, env)
            })
            .collect();
        Self { partials }
    }

    /// Next mono sample. The bell sits dead center.
    #[inline]
    pub fn process(&mut self) -> f32 {
        let mut sum = 0.0;
        for (osc, env) in &mut self.partials {
            sum += osc.advance() * env.advance();
        }
        sum
    }

    /// Whether the strike has rung out.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.partials.iter().all(|(_, env)| env.is_finished())
    }
}

const CHIME_FREQ_HZ: f32 = 440.0;
const CHIME_ATTACK_SECS: f32 = 0.05;
const CHIME_PEAK: f32 = 0.1;
const CHIME_DECAY_SECS: f32 = 0.55;
const CHIME_FLOOR: f32 = 0.001;
const CHIME_LIFETIME_SECS: f32 = 0.7;

/// The short A4 confirmation chime played when an exercise or timer
/// starts. Unlike the bell, it plays even while music is muted; it is
/// interaction feedback, not music.
#[derive(Debug, Clone)]
pub struct ChimeVoice {
    osc: Oscillator,
    env: AttackDecay,
}

impl ChimeVoice {
    /// Start the chime.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            osc: Oscillator::new(sample_rate, CHIME_FREQ_HZ, Waveform::Sine),
            env: AttackDecay::new(
                sample_rate,
                CHIME_ATTACK_SECS,
                CHIME_PEAK,
                CHIME_DECAY_SECS,
                CHIME_FLOOR,
                CHIME_LIFETIME_SECS,
            ),
        }
    }

    /// Next mono sample.
    #[inline]
    pub fn process(&mut self) -> f32 {
        self.osc.advance() * self.env.advance()
    }

    /// Whether the chime has finished.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.env.is_finished()
    }
}
