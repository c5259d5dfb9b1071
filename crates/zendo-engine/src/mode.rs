//! The shared mode and breath-phase contract.
//!
//! `BreathPhase` is owned and driven by the breathing UI; the engine
//! treats it as pure input and never infers phase from its own clocks.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Application mode. Exactly one is active at any time; switching modes
/// crossfades every bed toward that mode's mix profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Conversation view — temple ambience (water, resonant space, glass
    /// notes).
    #[default]
    Chat,
    /// Guided breathing — the breath drone, reactive to [`BreathPhase`].
    Breathe,
    /// Journal view — a faint remainder of the temple bed.
    Journal,
    /// Pomodoro view — the focus drone.
    Focus,
}

impl Mode {
    /// All modes, in UI order.
    pub const ALL: [Mode; 4] = [Mode::Chat, Mode::Breathe, Mode::Journal, Mode::Focus];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Chat => "chat",
            Mode::Breathe => "breathe",
            Mode::Journal => "journal",
            Mode::Focus => "focus",
        };
        f.write_str(name)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(Mode::Chat),
            "breathe" => Ok(Mode::Breathe),
            "journal" => Ok(Mode::Journal),
            "focus" => Ok(Mode::Focus),
            other => Err(format!("unknown mode '{other}'")),
        }
    }
}

/// Breathing-exercise phase, meaningful only while [`Mode::Breathe`] is
/// active. The engine consumes phase transitions; it never times them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreathPhase {
    /// Exercise not running.
    #[default]
    Idle,
    /// Pre-roll count before the first inhale.
    Countdown,
    /// Breathing in — the bed brightens and swells.
    Inhale,
    /// Holding with full lungs.
    Hold,
    /// Breathing out — the bed darkens and recedes.
    Exhale,
    /// Holding with empty lungs.
    HoldEmpty,
}

impl fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BreathPhase::Idle => "idle",
            BreathPhase::Countdown => "countdown",
            BreathPhase::Inhale => "inhale",
            BreathPhase::Hold => "hold",
            BreathPhase::Exhale => "exhale",
            BreathPhase::HoldEmpty => "hold-empty",
        };
        f.write_str(name)
    }
}

impl FromStr for BreathPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(BreathPhase::Idle),
            "countdown" => Ok(BreathPhase::Countdown),
            "inhale" => Ok(BreathPhase::Inhale),
            "hold" => Ok(BreathPhase::Hold),
            "exhale" => Ok(BreathPhase::Exhale),
            "hold-empty" => Ok(BreathPhase::HoldEmpty),
            other => Err(format!("unknown breath phase '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_display() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn phase_round_trips_through_display() {
        for phase in [
            BreathPhase::Idle,
            BreathPhase::Countdown,
            BreathPhase::Inhale,
            BreathPhase::Hold,
            BreathPhase::Exhale,
            BreathPhase::HoldEmpty,
        ] {
            assert_eq!(phase.to_string().parse::<BreathPhase>().unwrap(), phase);
        }
    }
}
