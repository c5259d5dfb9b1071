//! Mix-table listing command.

use clap::Args;

use zendo_engine::{mode_profile, phase_profile, BreathPhase, Mode};

#[derive(Args)]
pub struct ProfilesArgs {}

pub fn run(_args: ProfilesArgs) -> anyhow::Result<()> {
    println!("Mode profiles (gain @ time constant):\n");
    println!("{:<10} {:<14} {:<14} {:<14}", "mode", "temple", "breath", "focus");
    for mode in Mode::ALL {
        let p = mode_profile(mode);
        println!(
            "{:<10} {:<14} {:<14} {:<14}",
            mode.to_string(),
            format!("{:.1} @ {:.0}s", p.temple.gain, p.temple.tau_secs),
            format!("{:.1} @ {:.0}s", p.breath.gain, p.breath.tau_secs),
            format!("{:.1} @ {:.0}s", p.focus.gain, p.focus.tau_secs),
        );
    }

    println!("\nBreath phases (applied in breathe mode):\n");
    println!("{:<12} {:<16} {}", "phase", "gain", "cutoff");
    for phase in [
        BreathPhase::Idle,
        BreathPhase::Countdown,
        BreathPhase::Inhale,
        BreathPhase::Hold,
        BreathPhase::Exhale,
        BreathPhase::HoldEmpty,
    ] {
        let p = phase_profile(phase);
        let gain = match p.gain {
            Some(g) => format!("{:.1} @ {:.0}s", g.gain, g.tau_secs),
            None => "(unchanged)".to_string(),
        };
        println!(
            "{:<12} {:<16} {:.0} Hz @ {:.0}s",
            phase.to_string(),
            gain,
            p.cutoff_hz,
            p.cutoff_tau_secs,
        );
    }
    Ok(())
}
