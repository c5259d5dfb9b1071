//! Live playback command.
//!
//! Plays the ambience on an output device and reads control commands from
//! stdin, standing in for the application UI: mode switches, breath
//! phases, bell and chime triggers, and the music toggle.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError};

use clap::Args;
use tracing::info;

use zendo_engine::{AmbienceHost, BreathPhase, Mode};
use zendo_io::{start_output_stream, StreamConfig};

use super::common::{apply_settings, load_settings, resolve_seed};

#[derive(Args)]
pub struct PlayArgs {
    /// Mode to start in
    #[arg(long)]
    mode: Option<Mode>,

    /// Seed for the engine's randomness
    #[arg(long)]
    seed: Option<u32>,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output device name
    #[arg(long)]
    device: Option<String>,

    /// Buffer size in frames
    #[arg(long, default_value = "256")]
    buffer_size: u32,

    /// Start with music disabled
    #[arg(long)]
    muted: bool,
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(mode) = args.mode {
        settings.mode = mode;
    }
    if args.muted {
        settings.music = false;
    }
    let seed = resolve_seed(&settings, args.seed);

    let mut host = AmbienceHost::new();
    let engine = host.initialize(settings.sample_rate as f32, seed);
    {
        let mut guard = engine.lock().unwrap_or_else(PoisonError::into_inner);
        apply_settings(&mut guard, &settings);
    }

    let config = StreamConfig {
        sample_rate: settings.sample_rate,
        buffer_size: args.buffer_size,
        device_name: args.device,
    };
    let _stream = start_output_stream(Arc::clone(&engine), &config)?;
    info!(
        seed,
        sample_rate = settings.sample_rate,
        mode = %settings.mode,
        "playback session started"
    );

    println!(
        "Playing '{}' at {} Hz (seed {seed})",
        settings.mode, settings.sample_rate
    );
    println!("Commands: mode <m> | phase <p> | bell [intensity] | chime | music on|off | quit");
    println!("Ctrl+C or 'quit' to stop.\n");

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        let line = line?;
        if !handle_command(&host, line.trim()) {
            break;
        }
    }

    println!("Done!");
    Ok(())
}

/// Dispatch one stdin command. Returns false on `quit`.
fn handle_command(host: &AmbienceHost, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => {}
        Some("quit") | Some("exit") => return false,
        Some("mode") => match parts.next().map(str::parse::<Mode>) {
            Some(Ok(mode)) => {
                host.set_mode(mode);
                println!("  mode -> {mode}");
            }
            _ => println!("  usage: mode chat|breathe|journal|focus"),
        },
        Some("phase") => match parts.next().map(str::parse::<BreathPhase>) {
            Some(Ok(phase)) => {
                host.set_breath_phase(phase);
                println!("  phase -> {phase}");
            }
            _ => println!("  usage: phase idle|countdown|inhale|hold|exhale|hold-empty"),
        },
        Some("bell") => {
            let intensity = parts
                .next()
                .and_then(|s| s.parse::<f32>().ok())
                .unwrap_or(1.0);
            host.strike_bell(intensity);
            println!("  bell ({intensity})");
        }
        Some("chime") => {
            host.play_chime();
            println!("  chime");
        }
        Some("music") => match parts.next() {
            Some("on") => {
                host.set_music_enabled(true);
                println!("  music on");
            }
            Some("off") => {
                host.set_music_enabled(false);
                println!("  music off");
            }
            _ => println!("  usage: music on|off"),
        },
        Some(other) => println!("  unknown command '{other}'"),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_host() -> AmbienceHost {
        let mut host = AmbienceHost::new();
        host.initialize(8000.0, 1);
        host
    }

    fn mode_of(host: &AmbienceHost) -> Mode {
        let engine = host.engine().unwrap();
        let guard = engine.lock().unwrap_or_else(PoisonError::into_inner);
        guard.mode()
    }

    #[test]
    fn mode_command_switches_modes() {
        let host = test_host();
        assert!(handle_command(&host, "mode focus"));
        assert_eq!(mode_of(&host), Mode::Focus);
    }

    #[test]
    fn quit_stops_the_loop() {
        let host = test_host();
        assert!(!handle_command(&host, "quit"));
        assert!(!handle_command(&host, "exit"));
    }

    #[test]
    fn garbage_is_tolerated() {
        let host = test_host();
        assert!(handle_command(&host, ""));
        assert!(handle_command(&host, "mode sideways"));
        assert!(handle_command(&host, "frobnicate"));
        assert_eq!(mode_of(&host), Mode::Chat);
    }

    #[test]
    fn music_command_toggles() {
        let host = test_host();
        handle_command(&host, "music off");
        let engine = host.engine().unwrap();
        assert!(!engine.lock().unwrap().music_enabled());
        drop(engine);
        handle_command(&host, "music on");
        let engine = host.engine().unwrap();
        assert!(engine.lock().unwrap().music_enabled());
    }
}
