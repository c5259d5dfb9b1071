//! Offline render command.

use std::path::PathBuf;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use zendo_engine::Mode;
use zendo_io::write_wav_stereo;

use super::common::{build_engine, load_settings, resolve_seed};

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Duration in seconds
    #[arg(long, default_value = "30.0")]
    duration: f32,

    /// Mode to render
    #[arg(long)]
    mode: Option<Mode>,

    /// Seed for the engine's randomness
    #[arg(long)]
    seed: Option<u32>,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Strike the zen bell at these times, in seconds (repeatable)
    #[arg(long = "bell-at", value_name = "SECS")]
    bell_at: Vec<f32>,

    /// Play the start chime at these times, in seconds (repeatable)
    #[arg(long = "chime-at", value_name = "SECS")]
    chime_at: Vec<f32>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    if args.duration <= 0.0 {
        anyhow::bail!("duration must be positive");
    }

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(mode) = args.mode {
        settings.mode = mode;
    }
    let seed = resolve_seed(&settings, args.seed);
    let sample_rate = settings.sample_rate;
    let mut engine = build_engine(&settings, seed);

    // Sample-accurate event list, sorted by time.
    let mut events: Vec<(u64, Event)> = args
        .bell_at
        .iter()
        .map(|&secs| ((secs * sample_rate as f32) as u64, Event::Bell))
        .chain(
            args.chime_at
                .iter()
                .map(|&secs| ((secs * sample_rate as f32) as u64, Event::Chime)),
        )
        .collect();
    events.sort_by_key(|(frame, _)| *frame);

    let total_frames = (args.duration * sample_rate as f32) as u64;
    println!(
        "Rendering {:.1}s of '{}' at {} Hz (seed {seed})...",
        args.duration, settings.mode, sample_rate
    );

    let pb = ProgressBar::new(total_frames);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut left = Vec::with_capacity(total_frames as usize);
    let mut right = Vec::with_capacity(total_frames as usize);
    let mut next_event = 0usize;
    for frame in 0..total_frames {
        while next_event < events.len() && events[next_event].0 <= frame {
            match events[next_event].1 {
                Event::Bell => engine.strike_bell(1.0),
                Event::Chime => engine.play_chime(),
            }
            next_event += 1;
        }
        let (l, r) = engine.process_stereo();
        left.push(l);
        right.push(r);
        if frame % 4096 == 0 {
            pb.set_position(frame);
        }
    }
    pb.finish_and_clear();

    write_wav_stereo(&args.output, &left, &right, sample_rate)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}

#[derive(Clone, Copy)]
enum Event {
    Bell,
    Chime,
}
