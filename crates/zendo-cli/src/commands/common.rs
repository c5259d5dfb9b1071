//! Shared helpers for CLI commands.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use zendo_config::Settings;
use zendo_engine::AmbienceEngine;

/// Load settings from a file, or defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => Ok(Settings::load(path)?),
        None => Ok(Settings::default()),
    }
}

/// Resolve the seed: explicit flag, then settings file, then wall clock.
pub fn resolve_seed(settings: &Settings, flag: Option<u32>) -> u32 {
    flag.or(settings.seed).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u32)
            .unwrap_or(1)
    })
}

/// Apply everything a settings file configures to an engine.
pub fn apply_settings(engine: &mut AmbienceEngine, settings: &Settings) {
    engine.set_mode(settings.mode);
    engine.set_music_enabled(settings.music);
    engine.set_master_ceiling(settings.master_ceiling);
    engine.set_delay_feedback(settings.delay.feedback);
    engine.set_glass_interval_bounds(
        settings.glass.interval_min_secs,
        settings.glass.interval_max_secs,
    );
}

/// Build an engine from settings with the resolved seed applied.
pub fn build_engine(settings: &Settings, seed: u32) -> AmbienceEngine {
    let mut engine = AmbienceEngine::new(settings.sample_rate as f32, seed);
    apply_settings(&mut engine, settings);
    engine
}
