//! Shared-engine host.
//!
//! The UI thread, timer callbacks, and the audio callback all need the
//! same engine. The host owns it behind `Arc<Mutex<_>>`, hands clones to
//! the audio backend, and forwards control calls. Every control method is
//! a silent no-op until [`initialize`](AmbienceHost::initialize) has run:
//! audio is an enhancement, and a host that never starts must never take
//! the application down with it.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use crate::engine::AmbienceEngine;
use crate::mode::{BreathPhase, Mode};

/// Owns the engine and mediates access to it.
#[derive(Default)]
pub struct AmbienceHost {
    engine: Option<Arc<Mutex<AmbienceEngine>>>,
}

impl AmbienceHost {
    /// Create an uninitialized host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the engine if it does not exist yet, and return a handle to
    /// it. Calling again returns the existing engine untouched; the first
    /// call's sample rate and seed win.
    pub fn initialize(&mut self, sample_rate: f32, seed: u32) -> Arc<Mutex<AmbienceEngine>> {
        if let Some(engine) = &self.engine {
            return Arc::clone(engine);
        }
        info!(sample_rate, seed, "ambience engine starting");
        let engine = Arc::new(Mutex::new(AmbienceEngine::new(sample_rate, seed)));
        self.engine = Some(Arc::clone(&engine));
        engine
    }

    /// Whether the engine has been created.
    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Handle for the audio backend, if initialized.
    pub fn engine(&self) -> Option<Arc<Mutex<AmbienceEngine>>> {
        self.engine.as_ref().map(Arc::clone)
    }

    /// Switch the active mode.
    pub fn set_mode(&self, mode: Mode) {
        self.with_engine(|engine| engine.set_mode(mode));
    }

    /// Report a breathing phase.
    pub fn set_breath_phase(&self, phase: BreathPhase) {
        self.with_engine(|engine| engine.set_breath_phase(phase));
    }

    /// Enable or disable music.
    pub fn set_music_enabled(&self, enabled: bool) {
        self.with_engine(|engine| engine.set_music_enabled(enabled));
    }

    /// Strike the zen bell.
    pub fn strike_bell(&self, multiplier: f32) {
        self.with_engine(|engine| engine.strike_bell(multiplier));
    }

    /// Play the start chime.
    pub fn play_chime(&self) {
        self.with_engine(|engine| engine.play_chime());
    }

    /// Pause rendering.
    pub fn suspend(&self) {
        self.with_engine(AmbienceEngine::suspend);
    }

    /// Resume rendering.
    pub fn resume(&self) {
        self.with_engine(AmbienceEngine::resume);
    }

    fn with_engine(&self, f: impl FnOnce(&mut AmbienceEngine)) {
        match &self.engine {
            Some(engine) => {
                // A panic elsewhere must not silence the app for good;
                // the engine's state is all plain numbers, safe to keep
                // using after a poisoned lock.
                let mut guard = engine.lock().unwrap_or_else(PoisonError::into_inner);
                f(&mut guard);
            }
            None => debug!("ambience control ignored, engine not initialized"),
        }
    }
}

impl Drop for AmbienceHost {
    fn drop(&mut self) {
        if let Some(engine) = &self.engine {
            let mut guard = engine.lock().unwrap_or_else(PoisonError::into_inner);
            guard.cancel_scheduler();
        }
    }
}
