//! Zendo Engine - the procedural ambience synthesizer
//!
//! A pull-model stereo engine producing a continuous, mode-aware
//! soundscape: a temple bed (brownian water, a resonant delay space, and
//! sparse FM glass notes), a breath drone that reacts to breathing-
//! exercise phases, a focus drone, and two one-shot transients (zen bell,
//! start chime).
//!
//! # Architecture
//!
//! - [`AmbienceEngine`] renders audio one sample at a time and is the
//!   only type that touches DSP state.
//! - [`MixController`] owns every smoothed gain; control events become
//!   exponential retargets, never steps.
//! - [`AmbienceHost`] wraps the engine in `Arc<Mutex<_>>` for sharing
//!   between control threads and the audio callback, and degrades to a
//!   silent no-op when audio never starts.
//!
//! All behavior is deterministic for a fixed seed, which is what the
//! tests and the offline renderer rely on.

pub mod drone;
pub mod engine;
pub mod glass;
pub mod host;
pub mod mixer;
pub mod mode;
pub mod noise_bed;
pub mod profile;
pub mod transient;

pub use drone::DroneBank;
pub use engine::AmbienceEngine;
pub use glass::{GlassScheduler, GlassVoice};
pub use host::AmbienceHost;
pub use mixer::{MixController, MixFrame};
pub use mode::{BreathPhase, Mode};
pub use noise_bed::{NoiseBed, ResonantDelayNetwork};
pub use profile::{mode_profile, phase_profile, BedTarget, ModeProfile, PhaseProfile};
pub use transient::{BellVoice, ChimeVoice};
