//! Zendo Core - DSP primitives for procedural ambience
//!
//! Foundational building blocks for the zendo soundscape engine, designed
//! for real-time synthesis with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Parameter Smoothing
//!
//! - [`SmoothedParam`] - exponential approach toward a target with a
//!   per-transition time constant. Every audible parameter in the engine
//!   (bed gains, filter cutoffs, the master level) moves through one of
//!   these; nothing ever steps.
//!
//! ## Generators
//!
//! - [`Oscillator`] - phase-accumulation sine/triangle oscillator with a
//!   per-sample FM input for glass-note synthesis
//! - [`Lfo`] - slow sine modulator for drone amplitude and pan movement
//! - [`BrownNoise`] - leaky-integrator colored noise (the "water" texture)
//! - [`XorShift32`] - small seedable PRNG for detune, jitter, and pan
//!
//! ## Filters & Delays
//!
//! - [`OnePole`] - one-pole lowpass (6 dB/oct) for tone shaping and
//!   feedback damping
//! - [`DelayLine`] - fixed-length circular delay for the resonant network
//!
//! ## Envelopes
//!
//! - [`AttackDecay`] - linear attack into exponential decay, the shape of
//!   every transient voice (glass notes, bell partials, chime)
//!
//! ## Utilities
//!
//! - [`constant_power_pan`] - equal-power stereo placement
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! zendo-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod delay;
pub mod envelope;
pub mod lfo;
pub mod noise;
pub mod one_pole;
pub mod osc;
pub mod pan;
pub mod param;

pub use delay::DelayLine;
pub use envelope::AttackDecay;
pub use lfo::Lfo;
pub use noise::{BrownNoise, XorShift32};
pub use one_pole::OnePole;
pub use osc::{Oscillator, Waveform};
pub use pan::constant_power_pan;
pub use param::SmoothedParam;

/// Flush a denormal float to zero.
///
/// Feedback paths and exponential decays drift into the denormal range,
/// where some CPUs take a large per-operation penalty.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
