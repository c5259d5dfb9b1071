//! Audio output layer for the zendo ambience engine.
//!
//! This crate provides:
//!
//! - **Offline rendering**: [`render_stereo`] pulls a fixed number of
//!   frames from an engine, and [`write_wav_stereo`] saves them.
//! - **Real-time playback**: [`start_output_stream`] drives a shared
//!   engine from a cpal output callback.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zendo_engine::AmbienceEngine;
//! use zendo_io::{render_stereo, write_wav_stereo};
//!
//! let mut engine = AmbienceEngine::new(48000.0, 7);
//! let (left, right) = render_stereo(&mut engine, 48000 * 30, |_| {});
//! write_wav_stereo("ambience.wav", &left, &right, 48000)?;
//! ```

mod render;
mod stream;
mod wav;

pub use render::render_stereo;
pub use stream::{list_output_devices, start_output_stream, OutputStream, StreamConfig};
pub use wav::write_wav_stereo;

/// Error types for audio output operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio output operations.
pub type Result<T> = std::result::Result<T, Error>;
