//! Real-time playback through cpal.
//!
//! The output callback locks the shared engine once per buffer and pulls
//! interleaved stereo frames from it. Control threads hold the same lock
//! only for microseconds at a time (a retarget is a few float writes), so
//! contention stays far below buffer deadlines at practical buffer sizes.

use std::sync::{Arc, Mutex, PoisonError};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{info, warn};

use zendo_engine::AmbienceEngine;

use crate::{Error, Result};

/// Output stream parameters.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Frames per buffer.
    pub buffer_size: u32,
    /// Substring match against device names; `None` takes the default
    /// output device.
    pub device_name: Option<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            buffer_size: 256,
            device_name: None,
        }
    }
}

/// A running output stream. Audio plays until this is dropped.
pub struct OutputStream {
    _stream: cpal::Stream,
}

/// Extract device name via `description()` (cpal 0.17+).
fn device_name(device: &cpal::Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Names of the available output devices.
pub fn list_output_devices() -> Result<Vec<String>> {
    let host = cpal::default_host();
    let devices = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;
    Ok(devices
        .filter_map(|device| device_name(&device).ok())
        .collect())
}

fn find_output_device(name: Option<&str>) -> Result<cpal::Device> {
    let host = cpal::default_host();
    match name {
        Some(search) => {
            let search_lower = search.to_lowercase();
            let devices = host
                .output_devices()
                .map_err(|e| Error::Stream(e.to_string()))?;
            for device in devices {
                if let Ok(dev_name) = device_name(&device)
                    && dev_name.to_lowercase().contains(&search_lower)
                {
                    return Ok(device);
                }
            }
            Err(Error::DeviceNotFound(format!(
                "no output device matching '{search}'"
            )))
        }
        None => host.default_output_device().ok_or(Error::NoDevice),
    }
}

/// Start playing the shared engine on an output device.
pub fn start_output_stream(
    engine: Arc<Mutex<AmbienceEngine>>,
    config: &StreamConfig,
) -> Result<OutputStream> {
    let device = find_output_device(config.device_name.as_deref())?;

    let stream_config = cpal::StreamConfig {
        channels: 2,
        sample_rate: config.sample_rate,
        buffer_size: cpal::BufferSize::Fixed(config.buffer_size),
    };

    let stream = device
        .build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut engine = engine.lock().unwrap_or_else(PoisonError::into_inner);
                engine.process_interleaved(data);
            },
            |err| {
                warn!(error = %err, "output stream error");
            },
            None,
        )
        .map_err(|e| Error::Stream(e.to_string()))?;

    stream.play().map_err(|e| Error::Stream(e.to_string()))?;
    info!(
        sample_rate = config.sample_rate,
        buffer_size = config.buffer_size,
        device = device_name(&device).unwrap_or_else(|_| "unknown".into()),
        "output stream started"
    );

    Ok(OutputStream { _stream: stream })
}
