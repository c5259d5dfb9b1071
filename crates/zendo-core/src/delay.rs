//! Fixed-length circular delay line.
//!
//! The resonant network reads at one fixed tap (0.75 s), so there is no
//! interpolation here — just a ring buffer sized at construction. The
//! buffer is heap-allocated once and never reallocates; processing is
//! allocation-free.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Circular delay line with a whole-sample read tap.
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// Create a delay line able to hold `max_delay_samples`.
    ///
    /// # Panics
    ///
    /// Panics if `max_delay_samples` is 0.
    pub fn new(max_delay_samples: usize) -> Self {
        assert!(max_delay_samples > 0, "delay size must be > 0");
        Self {
            buffer: vec![0.0; max_delay_samples],
            write_pos: 0,
        }
    }

    /// Create from a sample rate and delay time in seconds.
    pub fn from_time(sample_rate: f32, seconds: f32) -> Self {
        Self::new(((sample_rate * seconds) as usize).max(1))
    }

    /// Read the sample written `delay_samples` writes ago.
    ///
    /// Clamped to the buffer capacity.
    #[inline]
    pub fn read(&self, delay_samples: usize) -> f32 {
        let len = self.buffer.len();
        let d = delay_samples.min(len - 1);
        self.buffer[(self.write_pos + len - d - 1) % len]
    }

    /// Write a sample and advance.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Maximum delay in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Zero the buffer.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_by_requested_samples() {
        let mut delay = DelayLine::new(16);
        delay.write(1.0);
        for _ in 0..5 {
            delay.write(0.0);
        }
        assert_eq!(delay.read(5), 1.0);
    }

    #[test]
    fn wraps_cleanly() {
        let mut delay = DelayLine::new(4);
        for i in 0..10 {
            delay.write(i as f32);
        }
        // Last written was 9; three writes ago was 6.
        assert_eq!(delay.read(3), 6.0);
    }

    #[test]
    fn read_clamps_to_capacity() {
        let mut delay = DelayLine::new(8);
        delay.write(2.0);
        let v = delay.read(100);
        assert!(v.is_finite());
    }

    #[test]
    #[should_panic]
    fn zero_size_panics() {
        let _ = DelayLine::new(0);
    }
}
