//! Stereo placement.

use core::f32::consts::FRAC_PI_4;
use libm::sincosf;

/// Constant-power pan.
///
/// Maps `pan` in [-1, 1] (full left to full right) onto a quarter circle
/// so total power stays constant across the field:
/// `left = cos(angle)`, `right = sin(angle)` with
/// `angle = (pan + 1) * π/4`.
#[inline]
pub fn constant_power_pan(sample: f32, pan: f32) -> (f32, f32) {
    let angle = (pan.clamp(-1.0, 1.0) + 1.0) * FRAC_PI_4;
    let (sin_a, cos_a) = sincosf(angle);
    (sample * cos_a, sample * sin_a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_equal_power() {
        let (l, r) = constant_power_pan(1.0, 0.0);
        assert!((l - r).abs() < 1e-6);
        assert!((l * l + r * r - 1.0).abs() < 1e-5);
    }

    #[test]
    fn hard_left_silences_right() {
        let (l, r) = constant_power_pan(1.0, -1.0);
        assert!((l - 1.0).abs() < 1e-5);
        assert!(r.abs() < 1e-5);
    }

    #[test]
    fn power_constant_across_field() {
        for i in 0..=20 {
            let pan = -1.0 + i as f32 * 0.1;
            let (l, r) = constant_power_pan(1.0, pan);
            assert!((l * l + r * r - 1.0).abs() < 1e-4, "pan {pan}");
        }
    }

    #[test]
    fn out_of_range_pan_clamps() {
        let (l, r) = constant_power_pan(1.0, 5.0);
        assert!(l.abs() < 1e-5);
        assert!((r - 1.0).abs() < 1e-5);
    }
}
