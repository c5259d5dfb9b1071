//! Sustained drone beds.
//!
//! Two fixed chords run for the life of the engine: the breath bed (seven
//! triangle voices under one shared, phase-reactive lowpass) and the focus
//! bed (four triangle voices, each with its own filter and a slowly
//! wandering pan). Neither bed starts or stops voices at runtime; the mix
//! controller fades whole beds in and out instead.

use zendo_core::{constant_power_pan, Lfo, OnePole, Oscillator, Waveform, XorShift32};

/// Breath chord: A2, E3, A3, C#4, E4, A4, E5.
const BREATH_FREQS: [f32; 7] = [110.00, 164.81, 220.00, 277.18, 329.63, 440.00, 659.25];

/// Focus chord: C3, Eb3, G3, D4.
const FOCUS_FREQS: [f32; 4] = [130.81, 155.56, 196.00, 293.66];

/// Maximum random detune applied to each breath voice, in Hz.
const BREATH_DETUNE_HZ: f32 = 0.4;

/// Default cutoff of the drone filters in Hz.
const DRONE_CUTOFF_HZ: f32 = 400.0;

/// One sustained voice inside a drone bank.
#[derive(Debug, Clone)]
struct DroneVoice {
    osc: Oscillator,
    amp_lfo: Lfo,
    amp_base: f32,
    amp_depth: f32,
    pan: f32,
    pan_lfo: Option<Lfo>,
    filter: Option<OnePole>,
}

impl DroneVoice {
    #[inline]
    fn process_stereo(&mut self) -> (f32, f32) {
        let mut sample = self.osc.advance();
        if let Some(filter) = &mut self.filter {
            sample = filter.process(sample);
        }
        // Depth can exceed base, so the swell may pass briefly through
        // zero and invert; on a slow drone this reads as a fade, not a
        // glitch.
        let amp = self.amp_base + self.amp_depth * self.amp_lfo.next();
        let pan = match &mut self.pan_lfo {
            Some(lfo) => lfo.next(),
            None => self.pan,
        };
        constant_power_pan(sample * amp, pan)
    }
}

/// A fixed set of drone voices summed into one stereo bed.
#[derive(Debug, Clone)]
pub struct DroneBank {
    voices: Vec<DroneVoice>,
    // Shared post-sum stereo lowpass; only the breath bed carries one,
    // and its cutoff is what the breathing phases automate.
    shared_filter: Option<(OnePole, OnePole)>,
}

impl DroneBank {
    /// The breath bed: seven detuned triangles, alternating hard-left and
    /// hard-right, summed through one stereo lowpass pair.
    pub fn breath(sample_rate: f32, rng: &mut XorShift32) -> Self {
        let voices = BREATH_FREQS
            .iter()
            .enumerate()
            .map(|(i, &freq)| {
                let detuned = freq + rng.next_f32() * BREATH_DETUNE_HZ;
                DroneVoice {
                    osc: Oscillator::new(sample_rate, detuned, Waveform::Triangle),
                    // Staggered rates keep the voices from swelling in
                    // lockstep.
                    amp_lfo: Lfo::new(sample_rate, 0.04 + i as f32 * 0.012),
                    amp_base: 0.04,
                    amp_depth: 0.03,
                    pan: if i % 2 == 0 { -0.8 } else { 0.8 },
                    pan_lfo: None,
                    filter: None,
                }
            })
            .collect();
        Self {
            voices,
            shared_filter: Some((
                OnePole::new(sample_rate, DRONE_CUTOFF_HZ),
                OnePole::new(sample_rate, DRONE_CUTOFF_HZ),
            )),
        }
    }

    /// The focus bed: four filtered triangles whose pans drift across the
    /// field at 0.02 Hz.
    pub fn focus(sample_rate: f32) -> Self {
        let voices = FOCUS_FREQS
            .iter()
            .map(|&freq| DroneVoice {
                osc: Oscillator::new(sample_rate, freq, Waveform::Triangle),
                amp_lfo: Lfo::new(sample_rate, 0.04),
                amp_base: 0.015,
                amp_depth: 0.025,
                pan: 0.0,
                pan_lfo: Some(Lfo::new(sample_rate, 0.02)),
                filter: Some(OnePole::new(sample_rate, DRONE_CUTOFF_HZ)),
            })
            .collect();
        Self {
            voices,
            shared_filter: None,
        }
    }

    /// Move the shared filter cutoff. No-op for banks without one.
    ///
    /// Called at control rate from a smoothed cutoff value, so the filter
    /// coefficient is only recalculated every few dozen samples.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        if let Some((left, right)) = &mut self.shared_filter {
            left.set_cutoff(cutoff_hz);
            right.set_cutoff(cutoff_hz);
        }
    }

    /// Current shared cutoff, if the bank has a shared filter.
    pub fn cutoff_hz(&self) -> Option<f32> {
        self.shared_filter.as_ref().map(|(left, _)| left.cutoff_hz())
    }

    /// Next stereo sample of the whole bank, pre bed-gain.
    #[inline]
    pub fn process_stereo(&mut self) -> (f32, f32) {
        let mut left = 0.0;
        let mut right = 0.0;
        for voice in &mut self.voices {
            let (l, r) = voice.process_stereo();
            left += l;
            right += r;
        }
        if let Some((filter_l, filter_r)) = &mut self.shared_filter {
            left = filter_l.process(left);
            right = filter_r.process(right);
        }
        (left, right)
    }

    /// Number of voices in the bank.
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breath_bank_has_seven_voices_and_a_shared_filter() {
        let mut rng = XorShift32::new(1);
        let bank = DroneBank::breath(48000.0, &mut rng);
        assert_eq!(bank.voice_count(), 7);
        assert_eq!(bank.cutoff_hz(), Some(DRONE_CUTOFF_HZ));
    }

    #[test]
    fn focus_bank_has_four_voices_and_no_shared_filter() {
        let bank = DroneBank::focus(48000.0);
        assert_eq!(bank.voice_count(), 4);
        assert_eq!(bank.cutoff_hz(), None);
    }

    #[test]
    fn output_stays_bounded() {
        let mut rng = XorShift32::new(2);
        let mut bank = DroneBank::breath(48000.0, &mut rng);
        for _ in 0..48000 {
            let (l, r) = bank.process_stereo();
            assert!(l.abs() < 1.0 && r.abs() < 1.0);
        }
    }

    #[test]
    fn raising_shared_cutoff_brightens_the_bed() {
        // Measure high-frequency content as mean adjacent-sample
        // difference; a brighter filter lets more of it through.
        let energy = |cutoff: f32| {
            let mut rng = XorShift32::new(3);
            let mut bank = DroneBank::breath(48000.0, &mut rng);
            bank.set_cutoff(cutoff);
            let mut prev = 0.0f32;
            let mut diff = 0.0f32;
            for _ in 0..48000 {
                let (l, _) = bank.process_stereo();
                diff += (l - prev).abs();
                prev = l;
            }
            diff
        };
        assert!(energy(1200.0) > energy(250.0));
    }

    #[test]
    fn focus_pan_wanders_across_the_field() {
        // Over a full 0.02 Hz pan cycle, both channels must get their turn
        // at carrying more energy.
        let mut bank = DroneBank::focus(1000.0);
        let mut left_dominant = 0usize;
        let mut right_dominant = 0usize;
        for _ in 0..50_000 {
            let (l, r) = bank.process_stereo();
            if l.abs() > r.abs() {
                left_dominant += 1;
            } else if r.abs() > l.abs() {
                right_dominant += 1;
            }
        }
        assert!(left_dominant > 0 && right_dominant > 0);
    }
}
