//! Buffer generation from a waveform shape.

use std::f64::consts::PI;

use super::WaveformKind;
use crate::error::Result;
use crate::params::SynthesisParams;
use crate::{Signal, SignalBuffer};

/// An oscillator for any of the [`WaveformKind`] shapes.
///
/// Unlike a phase-accumulating oscillator, each sample is computed from the
/// sample index (`t = index * time_step`). Rendering the same parameters
/// twice therefore gives bit-identical output, with no drift from repeated
/// floating-point additions.
///
/// # Examples
///
/// ```
/// use resynth::{Signal, WaveformKind, WaveformOscillator};
///
/// let mut osc = WaveformOscillator::new(WaveformKind::Sine, 440.0, 44100.0);
/// assert_eq!(osc.next_sample(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct WaveformOscillator {
    kind: WaveformKind,
    frequency: f64,
    /// Seconds between consecutive samples
    time_step: f64,
    /// Index of the next sample to produce
    index: u64,
}

impl WaveformOscillator {
    /// Creates an oscillator stepping at `1 / sample_rate` seconds per sample.
    ///
    /// # Arguments
    ///
    /// * `kind` - Waveform shape
    /// * `frequency` - Frequency in Hz
    /// * `sample_rate` - Sample rate in Hz (e.g., 44100.0 for CD quality)
    pub fn new(kind: WaveformKind, frequency: f64, sample_rate: f64) -> Self {
        Self::with_time_step(kind, frequency, 1.0 / sample_rate)
    }

    /// Creates an oscillator with an explicit time step in seconds.
    pub fn with_time_step(kind: WaveformKind, frequency: f64, time_step: f64) -> Self {
        Self {
            kind,
            frequency,
            time_step,
            index: 0,
        }
    }

    pub fn kind(&self) -> WaveformKind {
        self.kind
    }

    /// Switches the shape; the time position is kept.
    pub fn set_kind(&mut self, kind: WaveformKind) {
        self.kind = kind;
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Changes the frequency. Since phase is derived from time, the next
    /// sample may jump.
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    /// Rewinds to `t = 0`.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Time in seconds of the next sample.
    pub fn time(&self) -> f64 {
        self.index as f64 * self.time_step
    }
}

impl Signal for WaveformOscillator {
    fn next_sample(&mut self) -> f64 {
        let theta = 2.0 * PI * self.frequency * self.time();
        self.index += 1;
        self.kind.sample_at(theta)
    }
}

/// Generates `floor(sample_rate * duration)` samples of a periodic waveform.
///
/// Samples are spaced `duration / N` seconds apart starting at `t = 0`, so the
/// buffer covers `[0, duration)` with the endpoint excluded.
///
/// # Errors
///
/// * `InvalidFrequency` - `frequency` is zero, negative or not finite
/// * `InvalidSampleRate` - `sample_rate` is zero, negative or not finite
/// * `InvalidDuration` - `duration` is zero, negative or not finite
/// * `InvalidKernelLength` - the product floors to zero samples or exceeds
///   `MAX_BUFFER_LEN`
///
/// # Examples
///
/// ```
/// use resynth::{WaveformKind, generate};
///
/// let wave = generate(WaveformKind::Sine, 440.0, 44100.0, 2.0).unwrap();
/// assert_eq!(wave.len(), 88200);
/// assert_eq!(wave.samples()[0], 1.0);
/// ```
pub fn generate(
    kind: WaveformKind,
    frequency: f64,
    sample_rate: f64,
    duration: f64,
) -> Result<SignalBuffer> {
    generate_with(&SynthesisParams {
        kind,
        frequency,
        sample_rate,
        duration,
    })
}

/// Params-object form of [`generate`].
pub fn generate_with(params: &SynthesisParams) -> Result<SignalBuffer> {
    params.validate()?;
    let len = params.num_samples();
    let time_step = params.duration / len as f64;
    let mut osc = WaveformOscillator::with_time_step(params.kind, params.frequency, time_step);
    tracing::debug!(
        kind = %params.kind,
        frequency = params.frequency,
        sample_rate = params.sample_rate,
        len,
        "generating waveform"
    );
    SignalBuffer::from_signal(&mut osc, len, params.sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DspError;

    #[test]
    fn test_length_for_all_kinds() {
        for kind in WaveformKind::ALL {
            let wave = generate(kind, 440.0, 44100.0, 2.0).unwrap();
            assert_eq!(wave.len(), 88200);
            assert_eq!(wave.sample_rate(), 44100.0);
        }
    }

    #[test]
    fn test_length_floors_fractional_sample_count() {
        let wave = generate(WaveformKind::Sine, 3.0, 1000.0, 0.0125).unwrap();
        assert_eq!(wave.len(), 12);
    }

    #[test]
    fn test_sine_starts_at_one() {
        let wave = generate(WaveformKind::Sine, 440.0, 44100.0, 2.0).unwrap();
        assert_eq!(wave.samples()[0], 1.0);
    }

    #[test]
    fn test_sine_is_a_cosine() {
        // Quarter period in: cos(π/2) ≈ 0, sin would be 1
        let wave = generate(WaveformKind::Sine, 1.0, 4.0, 1.0).unwrap();
        assert!(wave.samples()[1].abs() < 1e-12);
        assert!((wave.samples()[2] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_square_values() {
        let wave = generate(WaveformKind::Square, 440.0, 44100.0, 2.0).unwrap();
        assert_eq!(wave.samples()[0], 0.0);
        for &sample in wave.iter() {
            assert!(sample == -1.0 || sample == 0.0 || sample == 1.0);
        }
        assert!(wave.iter().any(|&s| s == 1.0));
        assert!(wave.iter().any(|&s| s == -1.0));
    }

    #[test]
    fn test_triangle_range() {
        let wave = generate(WaveformKind::Triangle, 440.0, 44100.0, 2.0).unwrap();
        for &sample in wave.iter() {
            assert!((-1.0..=1.0).contains(&sample));
        }
        assert!(wave.peak() > 0.95);
    }

    #[test]
    fn test_idempotent() {
        for kind in WaveformKind::ALL {
            let a = generate(kind, 523.25, 44100.0, 2.0).unwrap();
            let b = generate(kind, 523.25, 44100.0, 2.0).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_invalid_frequency() {
        for frequency in [0.0, -440.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                generate(WaveformKind::Sine, frequency, 44100.0, 2.0),
                Err(DspError::InvalidFrequency(_))
            ));
        }
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(matches!(
            generate(WaveformKind::Sine, 440.0, 0.0, 2.0),
            Err(DspError::InvalidSampleRate(_))
        ));
        assert!(matches!(
            generate(WaveformKind::Sine, 440.0, 44100.0, -1.0),
            Err(DspError::InvalidDuration(_))
        ));
        assert!(matches!(
            generate(WaveformKind::Sine, 440.0, 44100.0, 1e-6),
            Err(DspError::InvalidKernelLength(0))
        ));
    }

    #[test]
    fn test_huge_duration_fails_before_allocating() {
        assert!(matches!(
            generate(WaveformKind::Sine, 440.0, 44100.0, 1e12),
            Err(DspError::InvalidKernelLength(_))
        ));
        assert!(matches!(
            generate(WaveformKind::Square, 440.0, 1e300, 1e300),
            Err(DspError::InvalidKernelLength(usize::MAX))
        ));
    }

    #[test]
    fn test_oscillator_matches_generate() {
        let wave = generate(WaveformKind::Triangle, 100.0, 8000.0, 1.0).unwrap();
        let mut osc = WaveformOscillator::new(WaveformKind::Triangle, 100.0, 8000.0);
        // duration / N equals 1 / sample_rate here
        for &expected in wave.iter().take(256) {
            assert!((osc.next_sample() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_frequency_change() {
        let mut osc = WaveformOscillator::new(WaveformKind::Square, 440.0, 44100.0);
        osc.set_frequency(880.0);
        assert_eq!(osc.frequency(), 880.0);
    }

    #[test]
    fn test_kind_change_keeps_time() {
        let mut osc = WaveformOscillator::new(WaveformKind::Sine, 1.0, 4.0);
        osc.next_sample();
        osc.set_kind(WaveformKind::Square);
        assert_eq!(osc.kind(), WaveformKind::Square);
        assert_eq!(osc.time(), 0.25);
        // sin(π/2) = 1
        assert_eq!(osc.next_sample(), 1.0);
    }

    #[test]
    fn test_reset() {
        let mut osc = WaveformOscillator::new(WaveformKind::Sine, 440.0, 44100.0);
        for _ in 0..100 {
            osc.next_sample();
        }
        assert!(osc.time() > 0.0);
        osc.reset();
        assert_eq!(osc.time(), 0.0);
        assert_eq!(osc.next_sample(), 1.0);
    }
}
