//! Request parameters.
//!
//! A front end builds one `SynthesisParams` and one `ResonatorParams` per
//! "play" action and hands them to [`crate::render`]. Both are plain values;
//! nothing is cached between requests.

use crate::error::{DspError, Result, check_frequency, check_length, check_sample_rate};
use crate::oscillators::WaveformKind;

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Default buffer duration in seconds.
pub const DEFAULT_DURATION: f64 = 2.0;

/// Default resonator center frequency in Hz.
pub const DEFAULT_CENTER_FREQUENCY: f64 = 1000.0;

/// Default resonance exponent.
pub const DEFAULT_RESONANCE: f64 = 1.0;

/// Longest buffer any stage will allocate, in samples (about 6 minutes at
/// 44.1 kHz). Same-mode convolution pads to twice this length.
pub const MAX_BUFFER_LEN: usize = 1 << 24;

/// What to synthesize: waveform shape, pitch and buffer geometry.
///
/// # Examples
///
/// ```
/// use resynth::{SynthesisParams, WaveformKind};
///
/// let params = SynthesisParams::new(WaveformKind::Square, 220.0).with_duration(0.5);
/// assert_eq!(params.num_samples(), 22050);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisParams {
    pub kind: WaveformKind,
    /// Oscillator frequency in Hz
    pub frequency: f64,
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Buffer length in seconds
    pub duration: f64,
}

impl SynthesisParams {
    /// Creates parameters with the default sample rate and duration.
    pub fn new(kind: WaveformKind, frequency: f64) -> Self {
        Self {
            kind,
            frequency,
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration: DEFAULT_DURATION,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Number of samples the generator will produce: `floor(sample_rate * duration)`.
    ///
    /// Meaningless until [`validate`](Self::validate) has passed.
    pub fn num_samples(&self) -> usize {
        (self.sample_rate * self.duration).floor() as usize
    }

    /// Checks every field and the resulting buffer length.
    pub fn validate(&self) -> Result<()> {
        check_frequency(self.frequency)?;
        check_sample_rate(self.sample_rate)?;
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(DspError::InvalidDuration(self.duration));
        }
        // Compared as f64 first: the product can overflow to infinity and the
        // cast saturates
        let samples = (self.sample_rate * self.duration).floor();
        if samples > MAX_BUFFER_LEN as f64 {
            return Err(DspError::InvalidKernelLength(samples as usize));
        }
        check_length(samples as usize)?;
        Ok(())
    }
}

/// Shape of the resonator applied after synthesis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResonatorParams {
    /// Frequency the resonance is tuned to, in Hz
    pub center_frequency: f64,
    /// Exponent applied to the normalized response; larger is sharper
    pub resonance: f64,
}

impl ResonatorParams {
    pub fn new(center_frequency: f64, resonance: f64) -> Self {
        Self {
            center_frequency,
            resonance,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.center_frequency.is_finite() && self.center_frequency > 0.0) {
            return Err(DspError::InvalidCenterFrequency(self.center_frequency));
        }
        if !self.resonance.is_finite() {
            return Err(DspError::InvalidResonance(self.resonance));
        }
        Ok(())
    }
}

impl Default for ResonatorParams {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER_FREQUENCY, DEFAULT_RESONANCE)
    }
}
