//! Error types for synthesis, filtering and analysis.

use thiserror::Error;

use crate::params::MAX_BUFFER_LEN;

/// Errors raised by the DSP core.
///
/// Every failure is local to one request: nothing is retried and no state is
/// left behind, so the caller can report the error and try again.
#[derive(Debug, Error)]
pub enum DspError {
    #[error("unsupported waveform kind: {0:?} (expected Sine, Square or Triangle)")]
    InvalidWaveformKind(String),

    #[error("frequency must be a positive finite number of Hz, got {0}")]
    InvalidFrequency(f64),

    #[error("center frequency must be a positive finite number of Hz, got {0}")]
    InvalidCenterFrequency(f64),

    #[error("resonance must be finite, got {0}")]
    InvalidResonance(f64),

    #[error("buffer length must be between 1 and {max} samples, got {0}", max = MAX_BUFFER_LEN)]
    InvalidKernelLength(usize),

    #[error("sample rate must be a positive finite number of Hz, got {0}")]
    InvalidSampleRate(f64),

    #[error("duration must be a positive finite number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("signal is empty")]
    EmptySignal,

    #[error("sample rate mismatch: {left} Hz vs {right} Hz")]
    SampleRateMismatch { left: f64, right: f64 },

    #[cfg(feature = "wav-export")]
    #[error("non-finite sample at index {0}")]
    NonFiniteSample(usize),

    #[cfg(feature = "wav-export")]
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DspError>;

pub(crate) fn check_frequency(frequency: f64) -> Result<f64> {
    if frequency.is_finite() && frequency > 0.0 {
        Ok(frequency)
    } else {
        Err(DspError::InvalidFrequency(frequency))
    }
}

/// Accepts `1..=MAX_BUFFER_LEN` samples.
pub(crate) fn check_length(len: usize) -> Result<usize> {
    if len == 0 || len > MAX_BUFFER_LEN {
        Err(DspError::InvalidKernelLength(len))
    } else {
        Ok(len)
    }
}

pub(crate) fn check_sample_rate(sample_rate: f64) -> Result<f64> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(sample_rate)
    } else {
        Err(DspError::InvalidSampleRate(sample_rate))
    }
}
