//! Immutable sample buffers.

use crate::Signal;
use crate::error::{DspError, Result, check_sample_rate};
use crate::params::MAX_BUFFER_LEN;

/// An immutable block of mono samples at a known sample rate.
///
/// Sample `i` sits at time `i / sample_rate`. Buffers are produced once per
/// request and never mutated afterwards; every stage of the pipeline returns
/// a fresh buffer.
///
/// # Examples
///
/// ```
/// use resynth::SignalBuffer;
///
/// let buffer = SignalBuffer::new(vec![0.0, 0.5, -1.0], 44100.0).unwrap();
/// assert_eq!(buffer.len(), 3);
/// assert_eq!(buffer.peak(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBuffer {
    samples: Vec<f64>,
    sample_rate: f64,
}

/// Time-domain impulse response of a filter.
///
/// Kernels share the buffer representation so they can be convolved,
/// analyzed and exported like any other signal.
pub type FilterKernel = SignalBuffer;

impl SignalBuffer {
    /// Wraps `samples` recorded at `sample_rate` Hz.
    ///
    /// Fails with `InvalidSampleRate` when the rate is not a positive
    /// finite number. Empty buffers are allowed; the stages that cannot
    /// handle them report `EmptySignal` themselves.
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Result<Self> {
        let sample_rate = check_sample_rate(sample_rate)?;
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Pulls `len` samples out of a signal source.
    ///
    /// # Arguments
    ///
    /// * `signal` - Any signal source; it is advanced by `len` samples
    /// * `len` - Number of samples to render
    /// * `sample_rate` - Sample rate the source was configured for
    ///
    /// Fails with `InvalidKernelLength` when `len` exceeds
    /// [`MAX_BUFFER_LEN`](crate::params::MAX_BUFFER_LEN).
    pub fn from_signal<S: Signal + ?Sized>(
        signal: &mut S,
        len: usize,
        sample_rate: f64,
    ) -> Result<Self> {
        let sample_rate = check_sample_rate(sample_rate)?;
        if len > MAX_BUFFER_LEN {
            return Err(DspError::InvalidKernelLength(len));
        }
        let mut samples = vec![0.0; len];
        signal.process(&mut samples);
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Internal constructor for stages that already validated the rate.
    pub(crate) fn from_validated(samples: Vec<f64>, sample_rate: f64) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Length of the buffer in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Largest absolute sample value, or 0.0 for an empty buffer.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()))
    }

    /// Sum of all samples (the DC component of the spectrum).
    pub fn sum(&self) -> f64 {
        self.samples.iter().sum()
    }

    /// Fails with `EmptySignal` if there is nothing to process.
    pub(crate) fn require_samples(&self) -> Result<()> {
        if self.samples.is_empty() {
            Err(DspError::EmptySignal)
        } else {
            Ok(())
        }
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

impl AsRef<[f64]> for SignalBuffer {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}

impl<'a> IntoIterator for &'a SignalBuffer {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ramp(f64);

    impl Signal for Ramp {
        fn next_sample(&mut self) -> f64 {
            let value = self.0;
            self.0 += 0.25;
            value
        }
    }

    #[test]
    fn test_rejects_bad_sample_rate() {
        assert!(matches!(
            SignalBuffer::new(vec![0.0], 0.0),
            Err(DspError::InvalidSampleRate(_))
        ));
        assert!(matches!(
            SignalBuffer::new(vec![0.0], f64::INFINITY),
            Err(DspError::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn test_duration() {
        let buffer = SignalBuffer::new(vec![0.0; 88200], 44100.0).unwrap();
        assert_eq!(buffer.duration(), 2.0);
    }

    #[test]
    fn test_from_signal() {
        let mut ramp = Ramp(0.0);
        let buffer = SignalBuffer::from_signal(&mut ramp, 4, 100.0).unwrap();
        assert_eq!(buffer.samples(), &[0.0, 0.25, 0.5, 0.75]);
        assert_eq!(buffer.sample_rate(), 100.0);
    }

    #[test]
    fn test_from_signal_rejects_oversized_length() {
        let mut ramp = Ramp(0.0);
        assert!(matches!(
            SignalBuffer::from_signal(&mut ramp, usize::MAX, 100.0),
            Err(DspError::InvalidKernelLength(usize::MAX))
        ));
        // Nothing was pulled from the source
        assert_eq!(ramp.next_sample(), 0.0);
    }

    #[test]
    fn test_peak_and_sum() {
        let buffer = SignalBuffer::new(vec![0.5, -2.0, 1.0], 10.0).unwrap();
        assert_eq!(buffer.peak(), 2.0);
        assert_eq!(buffer.sum(), -0.5);

        let empty = SignalBuffer::new(Vec::new(), 10.0).unwrap();
        assert_eq!(empty.peak(), 0.0);
        assert!(matches!(empty.require_samples(), Err(DspError::EmptySignal)));
    }
}
