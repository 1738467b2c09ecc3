//! Power spectrum of a buffer, for display.

use crate::SignalBuffer;
use crate::core::fft::{fft_frequencies, forward_real};
use crate::error::{DspError, Result, check_sample_rate};

/// Squared FFT magnitude per bin, paired with each bin's frequency.
///
/// Bins are kept in FFT output order (non-negative frequencies first, then
/// the negative half), the same layout as [`fft_frequencies`].
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSpectrum {
    frequencies: Vec<f64>,
    power: Vec<f64>,
}

impl PowerSpectrum {
    /// Spectrum of a buffer at its own sample rate.
    pub fn of(signal: &SignalBuffer) -> Result<Self> {
        power_spectrum(signal.samples(), signal.sample_rate())
    }

    pub fn len(&self) -> usize {
        self.power.len()
    }

    /// Always false for a spectrum built by this crate.
    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn power(&self) -> &[f64] {
        &self.power
    }

    /// `(frequency, power)` pairs in bin order.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.power.iter().copied())
    }

    /// Bins at or above 0 Hz, the half a plot usually shows.
    pub fn positive_bins(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.bins().filter(|(f, _)| *f >= 0.0)
    }

    /// Power in decibels, `10·log10(power)`. Silent bins map to `-inf`.
    pub fn decibels(&self) -> Vec<f64> {
        self.power.iter().map(|p| 10.0 * p.log10()).collect()
    }

    /// `(frequency, decibels)` for the bins in `min_hz..=max_hz`, in bin order.
    ///
    /// This is the series a spectrum plot draws; with `min_hz >= 0` the
    /// frequencies come out ascending.
    pub fn decibel_band(&self, min_hz: f64, max_hz: f64) -> Vec<(f64, f64)> {
        self.bins()
            .filter(|(f, _)| (min_hz..=max_hz).contains(f))
            .map(|(f, p)| (f, 10.0 * p.log10()))
            .collect()
    }

    /// Strongest bin as `(frequency, power)`; ties go to the lowest bin index.
    pub fn peak(&self) -> (f64, f64) {
        self.bins()
            .fold((0.0, f64::NEG_INFINITY), |best, bin| {
                if bin.1 > best.1 { bin } else { best }
            })
    }

    /// Total power across all bins.
    pub fn total_power(&self) -> f64 {
        self.power.iter().sum()
    }
}

/// Computes the power spectrum `|FFT(signal)|²` of a real signal.
///
/// # Errors
///
/// * `EmptySignal` - `signal` has no samples
/// * `InvalidSampleRate` - `sample_rate` is zero, negative or not finite
///
/// # Examples
///
/// ```
/// use resynth::power_spectrum;
///
/// let spectrum = power_spectrum(&[1.0, 1.0, 1.0, 1.0], 4.0).unwrap();
/// assert_eq!(spectrum.frequencies(), &[0.0, 1.0, -2.0, -1.0]);
/// assert!((spectrum.power()[0] - 16.0).abs() < 1e-9);
/// ```
pub fn power_spectrum(signal: &[f64], sample_rate: f64) -> Result<PowerSpectrum> {
    let sample_rate = check_sample_rate(sample_rate)?;
    if signal.is_empty() {
        return Err(DspError::EmptySignal);
    }

    let power: Vec<f64> = forward_real(signal).iter().map(|c| c.norm_sqr()).collect();
    let frequencies = fft_frequencies(signal.len(), sample_rate);
    tracing::trace!(bins = power.len(), "computed power spectrum");
    Ok(PowerSpectrum { frequencies, power })
}
