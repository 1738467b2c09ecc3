//! Frequency-domain resonator.
//!
//! The resonator is designed directly in the frequency domain. Each FFT bin
//! gets the response of a damped second-order section tuned to the center
//! frequency:
//!
//! ```text
//! H(f) = 1 / (1 + j·x − x²),   x = f / center_frequency
//! ```
//!
//! The response is normalized so its largest magnitude is exactly 1, then
//! raised to the `resonance` power. Exponents above 1 narrow the peak and
//! deepen the skirts; an exponent of 0 flattens the response to a unit
//! impulse. The inverse FFT of the result (real part only) is the kernel
//! that gets convolved with the dry signal.
//!
//! ## Complex powers
//!
//! Non-integer exponents use the principal branch:
//! `z^r = |z|^r · e^{i·r·arg z}` with `arg z` in `(−π, π]`.

use rustfft::num_complex::Complex64;

use super::convolve::convolve_same;
use crate::{FilterKernel, SignalBuffer};
use crate::core::fft::{fft_frequencies, inverse_in_place};
use crate::error::{DspError, Result, check_length, check_sample_rate};
use crate::params::ResonatorParams;

/// A validated resonator configuration.
///
/// # Examples
///
/// ```
/// use resynth::{Resonator, ResonatorParams, WaveformKind, generate};
///
/// let resonator = Resonator::new(ResonatorParams::new(1000.0, 2.0)).unwrap();
/// let dry = generate(WaveformKind::Square, 220.0, 8000.0, 0.25).unwrap();
/// let wet = resonator.apply(&dry).unwrap();
/// assert_eq!(wet.len(), dry.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resonator {
    center_frequency: f64,
    resonance: f64,
}

impl Resonator {
    /// Validates `params`.
    ///
    /// Fails with `InvalidCenterFrequency` for a zero, negative or non-finite
    /// center frequency (it is used as a divisor), and with
    /// `InvalidResonance` for a non-finite exponent.
    pub fn new(params: ResonatorParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            center_frequency: params.center_frequency,
            resonance: params.resonance,
        })
    }

    pub fn center_frequency(&self) -> f64 {
        self.center_frequency
    }

    pub fn resonance(&self) -> f64 {
        self.resonance
    }

    /// Normalized, sharpened frequency response over `length` FFT bins.
    ///
    /// Fails with `InvalidKernelLength` when `length` is zero or above
    /// `MAX_BUFFER_LEN`. A negative exponent turns bins whose response
    /// underflowed to zero into infinities; that case fails with
    /// `InvalidResonance` rather than returning a non-finite response.
    pub fn response(&self, length: usize, sample_rate: f64) -> Result<Vec<Complex64>> {
        let sample_rate = check_sample_rate(sample_rate)?;
        let length = check_length(length)?;

        let mut response: Vec<Complex64> = fft_frequencies(length, sample_rate)
            .into_iter()
            .map(|f| second_order_response(f / self.center_frequency))
            .collect();

        // Bin 0 always sits at 0 Hz where |H| = 1, so the peak is never zero
        let peak = response.iter().fold(0.0_f64, |acc, h| acc.max(h.norm()));
        tracing::debug!(
            center_frequency = self.center_frequency,
            resonance = self.resonance,
            length,
            peak,
            "built resonator response"
        );

        for h in response.iter_mut() {
            *h /= peak;
            if self.resonance != 1.0 {
                *h = h.powf(self.resonance);
            }
        }
        if let Some(bin) = response.iter().position(|h| !h.is_finite()) {
            tracing::warn!(
                bin,
                resonance = self.resonance,
                "sharpened response is not finite"
            );
            return Err(DspError::InvalidResonance(self.resonance));
        }
        Ok(response)
    }

    /// Time-domain kernel: real part of the inverse FFT of [`response`](Self::response).
    pub fn kernel(&self, length: usize, sample_rate: f64) -> Result<FilterKernel> {
        let mut response = self.response(length, sample_rate)?;
        inverse_in_place(&mut response);
        let kernel = response.into_iter().map(|c| c.re).collect();
        Ok(SignalBuffer::from_validated(kernel, sample_rate))
    }

    /// Filters `signal` with a kernel of the same length, in "same" mode.
    pub fn apply(&self, signal: &SignalBuffer) -> Result<SignalBuffer> {
        signal.require_samples()?;
        let kernel = self.kernel(signal.len(), signal.sample_rate())?;
        convolve_same(signal, &kernel)
    }
}

/// `1 / (1 + j·x − x²)`; far above the center the true value underflows
/// toward zero, which is what gets returned instead of NaN.
#[inline]
fn second_order_response(x: f64) -> Complex64 {
    let h = Complex64::new(1.0 - x * x, x).inv();
    if h.is_finite() {
        h
    } else {
        Complex64::new(0.0, 0.0)
    }
}

/// Builds the resonator's time-domain kernel.
///
/// # Arguments
///
/// * `center_frequency` - Frequency of the resonance in Hz; must be positive
/// * `resonance` - Sharpening exponent; any finite value
/// * `length` - Kernel length in samples, normally the dry signal's length
/// * `sample_rate` - Sample rate in Hz
///
/// # Errors
///
/// * `InvalidCenterFrequency` - `center_frequency` is zero, negative or not finite
/// * `InvalidResonance` - `resonance` is not finite, or it is negative and
///   the response vanishes at some bin
/// * `InvalidSampleRate` - `sample_rate` is zero, negative or not finite
/// * `InvalidKernelLength` - `length` is zero or above `MAX_BUFFER_LEN`
///
/// # Examples
///
/// ```
/// use resynth::build_kernel;
///
/// let kernel = build_kernel(1000.0, 1.0, 88200, 44100.0).unwrap();
/// assert_eq!(kernel.len(), 88200);
/// ```
pub fn build_kernel(
    center_frequency: f64,
    resonance: f64,
    length: usize,
    sample_rate: f64,
) -> Result<FilterKernel> {
    Resonator::new(ResonatorParams::new(center_frequency, resonance))?.kernel(length, sample_rate)
}

/// Normalized, sharpened frequency response in FFT bin order.
///
/// This is the spectrum [`build_kernel`] inverse-transforms; its largest
/// magnitude is 1 before sharpening.
pub fn resonance_response(
    center_frequency: f64,
    resonance: f64,
    length: usize,
    sample_rate: f64,
) -> Result<Vec<Complex64>> {
    Resonator::new(ResonatorParams::new(center_frequency, resonance))?.response(length, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_norm(response: &[Complex64]) -> f64 {
        response.iter().fold(0.0_f64, |acc, h| acc.max(h.norm()))
    }

    #[test]
    fn test_kernel_length() {
        for length in [1, 2, 7, 1024, 4410] {
            let kernel = build_kernel(1000.0, 1.0, length, 44100.0).unwrap();
            assert_eq!(kernel.len(), length);
            assert_eq!(kernel.sample_rate(), 44100.0);
        }
    }

    #[test]
    fn test_normalized_peak_is_one() {
        let response = resonance_response(1000.0, 1.0, 88200, 44100.0).unwrap();
        assert!((max_norm(&response) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_peak_sits_below_center() {
        // |H| peaks where x² = 1/2, i.e. at center / √2
        let response = resonance_response(1000.0, 1.0, 88200, 44100.0).unwrap();
        let freqs = fft_frequencies(88200, 44100.0);
        let (peak_bin, _) = response
            .iter()
            .enumerate()
            .filter(|(k, _)| freqs[*k] >= 0.0)
            .fold((0, 0.0_f64), |(best, best_norm), (k, h)| {
                if h.norm() > best_norm {
                    (k, h.norm())
                } else {
                    (best, best_norm)
                }
            });
        let expected = 1000.0 / 2.0_f64.sqrt();
        assert!((freqs[peak_bin] - expected).abs() <= 0.5);
    }

    #[test]
    fn test_resonance_sharpens() {
        let soft = resonance_response(1000.0, 1.0, 4410, 44100.0).unwrap();
        let sharp = resonance_response(1000.0, 4.0, 4410, 44100.0).unwrap();
        // Principal-branch power: magnitudes raise to the 4th power
        for (s, h) in sharp.iter().zip(&soft) {
            assert!((s.norm() - h.norm().powi(4)).abs() < 1e-9);
        }
        // Far from the peak the sharper response is weaker
        assert!(sharp[400].norm() < soft[400].norm());
    }

    #[test]
    fn test_zero_resonance_gives_unit_impulse() {
        let kernel = build_kernel(1000.0, 0.0, 64, 44100.0).unwrap();
        assert!((kernel.samples()[0] - 1.0).abs() < 1e-12);
        for &sample in &kernel.samples()[1..] {
            assert!(sample.abs() < 1e-12);
        }
    }

    #[test]
    fn test_kernel_sum_is_dc_response() {
        let response = resonance_response(1000.0, 1.0, 2048, 44100.0).unwrap();
        let kernel = build_kernel(1000.0, 1.0, 2048, 44100.0).unwrap();
        assert!((kernel.sum() - response[0].re).abs() < 1e-9);
    }

    #[test]
    fn test_negative_resonance_is_finite() {
        let kernel = build_kernel(1000.0, -0.5, 512, 44100.0).unwrap();
        assert!(kernel.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_zero_center_frequency_fails_for_any_resonance() {
        for resonance in [-2.0, 0.0, 0.5, 1.0, 3.0, f64::NAN] {
            assert!(matches!(
                build_kernel(0.0, resonance, 1024, 44100.0),
                Err(DspError::InvalidCenterFrequency(_))
            ));
        }
        assert!(matches!(
            build_kernel(-50.0, 1.0, 1024, 44100.0),
            Err(DspError::InvalidCenterFrequency(_))
        ));
    }

    #[test]
    fn test_zero_length_fails() {
        assert!(matches!(
            build_kernel(1000.0, 1.0, 0, 44100.0),
            Err(DspError::InvalidKernelLength(0))
        ));
    }

    #[test]
    fn test_oversized_length_fails() {
        assert!(matches!(
            build_kernel(1000.0, 1.0, usize::MAX / 8, 44100.0),
            Err(DspError::InvalidKernelLength(_))
        ));
        assert!(matches!(
            resonance_response(1000.0, 1.0, crate::params::MAX_BUFFER_LEN + 1, 44100.0),
            Err(DspError::InvalidKernelLength(_))
        ));
    }

    #[test]
    fn test_negative_resonance_on_vanishing_response_fails() {
        // With a tiny center every bin above DC underflows to zero, and
        // zero to a negative power is infinite
        assert!(matches!(
            build_kernel(1e-160, -1.0, 64, 44100.0),
            Err(DspError::InvalidResonance(r)) if r == -1.0
        ));
        // Positive exponents leave those bins at zero
        let kernel = build_kernel(1e-160, 2.0, 64, 44100.0).unwrap();
        assert!(kernel.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_bad_resonance_and_rate() {
        assert!(matches!(
            build_kernel(1000.0, f64::NAN, 16, 44100.0),
            Err(DspError::InvalidResonance(_))
        ));
        assert!(matches!(
            build_kernel(1000.0, 1.0, 16, 0.0),
            Err(DspError::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn test_apply_keeps_length() {
        let resonator = Resonator::new(ResonatorParams::default()).unwrap();
        let dry = SignalBuffer::new(vec![1.0, 0.0, -1.0, 0.0, 1.0], 8000.0).unwrap();
        let wet = resonator.apply(&dry).unwrap();
        assert_eq!(wet.len(), 5);

        let empty = SignalBuffer::new(Vec::new(), 8000.0).unwrap();
        assert!(matches!(resonator.apply(&empty), Err(DspError::EmptySignal)));
    }
}
