//! FFT-based linear convolution.
//!
//! Two-second buffers are 88200 samples long, so a direct O(n·m) loop would
//! take billions of multiply-adds. Both inputs are zero-padded to a power of
//! two at least `m + n - 1` long, multiplied in the frequency domain and
//! transformed back, which yields the same linear (not circular) result.

use rustfft::num_complex::Complex64;

use crate::SignalBuffer;
use crate::core::fft::{forward_in_place, inverse_in_place};
use crate::error::{DspError, Result, check_length};

/// Full linear convolution: `len(a) + len(b) - 1` samples.
///
/// # Errors
///
/// * `EmptySignal` - either input has no samples
/// * `InvalidKernelLength` - either input is longer than `MAX_BUFFER_LEN`
/// * `SampleRateMismatch` - the inputs were produced at different rates
pub fn convolve_full(a: &SignalBuffer, b: &SignalBuffer) -> Result<SignalBuffer> {
    check_inputs(a, b)?;
    let full = linear_convolution(a.samples(), b.samples());
    Ok(SignalBuffer::from_validated(full, a.sample_rate()))
}

/// Linear convolution trimmed to the longer input's length, centered.
///
/// Output sample `k` is full-convolution sample `k + (min_len - 1) / 2`,
/// which keeps the center of the shorter input aligned with each output
/// sample.
///
/// # Examples
///
/// ```
/// use resynth::{SignalBuffer, convolve_same};
///
/// let signal = SignalBuffer::new(vec![1.0, 2.0, 3.0], 44100.0).unwrap();
/// let kernel = SignalBuffer::new(vec![0.0, 1.0, 0.5], 44100.0).unwrap();
/// let out = convolve_same(&signal, &kernel).unwrap();
///
/// let expected = [1.0, 2.5, 4.0];
/// for (value, expected) in out.iter().zip(expected) {
///     assert!((value - expected).abs() < 1e-9);
/// }
/// ```
pub fn convolve_same(signal: &SignalBuffer, kernel: &SignalBuffer) -> Result<SignalBuffer> {
    check_inputs(signal, kernel)?;
    let out_len = signal.len().max(kernel.len());
    let offset = (signal.len().min(kernel.len()) - 1) / 2;

    let mut full = linear_convolution(signal.samples(), kernel.samples());
    full.truncate(offset + out_len);
    full.drain(..offset);
    tracing::trace!(out_len, offset, "convolved in same mode");
    Ok(SignalBuffer::from_validated(full, signal.sample_rate()))
}

fn check_inputs(a: &SignalBuffer, b: &SignalBuffer) -> Result<()> {
    a.require_samples()?;
    b.require_samples()?;
    // The padded transform is up to four times the longer input
    check_length(a.len())?;
    check_length(b.len())?;
    if a.sample_rate() != b.sample_rate() {
        return Err(DspError::SampleRateMismatch {
            left: a.sample_rate(),
            right: b.sample_rate(),
        });
    }
    Ok(())
}

/// Both slices must be non-empty.
fn linear_convolution(a: &[f64], b: &[f64]) -> Vec<f64> {
    let full_len = a.len() + b.len() - 1;
    let fft_len = full_len.next_power_of_two();

    let mut fa = padded(a, fft_len);
    let mut fb = padded(b, fft_len);
    forward_in_place(&mut fa);
    forward_in_place(&mut fb);
    for (x, y) in fa.iter_mut().zip(&fb) {
        *x *= *y;
    }
    inverse_in_place(&mut fa);

    fa.into_iter().take(full_len).map(|c| c.re).collect()
}

fn padded(samples: &[f64], len: usize) -> Vec<Complex64> {
    let mut buffer = vec![Complex64::new(0.0, 0.0); len];
    for (slot, &x) in buffer.iter_mut().zip(samples) {
        slot.re = x;
    }
    buffer
}
