//! FFT helpers shared by the resonator, the convolver and the analyzer.

use rustfft::FftPlanner;
use rustfft::num_complex::Complex64;

/// Bin center frequencies for an `n`-point transform, in FFT output order.
///
/// Bin `k` maps to `k * sample_rate / n` for the first `(n - 1) / 2 + 1`
/// bins; the remaining bins wrap to negative frequencies starting at
/// `-(n / 2) * sample_rate / n`. For even `n` the Nyquist bin is negative.
///
/// # Examples
///
/// ```
/// use resynth::fft_frequencies;
///
/// assert_eq!(
///     fft_frequencies(8, 8.0),
///     vec![0.0, 1.0, 2.0, 3.0, -4.0, -3.0, -2.0, -1.0]
/// );
/// ```
pub fn fft_frequencies(n: usize, sample_rate: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let scale = sample_rate / n as f64;
    let positive = (n - 1) / 2 + 1;
    (0..n)
        .map(|k| {
            let signed = if k < positive {
                k as f64
            } else {
                k as f64 - n as f64
            };
            signed * scale
        })
        .collect()
}

/// Forward transform of a real signal.
pub fn forward_real(samples: &[f64]) -> Vec<Complex64> {
    let mut buffer: Vec<Complex64> = samples.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    forward_in_place(&mut buffer);
    buffer
}

/// Unnormalized forward transform.
pub fn forward_in_place(buffer: &mut [Complex64]) {
    if buffer.is_empty() {
        return;
    }
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(buffer);
}

/// Inverse transform scaled by `1 / n`, so that it undoes [`forward_in_place`].
pub fn inverse_in_place(buffer: &mut [Complex64]) {
    if buffer.is_empty() {
        return;
    }
    let mut planner = FftPlanner::<f64>::new();
    let ifft = planner.plan_fft_inverse(buffer.len());
    ifft.process(buffer);

    let scale = 1.0 / buffer.len() as f64;
    for value in buffer.iter_mut() {
        *value *= scale;
    }
}
