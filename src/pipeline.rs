//! One synthesis request, end to end.
//!
//! ```text
//! generate → build_kernel → convolve (same) → power_spectrum
//! ```
//!
//! Each call owns every buffer it creates, so requests never share data and
//! a failed request leaves nothing behind for the next one.

use crate::analysis::PowerSpectrum;
use crate::error::Result;
use crate::filters::{Resonator, convolve_same};
use crate::oscillators::generate_with;
use crate::params::{ResonatorParams, SynthesisParams};
use crate::{FilterKernel, SignalBuffer};

/// Everything produced by one request.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Dry waveform straight from the generator
    pub signal: SignalBuffer,
    /// Resonator impulse response, same length as `signal`
    pub kernel: FilterKernel,
    /// `signal` convolved with `kernel`; this is what gets played
    pub filtered: SignalBuffer,
    /// Power spectrum of `filtered`
    pub spectrum: PowerSpectrum,
}

impl Rendered {
    /// Sample rate of every buffer in the result.
    pub fn sample_rate(&self) -> f64 {
        self.filtered.sample_rate()
    }
}

/// Runs the full pipeline for one "play" action.
///
/// Both parameter sets are validated before any buffer is allocated.
///
/// # Examples
///
/// ```
/// use resynth::{ResonatorParams, SynthesisParams, WaveformKind, render};
///
/// let synthesis = SynthesisParams::new(WaveformKind::Sine, 440.0).with_duration(0.1);
/// let rendered = render(&synthesis, &ResonatorParams::default()).unwrap();
/// assert_eq!(rendered.filtered.len(), 4410);
/// assert_eq!(rendered.spectrum.len(), 4410);
/// ```
pub fn render(synthesis: &SynthesisParams, resonator: &ResonatorParams) -> Result<Rendered> {
    synthesis.validate()?;
    let resonator = Resonator::new(*resonator)?;

    let span = tracing::debug_span!(
        "render",
        kind = %synthesis.kind,
        frequency = synthesis.frequency,
        center_frequency = resonator.center_frequency(),
        resonance = resonator.resonance()
    );
    let _guard = span.enter();

    let signal = generate_with(synthesis)?;
    let kernel = resonator.kernel(signal.len(), signal.sample_rate())?;
    let filtered = convolve_same(&signal, &kernel)?;
    let spectrum = PowerSpectrum::of(&filtered)?;
    tracing::debug!(
        len = filtered.len(),
        peak = filtered.peak(),
        "rendered request"
    );

    Ok(Rendered {
        signal,
        kernel,
        filtered,
        spectrum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DspError, WaveformKind};

    #[test]
    fn test_render_lengths() {
        let synthesis = SynthesisParams::new(WaveformKind::Triangle, 330.0).with_duration(0.05);
        let rendered = render(&synthesis, &ResonatorParams::new(800.0, 2.0)).unwrap();
        let n = synthesis.num_samples();
        assert_eq!(rendered.signal.len(), n);
        assert_eq!(rendered.kernel.len(), n);
        assert_eq!(rendered.filtered.len(), n);
        assert_eq!(rendered.spectrum.len(), n);
        assert_eq!(rendered.sample_rate(), 44100.0);
    }

    #[test]
    fn test_invalid_request_fails_before_work() {
        let synthesis = SynthesisParams::new(WaveformKind::Sine, 0.0);
        assert!(matches!(
            render(&synthesis, &ResonatorParams::default()),
            Err(DspError::InvalidFrequency(_))
        ));

        let synthesis = SynthesisParams::new(WaveformKind::Sine, 440.0);
        assert!(matches!(
            render(&synthesis, &ResonatorParams::new(0.0, 1.0)),
            Err(DspError::InvalidCenterFrequency(_))
        ));
    }

    #[test]
    fn test_failure_does_not_affect_next_request() {
        let synthesis = SynthesisParams::new(WaveformKind::Square, 200.0).with_duration(0.02);
        let before = render(&synthesis, &ResonatorParams::default()).unwrap();
        assert!(render(&synthesis, &ResonatorParams::new(-1.0, 1.0)).is_err());
        let after = render(&synthesis, &ResonatorParams::default()).unwrap();
        assert_eq!(before.filtered, after.filtered);
    }
}
