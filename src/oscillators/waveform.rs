//! Waveform shapes.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::DspError;

/// Supported waveform shapes.
///
/// Every shape is a function of the oscillator phase angle `2π·f·t` and
/// stays within `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaveformKind {
    /// `cos(θ)`: starts at its peak, so the first sample is exactly 1.0
    #[default]
    Sine,
    /// `sign(sin(θ))`, with `sign(0) = 0`
    Square,
    /// `(2/π)·asin(sin(θ))`: a linear ramp between -1 and 1
    Triangle,
}

impl WaveformKind {
    /// All shapes, in selector order.
    pub const ALL: [WaveformKind; 3] = [Self::Sine, Self::Square, Self::Triangle];

    /// Evaluates the shape at phase angle `theta` (radians).
    ///
    /// # Examples
    ///
    /// ```
    /// use resynth::WaveformKind;
    ///
    /// assert_eq!(WaveformKind::Sine.sample_at(0.0), 1.0);
    /// assert_eq!(WaveformKind::Square.sample_at(0.0), 0.0);
    /// assert_eq!(WaveformKind::Square.sample_at(1.0), 1.0);
    /// ```
    #[inline]
    pub fn sample_at(self, theta: f64) -> f64 {
        match self {
            WaveformKind::Sine => theta.cos(),
            WaveformKind::Square => sign(theta.sin()),
            WaveformKind::Triangle => 2.0 * theta.sin().asin() / PI,
        }
    }

    /// Canonical selector label.
    pub fn label(self) -> &'static str {
        match self {
            WaveformKind::Sine => "Sine",
            WaveformKind::Square => "Square",
            WaveformKind::Triangle => "Triangle",
        }
    }
}

/// Three-valued sign: zero maps to zero rather than to ±1.
#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl fmt::Display for WaveformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WaveformKind {
    type Err = DspError;

    /// Parses a selector label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        WaveformKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DspError::InvalidWaveformKind(s.to_string()))
    }
}
