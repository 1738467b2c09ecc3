//! Resynth - single-shot waveform synthesis through a resonant filter
//!
//! This library generates a periodic waveform, shapes it with a
//! frequency-domain resonator and reports the power spectrum of the result.
//! A front end supplies a waveform selector and three numbers (frequency,
//! center frequency, resonance) and gets back a playable buffer plus the
//! data for a spectrum plot.
//!
//! ```
//! use resynth::{ResonatorParams, SynthesisParams, WaveformKind, render};
//!
//! let kind: WaveformKind = "Square".parse().unwrap();
//! let synthesis = SynthesisParams::new(kind, 220.0).with_duration(0.1);
//! let rendered = render(&synthesis, &ResonatorParams::new(1000.0, 2.0)).unwrap();
//!
//! assert_eq!(rendered.filtered.len(), synthesis.num_samples());
//! ```

pub mod analysis;
pub mod core;
pub mod error;
#[cfg(feature = "wav-export")]
pub mod export;
pub mod filters;
pub mod oscillators;
pub mod params;
pub mod pipeline;

// Re-export commonly used types at the crate root
pub use analysis::{PowerSpectrum, power_spectrum};
pub use crate::core::{FilterKernel, Signal, SignalBuffer, fft_frequencies};
pub use error::{DspError, Result};
#[cfg(feature = "wav-export")]
pub use export::{to_wav_bytes, write_wav};
pub use filters::{Resonator, build_kernel, convolve_full, convolve_same, resonance_response};
pub use oscillators::{WaveformKind, WaveformOscillator, generate, generate_with};
pub use params::{ResonatorParams, SynthesisParams};
pub use pipeline::{Rendered, render};
