//! Spectral analysis for visualization.

mod spectrum;

pub use spectrum::{PowerSpectrum, power_spectrum};
