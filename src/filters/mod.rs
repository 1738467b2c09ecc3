//! Filters applied to generated buffers.
//!
//! This module provides the frequency-domain resonator and the FFT-based
//! convolution used to apply its kernel.

mod convolve;
mod resonator;

pub use convolve::{convolve_full, convolve_same};
pub use resonator::{Resonator, build_kernel, resonance_response};
