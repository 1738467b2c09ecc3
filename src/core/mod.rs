//! Core signal types.
//!
//! This module provides the building blocks shared by the generator, the
//! resonator and the analyzer:
//! - `Signal` trait for sample-by-sample sources
//! - `SignalBuffer` for immutable, sample-rate-tagged sample buffers
//! - `FilterKernel` for time-domain filter impulse responses
//! - FFT helpers and the bin-frequency layout

mod buffer;
pub mod fft;
mod signal;

pub use buffer::{FilterKernel, SignalBuffer};
pub use fft::fft_frequencies;
pub use signal::Signal;
