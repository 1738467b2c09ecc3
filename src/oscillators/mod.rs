//! Waveform generation.
//!
//! The closed set of waveform shapes and the buffer generator built on
//! top of them.

mod generator;
mod waveform;

pub use generator::{WaveformOscillator, generate, generate_with};
pub use waveform::WaveformKind;
