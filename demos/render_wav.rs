//! Renders one request to a WAV file.
//!
//! Usage: `cargo run --example render_wav --features wav-export -- [Sine|Square|Triangle] [frequency] [center] [resonance] [out.wav]`

use anyhow::{Context, Result};
use resynth::{ResonatorParams, SynthesisParams, WaveformKind, render, write_wav};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |i: usize, default: &str| args.get(i).cloned().unwrap_or_else(|| default.into());

    let kind: WaveformKind = arg(0, "Sine").parse()?;
    let frequency: f64 = arg(1, "440").parse().context("frequency")?;
    let center_frequency: f64 = arg(2, "1000").parse().context("center frequency")?;
    let resonance: f64 = arg(3, "1.0").parse().context("resonance")?;
    let path = arg(4, "resonator.wav");

    let rendered = render(
        &SynthesisParams::new(kind, frequency),
        &ResonatorParams::new(center_frequency, resonance),
    )?;
    write_wav(&path, &rendered.filtered)?;

    let (peak_frequency, _) = rendered.spectrum.peak();
    println!(
        "Wrote {} samples to {} (spectral peak at {:.1} Hz)",
        rendered.filtered.len(),
        path,
        peak_frequency.abs()
    );
    Ok(())
}
