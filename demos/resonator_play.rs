//! Interactive resonator demo.
//!
//! Pick a waveform, tune the oscillator and the resonator from the keyboard,
//! and press Space to render two seconds of audio, play it and plot the
//! filtered waveform and its spectrum. `D` plays the dry oscillator instead.
//!
//! Set `RUST_LOG=resynth=debug` to see the pipeline stages on stderr.

mod common;

use anyhow::Result;
use common::{AudioOut, KeyAction, plot, run_terminal_loop};
use crossterm::event::KeyCode;
use resynth::{
    ResonatorParams, SignalBuffer, SynthesisParams, WaveformKind, WaveformOscillator, render,
};
use std::io::{Write, stdout};
use tracing_subscriber::EnvFilter;

const SEMITONE: f64 = 1.059_463_094_359_295_3;

/// Samples shown in the waveform plot.
const WAVEFORM_WINDOW: usize = 1000;

/// Upper edge of the spectrum plot in Hz.
const SPECTRUM_MAX_HZ: f64 = 1500.0;

const DRY_SECONDS: f64 = 1.0;

/// Peak level for everything sent to the output.
const PLAYBACK_LEVEL: f64 = 0.8;

/// Values the user is editing. Read fresh on every Space press.
struct Controls {
    /// Holds the waveform kind and frequency; also renders the dry preview
    osc: WaveformOscillator,
    center_frequency: f64,
    resonance: f64,
    status: String,
    plots: Vec<String>,
}

impl Controls {
    fn draw(&self) -> Result<()> {
        let mut out = stdout();
        write!(out, "\x1b[2J\x1b[H")?;
        write!(out, "Resonator synth\r\n\r\n")?;
        write!(
            out,
            "  Waveform   [1] Sine  [2] Square  [3] Triangle   -> {}\r\n",
            self.osc.kind()
        )?;
        write!(
            out,
            "  Frequency  [Up/Down]     {:>8.1} Hz\r\n",
            self.osc.frequency()
        )?;
        write!(
            out,
            "  Center     [Left/Right]  {:>8.1} Hz\r\n",
            self.center_frequency
        )?;
        write!(out, "  Resonance  [-/+]         {:>8.2}\r\n\r\n", self.resonance)?;
        write!(out, "  [Space] play   [D] dry   [Q/Esc] quit\r\n\r\n")?;
        write!(out, "  {}\r\n", self.status)?;
        for line in &self.plots {
            write!(out, "  {line}\r\n")?;
        }
        out.flush()?;
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let audio = AudioOut::open()?;
    let defaults = ResonatorParams::default();
    let mut controls = Controls {
        osc: WaveformOscillator::new(WaveformKind::Sine, 440.0, audio.sample_rate),
        center_frequency: defaults.center_frequency,
        resonance: defaults.resonance,
        status: format!("Output at {} Hz", audio.sample_rate),
        plots: Vec::new(),
    };

    run_terminal_loop(&mut controls, Controls::draw, |controls, key| {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(KeyAction::Exit);
            }
            KeyCode::Char('1') => controls.osc.set_kind(WaveformKind::Sine),
            KeyCode::Char('2') => controls.osc.set_kind(WaveformKind::Square),
            KeyCode::Char('3') => controls.osc.set_kind(WaveformKind::Triangle),
            KeyCode::Up => {
                let frequency = controls.osc.frequency() * SEMITONE;
                controls.osc.set_frequency(frequency);
            }
            KeyCode::Down => {
                let frequency = controls.osc.frequency() / SEMITONE;
                controls.osc.set_frequency(frequency);
            }
            KeyCode::Right => controls.center_frequency += 100.0,
            KeyCode::Left => controls.center_frequency -= 100.0,
            KeyCode::Char('+') | KeyCode::Char('=') => controls.resonance += 0.25,
            KeyCode::Char('-') => controls.resonance -= 0.25,
            KeyCode::Char(' ') => play(&audio, controls)?,
            KeyCode::Char('d') | KeyCode::Char('D') => play_dry(&audio, controls)?,
            _ => return Ok(KeyAction::Continue),
        }
        controls.draw()?;
        Ok(KeyAction::Continue)
    })
}

/// Renders the current controls, starts playback and redraws the plots.
/// Synthesis errors become the status line; only audio failures abort the
/// demo.
fn play(audio: &AudioOut, controls: &mut Controls) -> Result<()> {
    let synthesis = SynthesisParams::new(controls.osc.kind(), controls.osc.frequency())
        .with_sample_rate(audio.sample_rate);
    let resonator = ResonatorParams::new(controls.center_frequency, controls.resonance);
    let rendered = match render(&synthesis, &resonator) {
        Ok(rendered) => rendered,
        Err(err) => {
            controls.status = format!("Error: {err}");
            controls.plots.clear();
            return Ok(());
        }
    };

    // Resonator gain swings widely with the settings, so normalize for playback
    audio.play(&normalized(&rendered.filtered))?;

    let (peak_frequency, peak_power) = rendered.spectrum.peak();
    controls.status = format!(
        "Playing {} at {:.1} Hz; spectral peak {:.1} Hz ({:.1} dB)",
        synthesis.kind,
        synthesis.frequency,
        peak_frequency.abs(),
        10.0 * peak_power.log10()
    );

    let band = rendered.spectrum.decibel_band(0.0, SPECTRUM_MAX_HZ);
    controls.plots = plot::waveform(rendered.filtered.samples(), WAVEFORM_WINDOW);
    controls.plots.push(String::new());
    controls
        .plots
        .extend(plot::spectrum(&band, SPECTRUM_MAX_HZ, resonator.center_frequency));
    Ok(())
}

/// Plays the oscillator on its own, from the top, for comparison.
fn play_dry(audio: &AudioOut, controls: &mut Controls) -> Result<()> {
    let len = (audio.sample_rate * DRY_SECONDS) as usize;
    controls.osc.reset();
    let dry = match SignalBuffer::from_signal(&mut controls.osc, len, audio.sample_rate) {
        Ok(dry) => dry,
        Err(err) => {
            controls.status = format!("Error: {err}");
            return Ok(());
        }
    };
    audio.play(&normalized(&dry))?;
    controls.status = format!(
        "Playing dry {} at {:.1} Hz",
        controls.osc.kind(),
        controls.osc.frequency()
    );
    Ok(())
}

fn normalized(buffer: &SignalBuffer) -> Vec<f64> {
    let peak = buffer.peak();
    let gain = if peak > 0.0 { PLAYBACK_LEVEL / peak } else { 0.0 };
    buffer.iter().map(|s| s * gain).collect()
}
