//! Common utilities for the audio demos.

pub mod plot;

use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, StreamConfig};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::stdout;
use std::panic;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A one-shot buffer the audio callback plays through once.
///
/// Queuing a new buffer cuts off whatever was still playing.
#[derive(Default)]
pub struct Playback {
    samples: Vec<f32>,
    position: usize,
}

impl Playback {
    pub fn queue(&mut self, samples: &[f64]) {
        self.samples = samples.iter().map(|&s| s as f32).collect();
        self.position = 0;
    }

    fn next_sample(&mut self) -> f32 {
        match self.samples.get(self.position) {
            Some(&sample) => {
                self.position += 1;
                sample
            }
            None => 0.0,
        }
    }
}

/// An open output stream plus the buffer it pulls from.
pub struct AudioOut {
    pub playback: Arc<Mutex<Playback>>,
    pub sample_rate: f64,
    _stream: cpal::Stream,
}

impl AudioOut {
    /// Opens the default output device at its default configuration.
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("No output device available"))?;

        let config = device.default_output_config()?;
        let sample_rate = config.sample_rate().0 as f64;
        let playback = Arc::new(Mutex::new(Playback::default()));

        let stream = match config.sample_format() {
            SampleFormat::F32 => create_stream::<f32>(&device, &config.into(), playback.clone())?,
            SampleFormat::I16 => create_stream::<i16>(&device, &config.into(), playback.clone())?,
            SampleFormat::U16 => create_stream::<u16>(&device, &config.into(), playback.clone())?,
            sample_format => {
                return Err(anyhow::anyhow!(
                    "Unsupported sample format: {}",
                    sample_format
                ));
            }
        };
        tracing::info!(sample_rate, "opened audio output");

        Ok(Self {
            playback,
            sample_rate,
            _stream: stream,
        })
    }

    /// Replaces the current buffer and starts playing it from the top.
    pub fn play(&self, samples: &[f64]) -> Result<()> {
        self.playback
            .lock()
            .map_err(|_| anyhow::anyhow!("playback state poisoned"))?
            .queue(samples);
        Ok(())
    }
}

/// Creates an output stream that copies the mono buffer to every channel.
fn create_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    playback: Arc<Mutex<Playback>>,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<f32> + cpal::SizedSample,
{
    let channels = config.channels as usize;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let Ok(mut playback) = playback.lock() else {
                return;
            };
            for frame in data.chunks_mut(channels) {
                let value: T = T::from_sample(playback.next_sample());
                for s in frame.iter_mut() {
                    *s = value;
                }
            }
        },
        |err| tracing::error!("Audio stream error: {}", err),
        None,
    )?;

    stream.play()?;
    Ok(stream)
}

/// Key handling result that controls the event loop
pub enum KeyAction {
    /// Continue the event loop
    Continue,
    /// Exit the event loop
    Exit,
}

/// Runs a terminal event loop in raw mode on the alternate screen.
///
/// `initial_ui` draws once the screen is ready; `key_handler` gets every key
/// press along with the demo state. The terminal is restored on exit and on
/// panic.
pub fn run_terminal_loop<S, F, K>(state: &mut S, initial_ui: F, mut key_handler: K) -> Result<()>
where
    F: FnOnce(&S) -> Result<()>,
    K: FnMut(&mut S, &KeyEvent) -> Result<KeyAction>,
{
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(crossterm::cursor::Hide)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    if let Err(err) = initial_ui(state) {
        cleanup_terminal();
        return Err(err);
    }

    let result = loop {
        match event::poll(Duration::from_millis(50)) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(err) => break Err(err.into()),
        }
        match event::read() {
            Ok(Event::Key(key_event)) if key_event.kind == KeyEventKind::Press => {
                match key_handler(state, &key_event) {
                    Ok(KeyAction::Continue) => {}
                    Ok(KeyAction::Exit) => break Ok(()),
                    Err(err) => break Err(err),
                }
            }
            Ok(_) => {}
            Err(err) => break Err(err.into()),
        }
    };

    cleanup_terminal();
    result
}

/// Cleans up terminal state (cursor, alternate screen, raw mode).
fn cleanup_terminal() {
    let _ = stdout().execute(crossterm::cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}
