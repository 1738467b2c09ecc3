//! WAV export for rendered buffers.
//!
//! Requires the `wav-export` feature. Buffers are written as mono 32-bit
//! float WAV at the buffer's own sample rate, without any level change.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use crate::SignalBuffer;
use crate::error::{DspError, Result};

fn wav_spec(buffer: &SignalBuffer) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate().round() as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    }
}

fn write_samples<W: Write + Seek>(writer: W, buffer: &SignalBuffer) -> Result<()> {
    if let Some(index) = buffer.iter().position(|s| !s.is_finite()) {
        return Err(DspError::NonFiniteSample(index));
    }

    let mut wav = hound::WavWriter::new(writer, wav_spec(buffer))?;
    for &sample in buffer {
        wav.write_sample(sample as f32)?;
    }
    wav.finalize()?;
    Ok(())
}

/// Writes `buffer` to a WAV file at `path`.
///
/// # Errors
///
/// * `NonFiniteSample` - the buffer contains NaN or infinity
/// * `Wav` - the file cannot be created or written
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &SignalBuffer) -> Result<()> {
    let file = std::io::BufWriter::new(std::fs::File::create(path).map_err(hound::Error::from)?);
    write_samples(file, buffer)?;
    tracing::debug!(len = buffer.len(), "wrote wav file");
    Ok(())
}

/// Encodes `buffer` as an in-memory WAV file.
pub fn to_wav_bytes(buffer: &SignalBuffer) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_samples(&mut cursor, buffer)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_reader() {
        let buffer = SignalBuffer::new(vec![0.0, 0.5, -0.25, 1.0], 44100.0).unwrap();
        let bytes = to_wav_bytes(&buffer).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44100);
        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0.0, 0.5, -0.25, 1.0]);
    }

    #[test]
    fn test_rejects_non_finite() {
        let buffer = SignalBuffer::new(vec![0.0, f64::NAN], 44100.0).unwrap();
        assert!(matches!(
            to_wav_bytes(&buffer),
            Err(DspError::NonFiniteSample(1))
        ));
    }
}
