//! Synthetic WAV export
//!
//! Not a re-encode of the source audio: a fixed 10 second mono clip whose
//! level steps through the envelope, one equal run of frames per bar.

use super::types::ExportError;
use crate::waveform::Envelope;
use std::io::Cursor;

pub const SAMPLE_RATE: u32 = 44_100;
pub const DURATION_SECS: u32 = 10;
pub const TOTAL_FRAMES: u32 = SAMPLE_RATE * DURATION_SECS;

/// Build a 16-bit PCM WAV file from the envelope's normalized values
pub fn encode(envelope: &Envelope) -> Result<Vec<u8>, ExportError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let frames_per_point = if envelope.is_empty() {
        0
    } else {
        TOTAL_FRAMES as usize / envelope.len()
    };

    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec)?;
        let mut written = 0usize;

        for normalized in envelope.normalized() {
            let amplitude = (normalized * i16::MAX as f64).floor() as i16;
            for _ in 0..frames_per_point {
                writer.write_sample(amplitude)?;
            }
            written += frames_per_point;
        }

        // Frames left over by the integer division stay silent
        for _ in written..TOTAL_FRAMES as usize {
            writer.write_sample(0i16)?;
        }

        writer.finalize()?;
    }

    tracing::debug!(
        "Encoded synthetic WAV: {} frames per bar, {} bytes",
        frames_per_point,
        bytes.len()
    );

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::reduce;

    #[test]
    fn test_header_and_length() {
        let samples: Vec<f32> = (0..16_000).map(|i| (i as f32 * 0.01).sin()).collect();
        let envelope = reduce(&samples, 800).unwrap();

        let bytes = encode(&envelope).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(bytes.len(), 44 + TOTAL_FRAMES as usize * 2);
        let riff_size = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(riff_size as usize, bytes.len() - 8);

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.duration(), TOTAL_FRAMES);
    }

    #[test]
    fn test_samples_follow_envelope() {
        let envelope = reduce(&[1.0, 0.5, 0.0, 0.25], 4).unwrap();
        let expected: Vec<i16> = envelope
            .normalized()
            .map(|n| (n * 32767.0).floor() as i16)
            .collect();

        let bytes = encode(&envelope).unwrap();
        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();

        let per_point = TOTAL_FRAMES as usize / 4;
        assert_eq!(samples.len(), TOTAL_FRAMES as usize);
        assert_eq!(samples[0], 32767);
        assert_eq!(samples[0], expected[0]);
        assert_eq!(samples[per_point], expected[1]);
        assert_eq!(samples[2 * per_point], 0);
        assert_eq!(samples[TOTAL_FRAMES as usize - 1], expected[3]);
    }

    #[test]
    fn test_remainder_frames_are_silent() {
        let envelope = reduce(&vec![0.9; 800], 800).unwrap();
        let bytes = encode(&envelope).unwrap();
        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();

        // 441000 / 800 = 551 frames per bar, 200 frames of padding
        assert_eq!(samples[551 * 800 - 1], 32767);
        assert!(samples[551 * 800..].iter().all(|&s| s == 0));
    }
}
