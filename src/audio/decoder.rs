//! Symphonia-based audio decoding
//!
//! The decoder is the one external collaborator of the waveform pipeline:
//! raw file bytes in, per-channel samples and metadata out.

use super::input::AudioFile;
use super::samples::{sanitize_sample, AudioSamples};
use async_trait::async_trait;
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

/// Classified decode failures
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid audio format or corrupted file: {0}")]
    InvalidFormat(String),

    #[error("Audio format not supported: {0}")]
    Unsupported(String),

    #[error("Decoding failed: {0}")]
    Other(String),
}

impl DecodeError {
    /// Message shown to the user in place of the progress text
    pub fn user_message(&self) -> String {
        let reason = match self {
            DecodeError::InvalidFormat(_) => "Invalid audio format or corrupted file.",
            DecodeError::Unsupported(_) => "Audio format not supported by this decoder.",
            DecodeError::Other(_) => "Please try another audio file.",
        };
        format!("Error processing file. {}", reason)
    }
}

/// Turns raw file bytes into samples
#[async_trait]
pub trait AudioDecoder: Send + Sync {
    async fn decode(&self, file: AudioFile) -> Result<AudioSamples, DecodeError>;
}

/// Default decoder backed by symphonia (MP3, WAV, FLAC)
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaDecoder;

#[async_trait]
impl AudioDecoder for SymphoniaDecoder {
    async fn decode(&self, file: AudioFile) -> Result<AudioSamples, DecodeError> {
        tokio::task::spawn_blocking(move || decode_blocking(file))
            .await
            .map_err(|e| DecodeError::Other(format!("Decode task failed: {}", e)))?
    }
}

fn decode_blocking(file: AudioFile) -> Result<AudioSamples, DecodeError> {
    let mut hint = Hint::new();
    if let Some(ext) = file.extension() {
        hint.with_extension(&ext);
    }
    if let Some(mime) = file.mime_type.as_deref() {
        hint.mime_type(mime);
    }

    let name = file.name;
    let mss = MediaSourceStream::new(Box::new(Cursor::new(file.bytes)), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::InvalidFormat(format!("Failed to probe '{}': {}", name, e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DecodeError::InvalidFormat("No supported audio tracks found".to_string()))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| match e {
            SymphoniaError::Unsupported(what) => DecodeError::Unsupported(what.to_string()),
            other => DecodeError::Other(other.to_string()),
        })?;

    let mut sample_rate = codec_params.sample_rate.unwrap_or(0);
    let mut channels: Vec<Vec<f32>> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut skipped_packets = 0u64;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(DecodeError::InvalidFormat(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let audio_buf = match decoder.decode(&packet) {
            Ok(audio_buf) => audio_buf,
            Err(SymphoniaError::DecodeError(e)) => {
                skipped_packets += 1;
                if skipped_packets == 1 {
                    tracing::warn!("Skipping corrupted packet in '{}': {}", name, e);
                }
                continue;
            }
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(DecodeError::InvalidFormat(e.to_string())),
        };

        let spec = *audio_buf.spec();
        let channel_count = spec.channels.count();
        if channel_count == 0 {
            continue;
        }
        if channels.is_empty() {
            channels = vec![Vec::new(); channel_count];
            sample_rate = spec.rate;
        }

        let needed = audio_buf.capacity() * channel_count;
        if sample_buf.as_ref().map_or(true, |buf| buf.capacity() < needed) {
            sample_buf = Some(SampleBuffer::<f32>::new(audio_buf.capacity() as u64, spec));
        }
        let Some(buf) = sample_buf.as_mut() else {
            continue;
        };
        buf.copy_interleaved_ref(audio_buf);

        for frame in buf.samples().chunks(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sanitize_sample(sample));
            }
        }
    }

    if channels.is_empty() {
        let declared = codec_params.channels.map(|c| c.count()).unwrap_or(0);
        if declared == 0 {
            return Err(DecodeError::InvalidFormat(
                "No audio frames could be decoded".to_string(),
            ));
        }
        channels = vec![Vec::new(); declared];
    }

    if sample_rate == 0 {
        return Err(DecodeError::InvalidFormat(
            "Unknown sample rate".to_string(),
        ));
    }

    if skipped_packets > 0 {
        tracing::warn!("Skipped {} corrupted packets in '{}'", skipped_packets, name);
    }

    let samples = AudioSamples::new(channels, sample_rate);
    tracing::info!(
        "Audio decoded: '{}', {:.2}s, {} Hz, {} channel(s)",
        name,
        samples.duration_secs,
        samples.sample_rate,
        samples.channel_count()
    );

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(channels: u16, sample_rate: u32, frames: usize) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut bytes = Vec::new();
        {
            let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
            for i in 0..frames {
                let t = i as f32 / sample_rate as f32;
                let value = ((2.0 * std::f32::consts::PI * 440.0 * t).sin() * 16000.0) as i16;
                for _ in 0..channels {
                    writer.write_sample(value).unwrap();
                }
            }
            writer.finalize().unwrap();
        }
        bytes
    }

    #[tokio::test]
    async fn test_decode_wav() {
        let file = AudioFile::new("tone.wav", Some("audio/wav".to_string()), wav_bytes(2, 8000, 4000));

        let samples = SymphoniaDecoder.decode(file).await.unwrap();

        assert_eq!(samples.sample_rate, 8000);
        assert_eq!(samples.channel_count(), 2);
        assert_eq!(samples.channel(0).len(), 4000);
        assert!((samples.duration_secs - 0.5).abs() < 1e-9);
        assert!(samples.channel(0).iter().all(|s| s.abs() <= 1.0));
        assert!(samples.channel(0).iter().any(|s| s.abs() > 0.4));
    }

    #[tokio::test]
    async fn test_decode_float_wav_keeps_samples_in_range() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut bytes = Vec::new();
        {
            let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
            for sample in [f32::NAN, 0.5, f32::INFINITY, -3.0, f32::NEG_INFINITY, -0.25] {
                writer.write_sample(sample).unwrap();
            }
            writer.finalize().unwrap();
        }
        let file = AudioFile::new("float.wav", Some("audio/wav".to_string()), bytes);

        let samples = SymphoniaDecoder.decode(file).await.unwrap();

        assert_eq!(samples.channel(0), &[0.0_f32, 0.5, 0.0, -1.0, 0.0, -0.25]);
    }

    #[tokio::test]
    async fn test_decode_garbage_is_invalid_format() {
        let file = AudioFile::new("broken.mp3", None, vec![0x42; 64]);

        let err = SymphoniaDecoder.decode(file).await.unwrap_err();

        assert!(matches!(err, DecodeError::InvalidFormat(_)));
        assert_eq!(
            err.user_message(),
            "Error processing file. Invalid audio format or corrupted file."
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            DecodeError::Unsupported("aac".to_string()).user_message(),
            "Error processing file. Audio format not supported by this decoder."
        );
        assert_eq!(
            DecodeError::Other("x".to_string()).user_message(),
            "Error processing file. Please try another audio file."
        );
    }
}
