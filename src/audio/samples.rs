//! Decoded audio buffers

use serde::{Deserialize, Serialize};

/// Per-channel floating point samples produced by a decoder
#[derive(Debug, Clone)]
pub struct AudioSamples {
    /// One sample vector per channel, values in [-1, 1]
    pub channels: Vec<Vec<f32>>,
    pub sample_rate: u32,
    pub duration_secs: f64,
}

impl AudioSamples {
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        let frames = channels.first().map(Vec::len).unwrap_or(0);
        let duration_secs = if sample_rate > 0 {
            frames as f64 / sample_rate as f64
        } else {
            0.0
        };
        Self {
            channels,
            sample_rate,
            duration_secs,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples of one channel, empty if the channel does not exist
    pub fn channel(&self, index: usize) -> &[f32] {
        self.channels.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Metadata kept once the samples themselves are dropped
    pub fn info(&self) -> AudioInfo {
        AudioInfo {
            duration_secs: self.duration_secs,
            sample_rate: self.sample_rate,
            channels: self.channel_count(),
        }
    }
}

/// Audio metadata retained alongside an envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioInfo {
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub channels: usize,
}

/// Clamp a decoded sample into [-1, 1]; NaN and infinities become silence
pub fn sanitize_sample(sample: f32) -> f32 {
    if sample.is_finite() {
        sample.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
