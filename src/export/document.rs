//! JSON data export
//!
//! A self-describing document with the source metadata, the full envelope
//! and the render settings that were active at export time.

use super::types::ExportError;
use crate::audio::AudioInfo;
use crate::render::RenderConfig;
use crate::waveform::{Envelope, EnvelopePoint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveformDocument {
    pub filename: String,
    /// Source duration in seconds
    pub duration: f64,
    pub sample_rate: u32,
    pub channels: usize,
    pub waveform_data: Vec<EnvelopePoint>,
    pub settings: DocumentSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSettings {
    pub width: u32,
    pub height: u32,
    pub color: String,
    pub background_color: String,
}

impl WaveformDocument {
    pub fn new(stem: &str, info: &AudioInfo, envelope: &Envelope, config: &RenderConfig) -> Self {
        Self {
            filename: stem.to_string(),
            duration: info.duration_secs,
            sample_rate: info.sample_rate,
            channels: info.channels,
            waveform_data: envelope.points.clone(),
            settings: DocumentSettings {
                width: config.width,
                height: config.height,
                color: config.wave_color.clone(),
                background_color: config.background_color.clone(),
            },
        }
    }

    /// Pretty-printed JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExportError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ExportError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
