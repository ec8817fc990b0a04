//! Session state management
//!
//! Defines the load state machine, progress events and the loaded track.

use crate::audio::AudioInfo;
use crate::waveform::Envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Warning attached to the completion event of a silent file
pub const SILENT_WARNING: &str = "No audio data detected - file may be silent or corrupted";

/// Current state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Nothing loaded, or the last load failed
    #[default]
    Idle,
    /// A file is being decoded and reduced
    Loading,
    /// A track is available for rendering and export
    Ready,
}

/// Load pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStage {
    Reading,
    Decoding,
    Generating,
    Complete,
    Error,
}

/// Progress update emitted while a file loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadProgress {
    /// Progress percentage (0.0 to 100.0)
    pub percent: f32,
    pub stage: LoadStage,
    /// User-facing status text
    pub message: String,
    pub warning: Option<String>,
}

impl LoadProgress {
    pub fn reading() -> Self {
        Self {
            percent: 20.0,
            stage: LoadStage::Reading,
            message: "Reading file...".to_string(),
            warning: None,
        }
    }

    pub fn decoding() -> Self {
        Self {
            percent: 40.0,
            stage: LoadStage::Decoding,
            message: "Decoding audio...".to_string(),
            warning: None,
        }
    }

    pub fn generating() -> Self {
        Self {
            percent: 60.0,
            stage: LoadStage::Generating,
            message: "Generating waveform...".to_string(),
            warning: None,
        }
    }

    pub fn complete(warning: Option<String>) -> Self {
        Self {
            percent: 100.0,
            stage: LoadStage::Complete,
            message: "Complete!".to_string(),
            warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            percent: 0.0,
            stage: LoadStage::Error,
            message: message.into(),
            warning: None,
        }
    }
}

/// A decoded, reduced file held by the session
///
/// Raw samples are dropped once the envelope is built; only metadata and the
/// envelope survive.
#[derive(Debug, Clone)]
pub struct LoadedTrack {
    pub id: Uuid,
    /// File name without extension, used to name exports
    pub stem: String,
    pub info: AudioInfo,
    pub envelope: Envelope,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedTrack {
    pub fn new(stem: impl Into<String>, info: AudioInfo, envelope: Envelope) -> Self {
        Self {
            id: Uuid::new_v4(),
            stem: stem.into(),
            info,
            envelope,
            loaded_at: Utc::now(),
        }
    }

    /// Warning to surface for this track, if any
    pub fn warning(&self) -> Option<&'static str> {
        self.envelope.is_silent().then_some(SILENT_WARNING)
    }
}
