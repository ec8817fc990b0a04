//! Export types
//!
//! This module defines the output formats, the artifacts they produce, and
//! export error handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
    Json,
    Wav,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Png,
        ExportFormat::Svg,
        ExportFormat::Json,
        ExportFormat::Wav,
    ];

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Json => "json",
            ExportFormat::Wav => "wav",
        }
    }

    /// Get the MIME type of the produced file
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Json => "application/json",
            ExportFormat::Wav => "audio/wav",
        }
    }

    /// Download name for a file whose extension-less name is `stem`
    pub fn file_name(&self, stem: &str) -> String {
        match self {
            ExportFormat::Json => format!("{}_waveform_data.json", stem),
            other => format!("{}_waveform.{}", stem, other.extension()),
        }
    }
}

/// A named, typed blob ready to be written or downloaded
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn new(format: ExportFormat, stem: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format.file_name(stem),
            mime_type: format.mime_type(),
            bytes,
        }
    }
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("WAV encoding error: {0}")]
    Wav(#[from] hound::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid surface: {0}")]
    InvalidSurface(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_names() {
        assert_eq!(ExportFormat::Png.file_name("mix"), "mix_waveform.png");
        assert_eq!(ExportFormat::Svg.file_name("mix"), "mix_waveform.svg");
        assert_eq!(ExportFormat::Json.file_name("mix"), "mix_waveform_data.json");
        assert_eq!(ExportFormat::Wav.file_name("mix"), "mix_waveform.wav");
    }

    #[test]
    fn test_format_serde_names() {
        let formats: Vec<ExportFormat> = serde_json::from_str(r#"["png", "wav"]"#).unwrap();
        assert_eq!(formats, vec![ExportFormat::Png, ExportFormat::Wav]);
    }
}
