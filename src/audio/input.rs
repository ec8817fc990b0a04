//! User file intake
//!
//! Validates a selected file before any decode attempt and derives the
//! filename stem used to name exported artifacts.

use crate::utils::error::{AppError, AppResult};
use std::path::Path;

/// Extensions accepted regardless of MIME type
pub const SUPPORTED_EXTENSIONS: [&str; 3] = [".mp3", ".wav", ".flac"];

const INVALID_FILE_MESSAGE: &str = "Please select a valid audio file (MP3, WAV, or FLAC).";

/// A file selected by the user, not yet decoded
#[derive(Debug, Clone)]
pub struct AudioFile {
    /// Original file name including extension
    pub name: String,
    /// MIME type reported for the file, if any
    pub mime_type: Option<String>,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl AudioFile {
    pub fn new(name: impl Into<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = guess_mime_type(&name).map(str::to_string);

        tracing::debug!("Read {} bytes from {:?}", bytes.len(), path);

        Ok(Self::new(name, mime_type, bytes))
    }

    /// Reject anything that is neither an audio MIME type nor a supported extension
    pub fn validate(&self) -> AppResult<()> {
        let is_audio_mime = self
            .mime_type
            .as_deref()
            .map(|mime| mime.contains("audio/"))
            .unwrap_or(false);

        let name = self.name.to_lowercase();
        let has_supported_extension = SUPPORTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext));

        if is_audio_mime || has_supported_extension {
            Ok(())
        } else {
            tracing::warn!("Rejected file '{}' ({:?})", self.name, self.mime_type);
            Err(AppError::InvalidFileType(INVALID_FILE_MESSAGE.to_string()))
        }
    }

    /// File name with its last extension stripped
    pub fn stem(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) if idx + 1 < self.name.len() => &self.name[..idx],
            _ => &self.name,
        }
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }
}

fn guess_mime_type(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "flac" => Some("audio/flac"),
        _ => None,
    }
}
