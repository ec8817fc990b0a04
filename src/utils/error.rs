//! Error types and handling
//!
//! Common error types used across the application.

use crate::audio::DecodeError;
use crate::export::ExportError;
use crate::settings::SettingsError;
use crate::waveform::EnvelopeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidFileType(String),

    #[error("{}", .0.user_message())]
    Decode(#[from] DecodeError),

    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("A file is already being processed")]
    Busy,

    #[error("No audio file has been loaded")]
    NoTrack,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error response for front ends
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        let code = match &error {
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::InvalidFileType(_) => "INVALID_FILE_TYPE",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Envelope(_) => "ENVELOPE_ERROR",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Settings(_) => "SETTINGS_ERROR",
            AppError::Busy => "BUSY",
            AppError::NoTrack => "NO_TRACK",
            AppError::Config(_) => "CONFIG_ERROR",
        };

        ErrorResponse {
            code: code.to_string(),
            message: error.to_string(),
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
