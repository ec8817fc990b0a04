//! Waveform export module
//!
//! Encoders that turn a loaded track and its rendering into downloadable
//! files: PNG, SVG, a JSON data document and a synthetic WAV clip, plus the
//! HTML embed snippet.

pub mod document;
pub mod embed;
pub mod image;
pub mod sonify;
pub mod types;

pub use document::{DocumentSettings, WaveformDocument};
pub use types::{ExportArtifact, ExportError, ExportFormat};
