//! Audio intake module
//!
//! File validation and decoding into per-channel samples.

mod decoder;
mod input;
mod samples;

pub use decoder::{AudioDecoder, DecodeError, SymphoniaDecoder};
pub use input::{AudioFile, SUPPORTED_EXTENSIONS};
pub use samples::{sanitize_sample, AudioInfo, AudioSamples};
