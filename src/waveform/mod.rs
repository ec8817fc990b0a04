//! Waveform envelope module
//!
//! Reduces decoded audio to the fixed-length amplitude envelope that every
//! renderer and exporter works from.

mod envelope;

pub use envelope::{
    reduce, Envelope, EnvelopeError, EnvelopePoint, EnvelopeStatus, DEFAULT_BAR_COUNT, PEAK_WEIGHT,
};
