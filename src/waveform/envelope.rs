//! Amplitude envelope reduction
//!
//! Reduces a channel of raw samples to a fixed number of bars. Each bar
//! blends RMS energy with the block peak so transients stay visible.

use crate::audio::sanitize_sample;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of bars produced when no other count is configured
pub const DEFAULT_BAR_COUNT: usize = 800;

/// Share of the block peak that competes with RMS for the bar value
pub const PEAK_WEIGHT: f64 = 0.7;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("bar count must be greater than zero")]
    InvalidBarCount,
}

/// One bar of the envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePoint {
    pub rms: f64,
    pub peak: f64,
    /// `max(rms, 0.7 * peak)`
    pub value: f64,
    /// `value` divided by the largest value of the envelope, 0 when silent
    pub normalized: f64,
}

/// Whether the reduced signal carried any energy at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Signal,
    /// Every block reduced to zero; the input is silent or corrupt
    Silent,
}

/// Fixed-length sequence of normalized amplitude values
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub points: Vec<EnvelopePoint>,
    pub status: EnvelopeStatus,
}

impl Envelope {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_silent(&self) -> bool {
        self.status == EnvelopeStatus::Silent
    }

    pub fn normalized(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.normalized)
    }
}

/// Reduce `samples` to exactly `bar_count` envelope points.
///
/// Blocks are `samples.len() / bar_count` long; the final block runs to the
/// end of the input so the truncation remainder is never dropped. With fewer
/// samples than bars the leading blocks are empty and reduce to zero.
pub fn reduce(samples: &[f32], bar_count: usize) -> Result<Envelope, EnvelopeError> {
    if bar_count == 0 {
        return Err(EnvelopeError::InvalidBarCount);
    }

    let block_size = samples.len() / bar_count;
    // When samples.len() < bar_count, block_size is 0: every block but the last is empty
    let mut points = Vec::with_capacity(bar_count);

    for i in 0..bar_count {
        let start = i * block_size;
        let end = if i == bar_count - 1 {
            samples.len()
        } else {
            start + block_size
        };
        points.push(reduce_block(&samples[start..end]));
    }

    let max_value = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);

    if max_value == 0.0 {
        tracing::warn!("No audio data detected - file may be silent or corrupted");
        return Ok(Envelope {
            points,
            status: EnvelopeStatus::Silent,
        });
    }

    for point in &mut points {
        point.normalized = point.value / max_value;
    }

    tracing::debug!(
        "Reduced {} samples to {} bars (block size {}, max value {:.4})",
        samples.len(),
        bar_count,
        block_size,
        max_value
    );

    Ok(Envelope {
        points,
        status: EnvelopeStatus::Signal,
    })
}

fn reduce_block(block: &[f32]) -> EnvelopePoint {
    let mut sum_of_squares = 0.0_f64;
    let mut peak = 0.0_f64;

    for &sample in block {
        let sample = (sanitize_sample(sample) as f64).abs();
        sum_of_squares += sample * sample;
        peak = peak.max(sample);
    }

    let rms = if block.is_empty() {
        0.0
    } else {
        (sum_of_squares / block.len() as f64).sqrt()
    };

    EnvelopePoint {
        rms,
        peak,
        value: rms.max(PEAK_WEIGHT * peak),
        normalized: 0.0,
    }
}
