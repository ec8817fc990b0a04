//! Bar geometry shared by the raster and vector backends
//!
//! Both backends draw exactly the rectangles produced here, so a PNG and an
//! SVG of the same envelope and config line up pixel for pixel.

use super::config::RenderConfig;
use crate::waveform::Envelope;

/// Fraction of half the canvas height the tallest bar may use
pub const MAX_BAR_HEIGHT_RATIO: f64 = 0.85;

/// Gradient stops as (offset, opacity), top to bottom
pub const GRADIENT_STOPS: [(f64, f64); 4] = [(0.0, 0.9), (0.3, 1.0), (0.7, 1.0), (1.0, 0.9)];

/// A single rounded bar in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

/// Layout values derived from the canvas size and bar count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub bar_width: f64,
    pub bar_spacing: f64,
    pub actual_bar_width: f64,
    pub radius: f64,
    pub center_y: f64,
    pub max_bar_height: f64,
}

impl BarLayout {
    pub fn new(width: u32, height: u32, bar_count: usize) -> Self {
        let bar_width = if bar_count == 0 {
            1.0
        } else {
            (width as f64 / bar_count as f64).max(1.0)
        };
        let bar_spacing = (bar_width * 0.1).max(0.5);
        let actual_bar_width = bar_width - bar_spacing;
        let center_y = height as f64 / 2.0;

        Self {
            bar_width,
            bar_spacing,
            actual_bar_width,
            radius: (actual_bar_width / 4.0).min(2.0),
            center_y,
            max_bar_height: center_y * MAX_BAR_HEIGHT_RATIO,
        }
    }

    /// Bar for slot `index` with the given (already smoothed) height value
    pub fn bar(&self, index: usize, smoothed: f64) -> Bar {
        let half_height = (smoothed * self.max_bar_height).max(1.0);
        Bar {
            x: index as f64 * self.bar_width + self.bar_spacing / 2.0,
            y: self.center_y - half_height,
            width: self.actual_bar_width,
            height: half_height * 2.0,
            radius: self.radius,
        }
    }
}

/// 3-point moving average of the normalized values; the end bars keep their own value
pub fn smoothed_values(envelope: &Envelope) -> Vec<f64> {
    let values: Vec<f64> = envelope.normalized().collect();
    let last = values.len().saturating_sub(1);

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            if i > 0 && i < last {
                (values[i - 1] + value + values[i + 1]) / 3.0
            } else {
                value
            }
        })
        .collect()
}

/// Every bar of the envelope laid out on the configured canvas
pub fn layout_bars(envelope: &Envelope, config: &RenderConfig) -> (BarLayout, Vec<Bar>) {
    let layout = BarLayout::new(config.width, config.height, envelope.len());
    let bars = smoothed_values(envelope)
        .into_iter()
        .enumerate()
        .map(|(i, smoothed)| layout.bar(i, smoothed))
        .collect();
    (layout, bars)
}

/// Gradient opacity at a vertical position `t` in [0, 1] of the canvas
pub fn gradient_opacity(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    for pair in GRADIENT_STOPS.windows(2) {
        let (start, start_opacity) = pair[0];
        let (end, end_opacity) = pair[1];
        if t <= end {
            let span = end - start;
            if span <= 0.0 {
                return end_opacity;
            }
            return start_opacity + (end_opacity - start_opacity) * (t - start) / span;
        }
    }
    GRADIENT_STOPS[GRADIENT_STOPS.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::{reduce, EnvelopePoint, EnvelopeStatus};

    fn envelope(normalized: &[f64]) -> Envelope {
        Envelope {
            points: normalized
                .iter()
                .map(|&n| EnvelopePoint {
                    rms: n,
                    peak: n,
                    value: n,
                    normalized: n,
                })
                .collect(),
            status: EnvelopeStatus::Signal,
        }
    }

    #[test]
    fn test_layout_formulas() {
        let layout = BarLayout::new(1600, 200, 800);
        assert_eq!(layout.bar_width, 2.0);
        assert_eq!(layout.bar_spacing, 0.5);
        assert_eq!(layout.actual_bar_width, 1.5);
        assert_eq!(layout.radius, 0.375);
        assert_eq!(layout.center_y, 100.0);
        assert!((layout.max_bar_height - 85.0).abs() < 1e-12);

        let wide = BarLayout::new(4000, 100, 100);
        assert_eq!(wide.bar_width, 40.0);
        assert_eq!(wide.bar_spacing, 4.0);
        assert_eq!(wide.actual_bar_width, 36.0);
        assert_eq!(wide.radius, 2.0);
    }

    #[test]
    fn test_bar_width_never_below_one_pixel() {
        let layout = BarLayout::new(400, 100, 800);
        assert_eq!(layout.bar_width, 1.0);
        assert_eq!(layout.actual_bar_width, 0.5);
    }

    #[test]
    fn test_smoothing_keeps_end_values() {
        let smoothed = smoothed_values(&envelope(&[1.0, 0.0, 0.5, 0.0]));
        assert_eq!(smoothed[0], 1.0);
        assert_eq!(smoothed[1], 0.5);
        assert!((smoothed[2] - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(smoothed[3], 0.0);
    }

    #[test]
    fn test_bars_are_centered_with_minimum_height() {
        let config = RenderConfig {
            width: 300,
            height: 100,
            ..RenderConfig::default()
        };
        let (layout, bars) = layout_bars(&envelope(&[1.0, 1.0, 0.0]), &config);

        assert_eq!(bars.len(), 3);
        // First bar is unsmoothed at full height
        assert!((bars[0].height - 2.0 * layout.max_bar_height).abs() < 1e-9);
        // Last bar is silent: 1px half height
        assert_eq!(bars[2].height, 2.0);
        for bar in &bars {
            assert!((bar.y + bar.height / 2.0 - layout.center_y).abs() < 1e-9);
        }
        assert_eq!(bars[1].x, 100.0 + layout.bar_spacing / 2.0);
    }

    #[test]
    fn test_silent_envelope_draws_minimum_bars() {
        let silent = reduce(&vec![0.0; 44100 * 5], 800).unwrap();
        let (_, bars) = layout_bars(&silent, &RenderConfig::default());
        assert_eq!(bars.len(), 800);
        assert!(bars.iter().all(|b| b.height == 2.0));
    }

    #[test]
    fn test_gradient_opacity() {
        assert!((gradient_opacity(0.0) - 0.9).abs() < 1e-12);
        assert!((gradient_opacity(0.15) - 0.95).abs() < 1e-12);
        assert_eq!(gradient_opacity(0.5), 1.0);
        assert!((gradient_opacity(1.0) - 0.9).abs() < 1e-12);
    }
}
