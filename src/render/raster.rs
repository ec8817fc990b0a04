//! Raster backend
//!
//! Paints the bar layout onto an RGBA surface with anti-aliased rounded
//! corners and the vertical opacity gradient.

use super::config::{RenderConfig, Rgb};
use super::geometry::{gradient_opacity, layout_bars, Bar};
use crate::waveform::Envelope;

/// Subpixel grid size per axis used for edge coverage
const SUPERSAMPLE: u32 = 4;

/// An opaque RGBA8 image, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Surface {
    /// A surface filled with a single color
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            pixels.extend_from_slice(&[color.r, color.g, color.b, 255]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// RGBA value at (x, y), None outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Source-over blend of `color` at opacity `alpha` onto pixel (x, y)
    fn blend(&mut self, x: u32, y: u32, color: Rgb, alpha: f64) {
        let idx = ((y * self.width + x) * 4) as usize;
        let Some(dst) = self.pixels.get_mut(idx..idx + 3) else {
            return;
        };
        for (channel, src) in dst.iter_mut().zip([color.r, color.g, color.b]) {
            let out = src as f64 * alpha + *channel as f64 * (1.0 - alpha);
            *channel = out.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Render the envelope as bars on a fresh surface
pub fn render(envelope: &Envelope, config: &RenderConfig) -> Surface {
    let mut surface = Surface::filled(config.width, config.height, config.background_rgb());

    if envelope.is_empty() || config.width == 0 || config.height == 0 {
        tracing::warn!("No waveform data to draw");
        return surface;
    }

    let color = config.wave_rgb();
    let (_, bars) = layout_bars(envelope, config);

    for bar in &bars {
        fill_bar(&mut surface, bar, color);
    }

    tracing::debug!(
        "Rendered {} bars onto {}x{} surface",
        bars.len(),
        config.width,
        config.height
    );

    surface
}

fn fill_bar(surface: &mut Surface, bar: &Bar, color: Rgb) {
    if bar.width <= 0.0 || bar.height <= 0.0 {
        return;
    }

    let x_start = bar.x.floor().max(0.0) as u32;
    let x_end = ((bar.x + bar.width).ceil().max(0.0) as u32).min(surface.width);
    let y_start = bar.y.floor().max(0.0) as u32;
    let y_end = ((bar.y + bar.height).ceil().max(0.0) as u32).min(surface.height);
    let height = surface.height as f64;
    let step = 1.0 / SUPERSAMPLE as f64;
    let total = (SUPERSAMPLE * SUPERSAMPLE) as f64;

    for py in y_start..y_end {
        let opacity = gradient_opacity((py as f64 + 0.5) / height);

        for px in x_start..x_end {
            let mut covered = 0u32;
            for sy in 0..SUPERSAMPLE {
                let y = py as f64 + (sy as f64 + 0.5) * step;
                for sx in 0..SUPERSAMPLE {
                    let x = px as f64 + (sx as f64 + 0.5) * step;
                    if is_inside_rounded_rect(bar, x, y) {
                        covered += 1;
                    }
                }
            }

            if covered > 0 {
                surface.blend(px, py, color, opacity * covered as f64 / total);
            }
        }
    }
}

/// Check if a point is inside a rounded rectangle
fn is_inside_rounded_rect(bar: &Bar, x: f64, y: f64) -> bool {
    let left = bar.x;
    let right = bar.x + bar.width;
    let top = bar.y;
    let bottom = bar.y + bar.height;

    if x < left || x > right || y < top || y > bottom {
        return false;
    }

    let radius = bar.radius.min(bar.width / 2.0).min(bar.height / 2.0).max(0.0);
    if radius == 0.0 {
        return true;
    }

    // Nearest point of the inner rectangle whose corners are the arc centers
    let cx = x.max(left + radius).min(right - radius);
    let cy = y.max(top + radius).min(bottom - radius);
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= radius * radius
}
