//! Vector backend
//!
//! Emits the bar layout as a standalone SVG document. The gradient is in
//! user space over the full canvas height so it matches the raster output.

use super::config::RenderConfig;
use super::geometry::{layout_bars, GRADIENT_STOPS};
use crate::waveform::Envelope;
use std::fmt::{self, Write};

pub const GRADIENT_ID: &str = "waveGradient";

/// Render the envelope as an SVG document
pub fn render(envelope: &Envelope, config: &RenderConfig) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_svg(envelope, config, &mut out);
    out
}

/// Write the SVG document for the envelope into `out`
pub fn write_svg<W: Write>(envelope: &Envelope, config: &RenderConfig, out: &mut W) -> fmt::Result {
    let width = config.width;
    let height = config.height;
    let wave = config.wave_rgb();

    writeln!(
        out,
        r#"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"#,
        width, height, width, height
    )?;
    writeln!(out, "<defs>")?;
    writeln!(
        out,
        r#"<linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="0" y1="0" x2="0" y2="{}">"#,
        GRADIENT_ID, height
    )?;
    for (offset, opacity) in GRADIENT_STOPS {
        writeln!(
            out,
            r#"<stop offset="{}%" stop-color="rgb({},{},{})" stop-opacity="{}"/>"#,
            (offset * 100.0).round(),
            wave.r,
            wave.g,
            wave.b,
            opacity
        )?;
    }
    writeln!(out, "</linearGradient>")?;
    writeln!(out, "</defs>")?;
    writeln!(
        out,
        r#"<rect width="{}" height="{}" fill="{}"/>"#,
        width,
        height,
        config.background_rgb().to_hex()
    )?;

    if !envelope.is_empty() {
        let (_, bars) = layout_bars(envelope, config);
        for bar in &bars {
            writeln!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" ry="{}" fill="url(#{})"/>"#,
                bar.x, bar.y, bar.width, bar.height, bar.radius, bar.radius, GRADIENT_ID
            )?;
        }
    }

    writeln!(out, "</svg>")
}
