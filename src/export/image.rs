//! PNG encoding of rendered surfaces

use super::types::ExportError;
use crate::render::Surface;

/// Encode an RGBA surface as a PNG file
pub fn encode(surface: &Surface) -> Result<Vec<u8>, ExportError> {
    let expected = surface.width as usize * surface.height as usize * 4;
    if surface.pixels.len() != expected || surface.width == 0 || surface.height == 0 {
        return Err(ExportError::InvalidSurface(format!(
            "{}x{} surface with {} bytes (expected {})",
            surface.width,
            surface.height,
            surface.pixels.len(),
            expected
        )));
    }

    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, surface.width, surface.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&surface.pixels)?;
        writer.finish()?;
    }

    tracing::debug!(
        "Encoded {}x{} PNG ({} bytes)",
        surface.width,
        surface.height,
        bytes.len()
    );

    Ok(bytes)
}
