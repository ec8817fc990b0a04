//! HTML embed snippet
//!
//! A single `<div>` that shows the rendered PNG through an inline data URI,
//! sized to the surface so it can be pasted into any page.

use super::image;
use super::types::ExportError;
use crate::render::Surface;

/// Inline data URI for PNG bytes
pub fn data_uri(png: &[u8]) -> String {
    format!("data:image/png,{}", urlencoding::encode_binary(png))
}

/// Build the embed snippet for a rendered surface
pub fn snippet(surface: &Surface) -> Result<String, ExportError> {
    let png = image::encode(surface)?;
    Ok(format!(
        "<div style=\"width: {}px; height: {}px; background-image: url('{}'); background-size: cover; background-repeat: no-repeat;\"></div>",
        surface.width,
        surface.height,
        data_uri(&png)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Rgb;

    #[test]
    fn test_snippet_carries_size_and_image() {
        let surface = Surface::filled(12, 5, Rgb { r: 255, g: 85, b: 0 });
        let html = snippet(&surface).unwrap();

        assert!(html.starts_with("<div style=\"width: 12px; height: 5px;"));
        assert!(html.contains("background-image: url('data:image/png,"));
        assert!(html.ends_with("background-repeat: no-repeat;\"></div>"));
    }

    #[test]
    fn test_data_uri_decodes_to_png() {
        let surface = Surface::filled(3, 3, Rgb { r: 0, g: 0, b: 0 });
        let png = image::encode(&surface).unwrap();
        let uri = data_uri(&png);

        let payload = uri.strip_prefix("data:image/png,").unwrap();
        assert!(!payload.contains('\''));
        assert!(!payload.contains(' '));
        let decoded = urlencoding::decode_binary(payload.as_bytes());
        assert_eq!(decoded.as_ref(), png.as_slice());
    }

    #[test]
    fn test_empty_surface_is_rejected() {
        let surface = Surface {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        assert!(matches!(
            snippet(&surface),
            Err(ExportError::InvalidSurface(_))
        ));
    }
}
