//! Export command handlers
//!
//! Every handler is a pure read of the loaded track; nothing here touches
//! the session.

use crate::export::{embed as embed_html, image, sonify, ExportArtifact, ExportFormat, WaveformDocument};
use crate::render::{svg, RenderConfig, Surface};
use crate::session::LoadedTrack;
use crate::utils::error::AppResult;

/// Produce one artifact for the track.
///
/// PNG uses the already rendered `surface`; the other formats are derived
/// from the envelope and `config`.
pub fn export(
    track: &LoadedTrack,
    surface: &Surface,
    config: &RenderConfig,
    format: ExportFormat,
) -> AppResult<ExportArtifact> {
    let bytes = match format {
        ExportFormat::Png => image::encode(surface)?,
        ExportFormat::Svg => svg::render(&track.envelope, config).into_bytes(),
        ExportFormat::Json => WaveformDocument::new(&track.stem, &track.info, &track.envelope, config).to_bytes()?,
        ExportFormat::Wav => sonify::encode(&track.envelope)?,
    };

    let artifact = ExportArtifact::new(format, &track.stem, bytes);
    tracing::info!(
        "Exported {} ({} bytes)",
        artifact.file_name,
        artifact.bytes.len()
    );
    Ok(artifact)
}

/// HTML snippet embedding the rendered surface
pub fn embed(surface: &Surface) -> AppResult<String> {
    Ok(embed_html::snippet(surface)?)
}

/// Render once and produce every requested format, in order
pub fn export_all(
    track: &LoadedTrack,
    config: &RenderConfig,
    formats: &[ExportFormat],
) -> AppResult<Vec<ExportArtifact>> {
    let surface = super::render(track, config);
    formats
        .iter()
        .map(|format| export(track, &surface, config, *format))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioInfo;
    use crate::waveform::reduce;

    fn track() -> LoadedTrack {
        let samples: Vec<f32> = (0..4_000).map(|i| (i as f32 * 0.02).sin() * 0.6).collect();
        LoadedTrack::new(
            "demo song",
            AudioInfo {
                duration_secs: 0.5,
                sample_rate: 8_000,
                channels: 1,
            },
            reduce(&samples, 40).unwrap(),
        )
    }

    fn small_config() -> RenderConfig {
        RenderConfig {
            width: 200,
            height: 60,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_export_all_formats() {
        let track = track();
        let artifacts = export_all(&track, &small_config(), &ExportFormat::ALL).unwrap();

        let names: Vec<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "demo song_waveform.png",
                "demo song_waveform.svg",
                "demo song_waveform_data.json",
                "demo song_waveform.wav"
            ]
        );
        assert_eq!(&artifacts[0].bytes[1..4], b"PNG");
        assert!(artifacts[1].bytes.starts_with(b"<svg"));
        assert_eq!(artifacts[3].mime_type, "audio/wav");
    }

    #[test]
    fn test_json_export_matches_track() {
        let track = track();
        let config = small_config();
        let surface = super::super::render(&track, &config);

        let artifact = export(&track, &surface, &config, ExportFormat::Json).unwrap();
        let document = WaveformDocument::from_slice(&artifact.bytes).unwrap();

        assert_eq!(document.filename, "demo song");
        assert_eq!(document.waveform_data, track.envelope.points);
        assert_eq!(document.settings.width, 200);
    }

    #[test]
    fn test_embed_sizes_to_surface() {
        let track = track();
        let surface = super::super::render(&track, &small_config());

        let html = embed(&surface).unwrap();

        assert!(html.contains("width: 200px; height: 60px;"));
    }
}
