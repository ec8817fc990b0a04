//! Command-line argument parsing.

use crate::export::ExportFormat;
use crate::render::find_preset;
use crate::settings::{read_settings, Settings};
use crate::utils::error::{AppError, AppResult};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "open-waveform")]
#[command(about = "SoundCloud-style waveform images from audio files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render an audio file and write the requested exports
    Render(RenderArgs),
    /// List the built-in color presets
    Presets,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Audio file to render (MP3, WAV or FLAC)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory the exported files are written to
    #[arg(long, short, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Canvas width in pixels
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,

    /// Bar color, e.g. #ff5500
    #[arg(long, value_name = "HEX")]
    pub color: Option<String>,

    /// Background color, e.g. #ffffff
    #[arg(long, value_name = "HEX")]
    pub background: Option<String>,

    /// Color preset applied before --color and --background
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Number of bars
    #[arg(long, value_name = "N")]
    pub bars: Option<usize>,

    /// Export formats: png, svg, json, wav (default: all)
    #[arg(long = "format", short, value_name = "FORMAT", value_parser = parse_format)]
    pub formats: Vec<ExportFormat>,

    /// Print an HTML embed snippet of the PNG
    #[arg(long)]
    pub embed: bool,

    /// Read settings from a JSON file
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Write the effective settings to a JSON file
    #[arg(long, value_name = "FILE")]
    pub save_settings: Option<PathBuf>,
}

/// Parse a format name as given on the command line
pub fn parse_format(value: &str) -> Result<ExportFormat, String> {
    match value.to_lowercase().as_str() {
        "png" => Ok(ExportFormat::Png),
        "svg" => Ok(ExportFormat::Svg),
        "json" => Ok(ExportFormat::Json),
        "wav" => Ok(ExportFormat::Wav),
        other => Err(format!("unknown format '{}' (expected png, svg, json or wav)", other)),
    }
}

impl RenderArgs {
    /// Settings file (or defaults), then the preset, then explicit flags
    pub fn resolve_settings(&self) -> AppResult<Settings> {
        let mut settings = match &self.settings {
            Some(path) => read_settings(path)?,
            None => Settings::default(),
        };

        if let Some(name) = &self.preset {
            let preset = find_preset(name)
                .ok_or_else(|| AppError::Config(format!("unknown preset '{}'", name)))?;
            settings.render.apply_preset(preset);
        }

        if let Some(width) = self.width {
            settings.render.width = width;
        }
        if let Some(height) = self.height {
            settings.render.height = height;
        }
        if let Some(color) = &self.color {
            settings.render.wave_color = color.clone();
        }
        if let Some(background) = &self.background {
            settings.render.background_color = background.clone();
        }
        if let Some(bars) = self.bars {
            settings.bar_count = bars;
        }

        settings
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(settings)
    }

    /// Requested formats without duplicates, all of them when none were given
    pub fn formats(&self) -> Vec<ExportFormat> {
        if self.formats.is_empty() {
            return ExportFormat::ALL.to_vec();
        }
        let mut formats = Vec::new();
        for format in &self.formats {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }
        formats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_args(args: &[&str]) -> RenderArgs {
        let cli = Cli::try_parse_from(std::iter::once("open-waveform").chain(args.iter().copied())).unwrap();
        match cli.command {
            Command::Render(args) => args,
            Command::Presets => panic!("expected render"),
        }
    }

    #[test]
    fn test_defaults() {
        let args = render_args(&["render", "song.mp3"]);
        let settings = args.resolve_settings().unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(args.formats(), ExportFormat::ALL.to_vec());
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert!(!args.embed);
    }

    #[test]
    fn test_flags_override_preset() {
        let args = render_args(&[
            "render",
            "song.mp3",
            "--preset",
            "Midnight",
            "--color",
            "#123456",
            "--bars",
            "300",
            "--width",
            "640",
        ]);
        let settings = args.resolve_settings().unwrap();

        assert_eq!(settings.render.wave_color, "#123456");
        assert_eq!(settings.render.background_color, "#0f0f23");
        assert_eq!(settings.render.width, 640);
        assert_eq!(settings.bar_count, 300);
    }

    #[test]
    fn test_formats_are_deduplicated() {
        let args = render_args(&["render", "a.wav", "-f", "svg", "--format", "PNG", "-f", "svg"]);
        assert_eq!(args.formats(), vec![ExportFormat::Svg, ExportFormat::Png]);
    }

    #[test]
    fn test_rejects_bad_values() {
        let unknown_format = Cli::try_parse_from(["open-waveform", "render", "a.wav", "-f", "gif"]);
        assert!(unknown_format.is_err());

        let args = render_args(&["render", "a.wav", "--preset", "neon"]);
        assert!(matches!(args.resolve_settings(), Err(AppError::Config(_))));

        let args = render_args(&["render", "a.wav", "--bars", "0"]);
        assert!(matches!(args.resolve_settings(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_presets_subcommand() {
        let cli = Cli::try_parse_from(["open-waveform", "presets"]).unwrap();
        assert!(matches!(cli.command, Command::Presets));
    }
}
