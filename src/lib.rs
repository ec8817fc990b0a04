//! Open Waveform - SoundCloud-style waveform images from audio files.
//!
//! This is the main library crate. It provides the decode, reduce, render
//! and export pipeline, the session that drives it, and the CLI entry point.

pub mod audio;
pub mod cli;
pub mod commands;
pub mod export;
pub mod render;
pub mod session;
pub mod settings;
pub mod utils;
pub mod waveform;

use audio::{AudioFile, SymphoniaDecoder};
use cli::{Cli, Command, RenderArgs};
use session::{LoadStage, WaveformSession};
use settings::write_settings;
use std::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utils::error::AppResult;

/// Initialize tracing/logging
///
/// Logs go to stderr so stdout only carries command output.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "open_waveform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Execute a parsed command line
pub async fn run(cli: Cli) -> AppResult<()> {
    tracing::info!("Starting Open Waveform v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Render(args) => run_render(args).await,
        Command::Presets => {
            for preset in render::PRESETS.iter() {
                println!(
                    "{:<12} {} on {}",
                    preset.name, preset.wave_color, preset.background_color
                );
            }
            Ok(())
        }
    }
}

async fn run_render(args: RenderArgs) -> AppResult<()> {
    let settings = args.resolve_settings()?;
    let formats = args.formats();

    if let Some(path) = &args.save_settings {
        write_settings(&settings, path)?;
        println!("Saved settings to {}", path.display());
    }

    let file = AudioFile::from_path(&args.input)?;

    let session = WaveformSession::with_bar_count(SymphoniaDecoder, settings.bar_count);
    let mut progress_rx = session.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(progress) = progress_rx.recv().await {
            match progress.stage {
                LoadStage::Error => eprintln!("{}", progress.message),
                _ => eprintln!("[{:>3.0}%] {}", progress.percent, progress.message),
            }
            if let Some(warning) = progress.warning {
                eprintln!("Warning: {}", warning);
            }
        }
    });

    let loaded = commands::load_file(&session, file).await;
    // Closing the channel ends the printer once it has drained
    drop(session);
    if let Err(e) = printer.await {
        tracing::warn!("Progress printer stopped: {}", e);
    }
    let track = loaded?;

    let config = &settings.render;
    let surface = commands::render(&track, config);

    fs::create_dir_all(&args.output_dir)?;
    for format in formats {
        let artifact = commands::export(&track, &surface, config, format)?;
        let path = args.output_dir.join(&artifact.file_name);
        fs::write(&path, &artifact.bytes)?;
        println!("Wrote {}", path.display());
    }

    if args.embed {
        println!("{}", commands::embed(&surface)?);
    }

    Ok(())
}
