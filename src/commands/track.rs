//! Track command handlers
//!
//! Loading a file into a session and rendering the loaded track.

use crate::audio::{AudioDecoder, AudioFile};
use crate::render::{self, RenderConfig, Surface};
use crate::session::{LoadedTrack, WaveformSession};
use crate::utils::error::{AppError, AppResult};
use std::sync::Arc;

/// Load a file into the session, replacing any previous track
pub async fn load_file<D: AudioDecoder>(
    session: &WaveformSession<D>,
    file: AudioFile,
) -> AppResult<Arc<LoadedTrack>> {
    session.load_file(file).await
}

/// The session's current track, or [`AppError::NoTrack`] before any load
pub fn current_track<D: AudioDecoder>(session: &WaveformSession<D>) -> AppResult<Arc<LoadedTrack>> {
    session.current_track().ok_or(AppError::NoTrack)
}

/// Rasterize the track with `config`
pub fn render(track: &LoadedTrack, config: &RenderConfig) -> Surface {
    let surface = render::render(&track.envelope, config);
    tracing::debug!(
        "Rendered track {} at {}x{}",
        track.id,
        surface.width,
        surface.height
    );
    surface
}
