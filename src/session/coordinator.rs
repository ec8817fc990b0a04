//! Waveform session
//!
//! Owns the current track and drives a file through validation, decoding and
//! envelope reduction, broadcasting progress as it goes.

use super::state::{LoadProgress, LoadedTrack, SessionState};
use crate::audio::{AudioDecoder, AudioFile, DecodeError};
use crate::utils::error::{AppError, AppResult};
use crate::waveform::{self, EnvelopeError, DEFAULT_BAR_COUNT};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;

/// Holds the in-flight flag for the duration of a load
///
/// A load dropped before it finished (timeout, abort) leaves the state at
/// `Loading`; releasing the reservation resets it to `Idle` first.
struct LoadReservation<'a> {
    flag: &'a AtomicBool,
    state: &'a RwLock<SessionState>,
    track: &'a RwLock<Option<Arc<LoadedTrack>>>,
}

impl<'a> LoadReservation<'a> {
    fn acquire(
        flag: &'a AtomicBool,
        state: &'a RwLock<SessionState>,
        track: &'a RwLock<Option<Arc<LoadedTrack>>>,
    ) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag, state, track })
    }
}

impl Drop for LoadReservation<'_> {
    fn drop(&mut self) {
        {
            let mut state = self.state.write();
            if *state == SessionState::Loading {
                tracing::warn!("Load cancelled before completion");
                *self.track.write() = None;
                *state = SessionState::Idle;
            }
        }
        self.flag.store(false, Ordering::Release);
    }
}

/// Loads audio files one at a time and keeps the latest result
pub struct WaveformSession<D: AudioDecoder> {
    decoder: D,

    /// Bars produced per load
    bar_count: usize,

    state: RwLock<SessionState>,

    track: RwLock<Option<Arc<LoadedTrack>>>,

    /// Set while a load is in flight
    loading: AtomicBool,

    progress_tx: broadcast::Sender<LoadProgress>,
}

impl<D: AudioDecoder> WaveformSession<D> {
    pub fn new(decoder: D) -> Self {
        Self::with_bar_count(decoder, DEFAULT_BAR_COUNT)
    }

    pub fn with_bar_count(decoder: D, bar_count: usize) -> Self {
        let (progress_tx, _) = broadcast::channel(32);
        Self {
            decoder,
            bar_count,
            state: RwLock::new(SessionState::Idle),
            track: RwLock::new(None),
            loading: AtomicBool::new(false),
            progress_tx,
        }
    }

    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// The most recently loaded track
    pub fn current_track(&self) -> Option<Arc<LoadedTrack>> {
        self.track.read().clone()
    }

    /// Subscribe to load progress events
    pub fn subscribe(&self) -> broadcast::Receiver<LoadProgress> {
        self.progress_tx.subscribe()
    }

    fn emit(&self, progress: LoadProgress) {
        let _ = self.progress_tx.send(progress);
    }

    /// Decode and reduce `file`, replacing the current track on success.
    ///
    /// Invalid files are rejected before the session is touched. A load that
    /// starts while another is in flight fails with [`AppError::Busy`].
    pub async fn load_file(&self, file: AudioFile) -> AppResult<Arc<LoadedTrack>> {
        file.validate()?;

        let Some(_reservation) = LoadReservation::acquire(&self.loading, &self.state, &self.track) else {
            tracing::warn!("Rejected '{}': another file is loading", file.name);
            return Err(AppError::Busy);
        };

        *self.state.write() = SessionState::Loading;

        match self.run_load(file).await {
            Ok(track) => {
                *self.track.write() = Some(track.clone());
                *self.state.write() = SessionState::Ready;
                self.emit(LoadProgress::complete(track.warning().map(str::to_string)));
                Ok(track)
            }
            Err(e) => {
                tracing::error!("Load failed: {}", e);
                *self.track.write() = None;
                *self.state.write() = SessionState::Idle;
                self.emit(LoadProgress::error(e.to_string()));
                Err(e)
            }
        }
    }

    async fn run_load(&self, file: AudioFile) -> AppResult<Arc<LoadedTrack>> {
        if self.bar_count == 0 {
            return Err(EnvelopeError::InvalidBarCount.into());
        }

        let start = Instant::now();
        tracing::info!("Loading '{}' ({} bytes)", file.name, file.bytes.len());
        self.emit(LoadProgress::reading());

        let stem = file.stem().to_string();

        self.emit(LoadProgress::decoding());
        let samples = self.decoder.decode(file).await?;
        if samples.channel_count() == 0 {
            return Err(DecodeError::InvalidFormat("decoder produced no channels".to_string()).into());
        }

        self.emit(LoadProgress::generating());
        let envelope = waveform::reduce(samples.channel(0), self.bar_count)?;
        let track = Arc::new(LoadedTrack::new(stem, samples.info(), envelope));

        tracing::info!(
            "Loaded track {} '{}': {:.2}s, {} Hz, {} channel(s) in {:?}",
            track.id,
            track.stem,
            track.info.duration_secs,
            track.info.sample_rate,
            track.info.channels,
            start.elapsed()
        );

        Ok(track)
    }
}
