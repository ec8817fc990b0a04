//! Waveform session module
//!
//! Replaces a global controller with an explicit state object:
//! - WaveformSession owns the current track and the load guard
//! - LoadProgress events are broadcast to any number of subscribers

pub mod coordinator;
pub mod state;

pub use coordinator::WaveformSession;
pub use state::{LoadProgress, LoadStage, LoadedTrack, SessionState, SILENT_WARNING};
