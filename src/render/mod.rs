//! Waveform rendering module
//!
//! Turns an envelope into SoundCloud-style rounded bars, either as pixels or
//! as an SVG document. Both backends share the same geometry.

pub mod config;
pub mod geometry;
pub mod raster;
pub mod svg;

pub use config::{find_preset, RenderConfig, Rgb, ThemePreset, PRESETS};
pub use geometry::{layout_bars, Bar, BarLayout};
pub use raster::{render, Surface};
