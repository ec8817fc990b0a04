//! Command handlers
//!
//! The operations a front end calls, independent of any particular UI:
//! loading into a session, rendering, exporting and embedding.

pub mod export;
pub mod track;

pub use export::{embed, export, export_all};
pub use track::{current_track, load_file, render};
