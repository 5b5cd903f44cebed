//! # vtplayer Diagnostics
//!
//! Debugging and diagnostic tools for vtplayer.
//! Provides structured logging setup and playback state snapshots.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod debug_logger;
pub mod playback_monitor;

// Re-export main types
pub use debug_logger::DebugLogger;
pub use playback_monitor::{PlaybackMonitor, PlaybackSnapshot};
