//! # vtplayer - Adaptive video playback for privacy-friendly frontends
//!
//! vtplayer puts one small, engine-neutral interface in front of adaptive
//! streaming engines (Shaka Player, dash.js) and drives it from a seek bar
//! that understands mouse and touch gestures.
//!
//! ## Key Features
//!
//! - **One adapter interface**: transport, tracks, buffer level and events
//!   look the same whichever engine is underneath
//! - **Latest source wins**: rapid source changes never leave a stale
//!   stream attached
//! - **Single-slot events**: re-subscribing replaces the previous callback
//! - **Gesture-aware seek bar**: drag previews, release commits, leaving
//!   the player cancels
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vtplayer::testing::{ScriptedEngineModule, ScriptedVideoElement};
//! use vtplayer::{EngineFlavor, Player};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vtplayer::PlayerError> {
//!     let mut player = Player::builder()
//!         .video(Arc::new(ScriptedVideoElement::new(634.0)))
//!         .engine(Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka)))
//!         .source("https://cdn.example/watch/manifest.mpd")
//!         .viewport_width(1280.0)
//!         .build()
//!         .await?;
//!
//!     // User clicks halfway along the seek bar
//!     player.on_click(640.0)?;
//!     player.update_progress()?;
//!
//!     player.shutdown().await;
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core types for easy access
pub use vtplayer_core::{
    format_timestamp, humanize_bitrate, is_pointer_out_of_bounds, percentage_from_pointer_x,
    time_at_percentage, AdapterEvent, EngineEvent, ErrorCategory, EventPayload, PlayerError,
    PlayerResult, SeekGeometry, TrackDescriptor, TrackKind, VariantTrack,
};

pub use vtplayer_media::{
    testing, AdapterOptions, AdapterType, BufferedMedia, EngineAdapter, EngineFlavor,
    EngineModule, EventCallback, GestureOutcome, GestureState, ListenerId, MediaEngine,
    PlaybackAdapter, PlaybackSession, SeekBarConfig, SeekBarController, SeekState,
    TimeFormatter, VideoElement,
};

#[cfg(feature = "diagnostics")]
pub use vtplayer_diagnostics::{DebugLogger, PlaybackMonitor, PlaybackSnapshot};

// Public API modules
pub mod config;
pub mod player;

// Re-export main API types
pub use config::{AdapterConfig, PlayerConfig};
pub use player::{Player, PlayerBuilder};
