//! # vtplayer Media
//!
//! Playback adapters over adaptive-streaming engines, the session that owns
//! them, and the seek-bar interaction controller that drives them from
//! pointer and touch input.

#![warn(clippy::all)]

pub mod adapter;
pub mod engine;
pub mod engine_adapter;
pub mod registry;
pub mod seekbar;
pub mod session;
pub mod testing;
pub mod vocabulary;

// Re-export main types
pub use adapter::PlaybackAdapter;
pub use engine::{
    BufferedMedia, EngineModule, EventCallback, ListenerId, MediaEngine, VideoElement,
};
pub use engine_adapter::{AdapterOptions, EngineAdapter};
pub use registry::EventRegistry;
pub use seekbar::{
    GestureOutcome, GestureState, SeekBarConfig, SeekBarController, SeekState, TimeFormatter,
};
pub use session::PlaybackSession;
pub use vocabulary::{AdapterType, DiagnosticLevel, EngineFlavor};
