//! # vtplayer Core
//!
//! Engine-independent building blocks for the playback layer: the error
//! taxonomy, seek-bar geometry, display formatting, track descriptors and
//! the neutral event vocabulary shared by every playback adapter.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod events;
pub mod format;
pub mod geometry;
pub mod tracks;

// Re-export main types
pub use error::{ErrorCategory, PlayerError, PlayerResult};
pub use events::{AdapterEvent, EngineEvent, EventPayload};
pub use format::{format_timestamp, humanize_bitrate};
pub use geometry::{
    is_pointer_out_of_bounds, percentage_from_pointer_x, time_at_percentage, SeekGeometry,
};
pub use tracks::{TrackDescriptor, TrackKind, VariantTrack};
