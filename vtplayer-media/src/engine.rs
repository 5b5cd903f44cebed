//! Media engine seam
//!
//! These traits describe what the playback layer consumes from the outside:
//! a loadable engine module, the player object it constructs, and the video
//! element both of them drive. Concrete bindings (Shaka, dash.js, a test
//! double) implement them; the adapter layer only talks to these traits.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use vtplayer_core::{EngineEvent, PlayerResult, VariantTrack};

use crate::vocabulary::EngineFlavor;

/// Identifier returned when a listener is added to an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Callback invoked synchronously from the engine's own dispatch
pub type EventCallback = Arc<dyn Fn(&EngineEvent) + Send + Sync>;

/// Media kind used for buffer metric queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferedMedia {
    /// Video buffer
    Video,
    /// Audio buffer
    Audio,
}

/// Video-element-like playback surface
pub trait VideoElement: Send + Sync {
    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position
    fn set_current_time(&self, seconds: f64);

    /// Media duration in seconds (NaN while unknown)
    fn duration(&self) -> f64;

    /// Volume (0.0 to 1.0)
    fn volume(&self) -> f64;

    /// Set volume (0.0 to 1.0)
    fn set_volume(&self, volume: f64);

    /// Playback rate multiplier
    fn playback_rate(&self) -> f64;

    /// Set playback rate multiplier
    fn set_playback_rate(&self, rate: f64);

    /// Start or resume playback
    fn play(&self);

    /// Pause playback
    fn pause(&self);
}

/// Player object constructed by an engine module
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Attach the player to a video element
    async fn attach(&self, element: Arc<dyn VideoElement>) -> PlayerResult<()>;

    /// Load a manifest, starting playback at `start_time` seconds
    async fn load(&self, source: &str, start_time: f64) -> PlayerResult<()>;

    /// Release the player and detach it from its element
    async fn destroy(&self) -> PlayerResult<()>;

    /// Variant (audio+video) tracks of the loaded manifest
    fn variant_tracks(&self) -> Vec<VariantTrack>;

    /// Image (thumbnail) tracks of the loaded manifest
    fn image_tracks(&self) -> Vec<VariantTrack>;

    /// Playback rate as the engine sees it
    fn playback_rate(&self) -> f64;

    /// Seconds buffered ahead for `media`, or `None` when the engine has no
    /// buffer metrics
    fn buffer_level(&self, media: BufferedMedia) -> Option<f64>;

    /// Register `callback` for the native event `event`
    fn add_event_listener(&self, event: &str, callback: EventCallback) -> ListenerId;

    /// Remove a listener previously returned by `add_event_listener`.
    ///
    /// Returns `false` if the listener was not registered.
    fn remove_event_listener(&self, event: &str, listener: ListenerId) -> bool;
}

/// Loadable engine module (the library itself, before a player exists)
#[async_trait]
pub trait EngineModule: Send + Sync {
    /// Which engine this module provides
    fn flavor(&self) -> EngineFlavor;

    /// Load the engine code
    async fn import(&self) -> PlayerResult<()>;

    /// Install engine polyfills/compat shims
    fn install_polyfills(&self);

    /// Whether the runtime environment can host this engine
    fn is_supported(&self) -> bool;

    /// Construct a new, unattached player
    fn create_player(&self) -> PlayerResult<Arc<dyn MediaEngine>>;
}
