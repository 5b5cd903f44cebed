//! Playback adapter interface
//!
//! Every engine-backed adapter exposes the same transport controls, track
//! introspection and event subscription surface, so the player UI never
//! needs to know which engine is running.

use async_trait::async_trait;
use std::sync::Arc;
use vtplayer_core::{AdapterEvent, EngineEvent, PlayerResult, TrackDescriptor};

use crate::engine::EventCallback;
use crate::vocabulary::AdapterType;

/// Uniform playback-control contract over one media engine
#[async_trait]
pub trait PlaybackAdapter: Send + Sync {
    /// Engine backing this adapter
    fn adapter_type(&self) -> AdapterType;

    /// Load `source`, starting at `start_time` seconds.
    ///
    /// When several loads overlap, only the most recently requested one
    /// takes effect.
    async fn load(&self, source: &str, start_time: f64) -> PlayerResult<()>;

    /// Release event subscriptions and the engine. Safe to call repeatedly.
    async fn destroy(&self);

    /// Whether `destroy` has run
    fn is_destroyed(&self) -> bool;

    /// Source of the most recent load that completed
    fn loaded_source(&self) -> Option<String>;

    /// Start or resume playback
    fn play(&self);

    /// Pause playback
    fn pause(&self);

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position
    fn set_time(&self, seconds: f64);

    /// Media duration in seconds (NaN while unknown)
    fn duration(&self) -> f64;

    /// Volume (0.0 to 1.0)
    fn volume(&self) -> f64;

    /// Set volume; values outside 0.0..=1.0 are clamped
    fn set_volume(&self, volume: f64);

    /// Playback rate multiplier
    fn playback_rate(&self) -> f64;

    /// Set playback rate multiplier
    fn set_playback_rate(&self, rate: f64);

    /// Selectable video qualities
    fn video_quality_list(&self) -> Vec<TrackDescriptor>;

    /// Selectable audio qualities
    fn audio_quality_list(&self) -> Vec<TrackDescriptor>;

    /// Video (image/thumbnail) tracks
    fn video_track_list(&self) -> Vec<TrackDescriptor>;

    /// Audio language tracks
    fn audio_track_list(&self) -> Vec<TrackDescriptor>;

    /// Seconds buffered ahead, or `0.0` when unavailable
    fn buffer_level(&self) -> f64;

    /// Set the single callback for `event`, replacing any previous one
    fn on(&self, event: AdapterEvent, callback: EventCallback);

    /// Remove the callback for `event`
    fn off(&self, event: AdapterEvent) -> bool;

    /// Subscribe to playback start
    fn on_playback_started<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::PlaybackStarted, Arc::new(callback));
    }

    /// Subscribe to playback pause
    fn on_playback_paused<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::PlaybackPaused, Arc::new(callback));
    }

    /// Subscribe to time updates
    fn on_time_updated<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::TimeUpdated, Arc::new(callback));
    }

    /// Subscribe to stream activation
    fn on_stream_activated<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::StreamActivated, Arc::new(callback));
    }

    /// Subscribe to stream deactivation
    fn on_stream_deactivated<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::StreamDeactivated, Arc::new(callback));
    }

    /// Subscribe to stream teardown completion
    fn on_stream_teardown_complete<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::StreamTeardownComplete, Arc::new(callback));
    }

    /// Subscribe to text tracks being added
    fn on_text_tracks_added<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::TextTracksAdded, Arc::new(callback));
    }

    /// Subscribe to buffer level updates
    fn on_buffer_level_updated<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::BufferLevelUpdated, Arc::new(callback));
    }

    /// Subscribe to playback rate changes
    fn on_playback_rate_changed<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::PlaybackRateChanged, Arc::new(callback));
    }

    /// Subscribe to can-play
    fn on_can_play<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::CanPlay, Arc::new(callback));
    }

    /// Subscribe to waiting (stall)
    fn on_waiting<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::Waiting, Arc::new(callback));
    }

    /// Subscribe to volume changes
    fn on_volume_changed<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::VolumeChanged, Arc::new(callback));
    }

    /// Subscribe to engine errors
    fn on_error<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
        Self: Sized,
    {
        self.on(AdapterEvent::Error, Arc::new(callback));
    }
}
