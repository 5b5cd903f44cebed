//! Neutral playback event names and engine event payloads
//!
//! Callers subscribe by [`AdapterEvent`]; each engine vocabulary maps these
//! onto whatever identifiers the engine dispatches natively.

use serde::{Deserialize, Serialize};

/// Events a playback adapter can deliver to its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdapterEvent {
    /// Playback started or resumed
    PlaybackStarted,
    /// Playback paused
    PlaybackPaused,
    /// Current time advanced
    TimeUpdated,
    /// A stream became active
    StreamActivated,
    /// The active stream was deactivated
    StreamDeactivated,
    /// Stream teardown finished
    StreamTeardownComplete,
    /// Text tracks were added
    TextTracksAdded,
    /// Buffer level changed
    BufferLevelUpdated,
    /// Playback rate changed
    PlaybackRateChanged,
    /// Enough media is buffered to start playback
    CanPlay,
    /// Playback stalled waiting for data
    Waiting,
    /// Volume changed
    VolumeChanged,
    /// Transport/diagnostic error reported by the engine
    Error,
}

impl AdapterEvent {
    /// Every neutral event, in declaration order
    pub const ALL: [AdapterEvent; 13] = [
        AdapterEvent::PlaybackStarted,
        AdapterEvent::PlaybackPaused,
        AdapterEvent::TimeUpdated,
        AdapterEvent::StreamActivated,
        AdapterEvent::StreamDeactivated,
        AdapterEvent::StreamTeardownComplete,
        AdapterEvent::TextTracksAdded,
        AdapterEvent::BufferLevelUpdated,
        AdapterEvent::PlaybackRateChanged,
        AdapterEvent::CanPlay,
        AdapterEvent::Waiting,
        AdapterEvent::VolumeChanged,
        AdapterEvent::Error,
    ];

    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            AdapterEvent::PlaybackStarted => "playback_started",
            AdapterEvent::PlaybackPaused => "playback_paused",
            AdapterEvent::TimeUpdated => "time_updated",
            AdapterEvent::StreamActivated => "stream_activated",
            AdapterEvent::StreamDeactivated => "stream_deactivated",
            AdapterEvent::StreamTeardownComplete => "stream_teardown_complete",
            AdapterEvent::TextTracksAdded => "text_tracks_added",
            AdapterEvent::BufferLevelUpdated => "buffer_level_updated",
            AdapterEvent::PlaybackRateChanged => "playback_rate_changed",
            AdapterEvent::CanPlay => "can_play",
            AdapterEvent::Waiting => "waiting",
            AdapterEvent::VolumeChanged => "volume_changed",
            AdapterEvent::Error => "error",
        }
    }

    /// Check if this event concerns stream lifecycle
    pub fn is_stream_event(&self) -> bool {
        matches!(
            self,
            AdapterEvent::StreamActivated
                | AdapterEvent::StreamDeactivated
                | AdapterEvent::StreamTeardownComplete
                | AdapterEvent::TextTracksAdded
        )
    }

    /// Check if this event concerns transport state
    pub fn is_transport_event(&self) -> bool {
        matches!(
            self,
            AdapterEvent::PlaybackStarted
                | AdapterEvent::PlaybackPaused
                | AdapterEvent::TimeUpdated
                | AdapterEvent::PlaybackRateChanged
                | AdapterEvent::VolumeChanged
        )
    }

    /// Check if this event concerns buffering
    pub fn is_buffering_event(&self) -> bool {
        matches!(
            self,
            AdapterEvent::BufferLevelUpdated | AdapterEvent::CanPlay | AdapterEvent::Waiting
        )
    }
}

/// Data carried by an engine event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventPayload {
    /// No payload
    None,
    /// Media time in seconds
    Time(f64),
    /// Buffer level in seconds
    BufferLevel(f64),
    /// Playback rate multiplier
    PlaybackRate(f64),
    /// Volume (0.0 to 1.0)
    Volume(f64),
    /// Diagnostic message
    Message(String),
    /// Engine error
    Error {
        /// Engine error code, if any
        code: Option<u32>,
        /// Error description
        message: String,
    },
}

/// Event as dispatched by a media engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineEvent {
    /// Native event identifier
    pub name: String,
    /// Event data
    pub payload: EventPayload,
}

impl EngineEvent {
    /// Create an event without payload
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: EventPayload::None,
        }
    }

    /// Create an event carrying `payload`
    pub fn with_payload(name: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_event_type_names_are_unique() {
        let names: HashSet<_> = AdapterEvent::ALL.iter().map(|e| e.event_type()).collect();
        assert_eq!(names.len(), AdapterEvent::ALL.len());
    }

    #[test]
    fn test_event_classification() {
        assert!(AdapterEvent::StreamActivated.is_stream_event());
        assert!(!AdapterEvent::StreamActivated.is_transport_event());

        assert!(AdapterEvent::TimeUpdated.is_transport_event());
        assert!(AdapterEvent::Waiting.is_buffering_event());

        assert!(!AdapterEvent::Error.is_stream_event());
        assert!(!AdapterEvent::Error.is_transport_event());
        assert!(!AdapterEvent::Error.is_buffering_event());
    }
}
