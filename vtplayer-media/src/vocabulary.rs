//! Engine event vocabularies
//!
//! Maps neutral [`AdapterEvent`]s onto each engine's native event names.

use serde::{Deserialize, Serialize};
use std::fmt;
use vtplayer_core::AdapterEvent;

/// Supported media engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineFlavor {
    /// Shaka Player
    Shaka,
    /// dash.js MediaPlayer
    DashJs,
}

impl Default for EngineFlavor {
    fn default() -> Self {
        Self::Shaka
    }
}

impl fmt::Display for EngineFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag reported by an adapter so callers can branch on engine differences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterType {
    /// Backed by Shaka Player
    Shaka,
    /// Backed by dash.js
    DashJs,
}

impl AdapterType {
    /// Get the adapter type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterType::Shaka => "shaka",
            AdapterType::DashJs => "dashjs",
        }
    }
}

/// Diagnostic event the adapter listens to internally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Logged as a warning
    Warn,
    /// Logged at debug level
    Debug,
}

impl EngineFlavor {
    /// Engine name for logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            EngineFlavor::Shaka => "shaka",
            EngineFlavor::DashJs => "dashjs",
        }
    }

    /// Adapter type reported by adapters backed by this engine
    pub fn adapter_type(&self) -> AdapterType {
        match self {
            EngineFlavor::Shaka => AdapterType::Shaka,
            EngineFlavor::DashJs => AdapterType::DashJs,
        }
    }

    /// Native event identifier for a neutral event
    pub fn native_event(&self, event: AdapterEvent) -> &'static str {
        match self {
            EngineFlavor::Shaka => shaka_event(event),
            EngineFlavor::DashJs => dashjs_event(event),
        }
    }

    /// Reverse lookup of a native identifier
    pub fn neutral_event(&self, native: &str) -> Option<AdapterEvent> {
        AdapterEvent::ALL
            .iter()
            .copied()
            .find(|event| self.native_event(*event) == native)
    }

    /// Low-level events logged by every adapter of this engine
    pub fn diagnostic_events(&self) -> &'static [(&'static str, DiagnosticLevel)] {
        match self {
            EngineFlavor::Shaka => &[
                ("error", DiagnosticLevel::Warn),
                ("message", DiagnosticLevel::Debug),
                ("open", DiagnosticLevel::Debug),
            ],
            EngineFlavor::DashJs => &[
                ("error", DiagnosticLevel::Warn),
                ("playbackError", DiagnosticLevel::Warn),
                ("log", DiagnosticLevel::Debug),
            ],
        }
    }
}

fn shaka_event(event: AdapterEvent) -> &'static str {
    match event {
        AdapterEvent::PlaybackStarted => "play",
        AdapterEvent::PlaybackPaused => "pause",
        AdapterEvent::TimeUpdated => "timeupdate",
        AdapterEvent::StreamActivated => "loaded",
        AdapterEvent::StreamDeactivated => "unloading",
        AdapterEvent::StreamTeardownComplete => "unloaded",
        AdapterEvent::TextTracksAdded => "textchanged",
        AdapterEvent::BufferLevelUpdated => "buffering",
        AdapterEvent::PlaybackRateChanged => "ratechange",
        AdapterEvent::CanPlay => "canplay",
        AdapterEvent::Waiting => "waiting",
        AdapterEvent::VolumeChanged => "volumechange",
        AdapterEvent::Error => "error",
    }
}

fn dashjs_event(event: AdapterEvent) -> &'static str {
    match event {
        AdapterEvent::PlaybackStarted => "playbackStarted",
        AdapterEvent::PlaybackPaused => "playbackPaused",
        AdapterEvent::TimeUpdated => "playbackTimeUpdated",
        AdapterEvent::StreamActivated => "streamActivated",
        AdapterEvent::StreamDeactivated => "streamDeactivated",
        AdapterEvent::StreamTeardownComplete => "streamTeardownComplete",
        AdapterEvent::TextTracksAdded => "allTextTracksAdded",
        AdapterEvent::BufferLevelUpdated => "bufferLevelUpdated",
        AdapterEvent::PlaybackRateChanged => "playbackRateChanged",
        AdapterEvent::CanPlay => "canPlay",
        AdapterEvent::Waiting => "playbackWaiting",
        AdapterEvent::VolumeChanged => "playbackVolumeChanged",
        AdapterEvent::Error => "error",
    }
}
