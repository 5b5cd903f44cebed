//! Point-in-time playback state for debugging overlays

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vtplayer_core::{PlayerResult, TrackDescriptor};
use vtplayer_media::{AdapterType, PlaybackAdapter};

/// Playback state captured from one adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Engine family behind the adapter
    pub adapter_type: AdapterType,
    /// Source the adapter last loaded successfully
    pub loaded_source: Option<String>,
    /// Playback position in seconds
    pub current_time: f64,
    /// Media duration in seconds; `None` while unknown
    pub duration: Option<f64>,
    /// Seconds of media buffered ahead
    pub buffer_level: f64,
    /// Volume (0..=1)
    pub volume: f64,
    /// Playback rate
    pub playback_rate: f64,
    /// Selectable video qualities
    pub video_qualities: Vec<TrackDescriptor>,
    /// Whether the adapter has been destroyed
    pub destroyed: bool,
    /// When the snapshot was taken
    pub captured_at: DateTime<Utc>,
}

impl PlaybackSnapshot {
    /// Playback position as a percentage of the duration
    pub fn progress_percentage(&self) -> Option<f64> {
        self.duration
            .map(|duration| (self.current_time / duration * 100.0).clamp(0.0, 100.0))
    }

    /// Serialize for a debug overlay or log line
    pub fn to_json(&self) -> PlayerResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds [`PlaybackSnapshot`]s and keeps a bounded history of them
#[derive(Debug)]
pub struct PlaybackMonitor {
    history: VecDeque<PlaybackSnapshot>,
    capacity: usize,
}

impl PlaybackMonitor {
    /// Create a monitor keeping the last `capacity` snapshots. A capacity
    /// of zero keeps none.
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Capture the adapter's current state
    pub fn snapshot(adapter: &dyn PlaybackAdapter) -> PlaybackSnapshot {
        let duration = adapter.duration();
        PlaybackSnapshot {
            adapter_type: adapter.adapter_type(),
            loaded_source: adapter.loaded_source(),
            current_time: adapter.current_time(),
            duration: (duration.is_finite() && duration > 0.0).then_some(duration),
            buffer_level: adapter.buffer_level(),
            volume: adapter.volume(),
            playback_rate: adapter.playback_rate(),
            video_qualities: adapter.video_quality_list(),
            destroyed: adapter.is_destroyed(),
            captured_at: Utc::now(),
        }
    }

    /// Capture a snapshot, append it to the history and return it
    pub fn record(&mut self, adapter: &dyn PlaybackAdapter) -> PlaybackSnapshot {
        let snapshot = Self::snapshot(adapter);
        debug!(
            "Playback snapshot: {} at {:.1}s, buffer {:.1}s",
            snapshot.adapter_type.as_str(),
            snapshot.current_time,
            snapshot.buffer_level
        );
        if self.capacity == 0 {
            return snapshot;
        }

        while self.history.len() >= self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(snapshot.clone());
        snapshot
    }

    /// Recorded snapshots, oldest first
    pub fn history(&self) -> impl Iterator<Item = &PlaybackSnapshot> + '_ {
        self.history.iter()
    }

    /// Number of recorded snapshots
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Most recent snapshot
    pub fn latest(&self) -> Option<&PlaybackSnapshot> {
        self.history.back()
    }

    /// Drop all recorded snapshots
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for PlaybackMonitor {
    fn default() -> Self {
        Self::new(32)
    }
}
