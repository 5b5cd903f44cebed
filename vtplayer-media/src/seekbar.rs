//! Seek-bar interaction controller
//!
//! Turns pointer and touch input into seek-bar state. Pressing and dragging
//! only previews a position (the progress indicator follows the pointer);
//! releasing commits it by moving the media time through the adapter.
//! Hovering without a press updates a separate preview readout and never
//! touches the committed seek position.
//!
//! Dragging outside the player cancels the gesture when
//! [`SeekBarConfig::cancel_on_out_of_bounds`] is set: the progress indicator
//! snaps back to where it was before the press and nothing is committed.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use vtplayer_core::{format_timestamp, is_pointer_out_of_bounds, time_at_percentage, SeekGeometry};

use crate::adapter::PlaybackAdapter;

/// Formats a media time (seconds) for the hover readout
pub type TimeFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Seek-bar configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekBarConfig {
    /// Viewport width in pixels
    pub viewport_width: f64,
    /// Seek bar placement inside the viewport
    pub geometry: SeekGeometry,
    /// Cancel an active drag when the pointer leaves the player
    pub cancel_on_out_of_bounds: bool,
    /// Ignore touch input unless the player overlay is visible
    pub require_overlay_for_touch: bool,
}

impl Default for SeekBarConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            geometry: SeekGeometry::default(),
            cancel_on_out_of_bounds: true,
            require_overlay_for_touch: true,
        }
    }
}

/// Gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureState {
    /// No gesture; also the state right after a release or cancel
    Idle,
    /// Pointer over the seek bar, nothing pressed
    Hovering,
    /// Press or touch in progress, not yet committed
    Seeking,
}

/// Seek-bar UI state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeekState {
    /// Whether a drag/touch gesture is in progress
    pub seeking: bool,
    /// Position (0..=100) that a release would commit
    pub seek_percentage: f64,
    /// Position (0..=100) under the pointer
    pub hover_percentage: f64,
    /// Formatted media time under the pointer
    pub hover_time: String,
    /// Media time under the pointer in seconds
    pub hover_time_stamp: f64,
}

/// Result of feeding one input event to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Event had no effect
    Ignored,
    /// Hover readout moved
    Hover {
        /// Hover position (0..=100)
        percentage: f64,
    },
    /// Progress indicator previews a new position
    Preview {
        /// Previewed position (0..=100)
        percentage: f64,
    },
    /// Media time was moved
    Committed {
        /// Committed position (0..=100)
        percentage: f64,
        /// Media time set on the adapter; `None` while duration is unknown
        time: Option<f64>,
    },
    /// Gesture abandoned; progress restored
    Cancelled,
}

/// Stateful handler for seek-bar mouse and touch events
pub struct SeekBarController {
    config: SeekBarConfig,
    state: SeekState,
    gesture: GestureState,
    progress_percentage: f64,
    progress_before_gesture: f64,
    overlay_visible: bool,
    suppress_click: bool,
    formatter: TimeFormatter,
}

impl std::fmt::Debug for SeekBarController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeekBarController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("gesture", &self.gesture)
            .field("progress_percentage", &self.progress_percentage)
            .field("overlay_visible", &self.overlay_visible)
            .finish()
    }
}

impl Default for SeekBarController {
    fn default() -> Self {
        Self::new(SeekBarConfig::default())
    }
}

impl SeekBarController {
    /// Create a controller using the default timestamp formatter
    pub fn new(config: SeekBarConfig) -> Self {
        Self {
            config,
            state: SeekState::default(),
            gesture: GestureState::Idle,
            progress_percentage: 0.0,
            progress_before_gesture: 0.0,
            overlay_visible: false,
            suppress_click: false,
            formatter: Arc::new(format_timestamp),
        }
    }

    /// Replace the hover-time formatter
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Current seek state
    pub fn state(&self) -> &SeekState {
        &self.state
    }

    /// Current gesture state
    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// Position (0..=100) the progress indicator renders
    pub fn progress_percentage(&self) -> f64 {
        self.progress_percentage
    }

    /// Active configuration
    pub fn config(&self) -> &SeekBarConfig {
        &self.config
    }

    /// Update the viewport width after a resize
    pub fn set_viewport_width(&mut self, width: f64) {
        self.config.viewport_width = width;
    }

    /// Record whether the player overlay (controls) is visible
    pub fn set_overlay_visible(&mut self, visible: bool) {
        self.overlay_visible = visible;
    }

    /// Whether a pointer position lies outside the player
    pub fn is_pointer_out_of_bounds(&self, pointer_x: f64, pointer_y: f64) -> bool {
        is_pointer_out_of_bounds(pointer_x, pointer_y, self.config.viewport_width)
    }

    /// Follow playback: move the progress indicator to `current_time` unless
    /// a gesture is in progress
    pub fn update_progress(&mut self, current_time: f64, duration: f64) {
        if self.state.seeking || !duration.is_finite() || duration <= 0.0 {
            return;
        }
        self.progress_percentage = (current_time / duration * 100.0).clamp(0.0, 100.0);
    }

    /// Pointer entered the seek bar
    pub fn on_mouse_enter(&mut self) -> GestureOutcome {
        if self.gesture == GestureState::Idle {
            self.gesture = GestureState::Hovering;
        }
        GestureOutcome::Ignored
    }

    /// Pointer left the seek bar; an active drag keeps going
    pub fn on_mouse_leave(&mut self) -> GestureOutcome {
        if self.gesture == GestureState::Hovering {
            self.gesture = GestureState::Idle;
        }
        GestureOutcome::Ignored
    }

    /// Mouse button pressed on the seek bar
    pub fn on_mouse_down(&mut self, adapter: &dyn PlaybackAdapter, page_x: f64) -> GestureOutcome {
        self.begin_seek(page_x, adapter.duration())
    }

    /// Touch started on the seek bar
    pub fn on_touch_start(
        &mut self,
        adapter: &dyn PlaybackAdapter,
        client_x: f64,
    ) -> GestureOutcome {
        if !self.touch_allowed() {
            return GestureOutcome::Ignored;
        }
        self.begin_seek(client_x, adapter.duration())
    }

    /// Mouse moved over the player
    pub fn on_mouse_move(
        &mut self,
        adapter: &dyn PlaybackAdapter,
        page_x: f64,
        page_y: f64,
    ) -> GestureOutcome {
        if self.state.seeking {
            return self.drag(page_x, page_y, adapter.duration());
        }

        if self.gesture == GestureState::Idle {
            self.gesture = GestureState::Hovering;
        }
        self.update_hover(page_x, adapter.duration());
        GestureOutcome::Hover {
            percentage: self.state.hover_percentage,
        }
    }

    /// Touch moved over the player
    pub fn on_touch_move(
        &mut self,
        adapter: &dyn PlaybackAdapter,
        client_x: f64,
        client_y: f64,
    ) -> GestureOutcome {
        if self.state.seeking {
            return self.drag(client_x, client_y, adapter.duration());
        }
        if !self.touch_allowed() {
            return GestureOutcome::Ignored;
        }

        self.update_hover(client_x, adapter.duration());
        GestureOutcome::Hover {
            percentage: self.state.hover_percentage,
        }
    }

    /// Mouse button released anywhere over the player
    pub fn on_mouse_up(&mut self, adapter: &dyn PlaybackAdapter) -> GestureOutcome {
        if !self.state.seeking {
            return GestureOutcome::Ignored;
        }

        self.state.seeking = false;
        self.gesture = GestureState::Idle;
        self.suppress_click = true;
        self.commit(adapter)
    }

    /// Touch ended anywhere over the player
    pub fn on_touch_end(&mut self, adapter: &dyn PlaybackAdapter) -> GestureOutcome {
        self.on_mouse_up(adapter)
    }

    /// Click on the seek bar. Jumps straight to the clicked position unless
    /// it trails a press that was already committed or cancelled.
    pub fn on_click(&mut self, adapter: &dyn PlaybackAdapter, page_x: f64) -> GestureOutcome {
        if std::mem::take(&mut self.suppress_click) {
            return GestureOutcome::Ignored;
        }

        self.state.seek_percentage = self.percentage_at(page_x);
        self.commit(adapter)
    }

    fn touch_allowed(&self) -> bool {
        self.overlay_visible || !self.config.require_overlay_for_touch
    }

    fn percentage_at(&self, pointer_x: f64) -> f64 {
        self.config
            .geometry
            .percentage_from_pointer_x(pointer_x, self.config.viewport_width)
    }

    fn begin_seek(&mut self, pointer_x: f64, duration: f64) -> GestureOutcome {
        let percentage = self.percentage_at(pointer_x);

        self.gesture = GestureState::Seeking;
        self.suppress_click = false;
        self.progress_before_gesture = self.progress_percentage;
        self.state.seeking = true;
        self.state.seek_percentage = percentage;
        self.update_hover(pointer_x, duration);
        self.progress_percentage = percentage;

        debug!("Seek gesture started at {:.2}%", percentage);
        GestureOutcome::Preview { percentage }
    }

    fn drag(&mut self, pointer_x: f64, pointer_y: f64, duration: f64) -> GestureOutcome {
        if self.config.cancel_on_out_of_bounds && self.is_pointer_out_of_bounds(pointer_x, pointer_y)
        {
            return self.cancel();
        }

        let percentage = self.percentage_at(pointer_x);
        self.state.seek_percentage = percentage;
        self.update_hover(pointer_x, duration);
        self.progress_percentage = percentage;
        GestureOutcome::Preview { percentage }
    }

    fn cancel(&mut self) -> GestureOutcome {
        self.state.seeking = false;
        self.gesture = GestureState::Idle;
        self.suppress_click = true;
        self.progress_percentage = self.progress_before_gesture;
        debug!("Seek gesture left the player, cancelled");
        GestureOutcome::Cancelled
    }

    fn update_hover(&mut self, pointer_x: f64, duration: f64) {
        let percentage = self.percentage_at(pointer_x);
        let time_stamp = time_at_percentage(duration, percentage);

        self.state.hover_percentage = percentage;
        self.state.hover_time_stamp = time_stamp;
        self.state.hover_time = (self.formatter)(time_stamp);
    }

    fn commit(&mut self, adapter: &dyn PlaybackAdapter) -> GestureOutcome {
        let percentage = self.state.seek_percentage;
        self.progress_percentage = percentage;

        let duration = adapter.duration();
        let time = if duration.is_finite() && duration > 0.0 {
            let time = time_at_percentage(duration, percentage);
            adapter.set_time(time);
            Some(time)
        } else {
            None
        };

        info!(
            "Seek committed at {:.2}% ({})",
            percentage,
            time.map(|t| format!("{:.2}s", t))
                .unwrap_or_else(|| "duration unknown".to_string())
        );
        GestureOutcome::Committed { percentage, time }
    }
}
