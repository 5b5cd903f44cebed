//! Player facade and builder

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use vtplayer_core::{PlayerError, PlayerResult, TrackDescriptor};
use vtplayer_media::{
    EngineFlavor, EngineModule, GestureOutcome, PlaybackAdapter, PlaybackSession,
    SeekBarController, SeekState, VideoElement,
};

use crate::config::{validate_start_time, PlayerConfig};

/// Fluent builder for a [`Player`]
pub struct PlayerBuilder {
    video: Option<Arc<dyn VideoElement>>,
    module: Option<Arc<dyn EngineModule>>,
    source: Option<String>,
    start_time: Option<f64>,
    config: PlayerConfig,
}

impl std::fmt::Debug for PlayerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerBuilder")
            .field("source", &self.source)
            .field("start_time", &self.start_time)
            .field("has_video", &self.video.is_some())
            .field("engine", &self.module.as_ref().map(|m| m.flavor()))
            .field("config", &self.config)
            .finish()
    }
}

impl PlayerBuilder {
    pub(crate) fn new() -> Self {
        Self {
            video: None,
            module: None,
            source: None,
            start_time: None,
            config: PlayerConfig::default(),
        }
    }

    /// Video element the engine attaches to (required)
    pub fn video(mut self, video: Arc<dyn VideoElement>) -> Self {
        self.video = Some(video);
        self
    }

    /// Manifest URL (required)
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Start position in seconds
    pub fn start_time(mut self, seconds: f64) -> Self {
        self.start_time = Some(seconds);
        self
    }

    /// Engine module backing the adapter (required)
    pub fn engine(mut self, module: Arc<dyn EngineModule>) -> Self {
        self.module = Some(module);
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: PlayerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the seek bar's viewport width
    pub fn viewport_width(mut self, width: f64) -> Self {
        self.config.seekbar.viewport_width = width;
        self
    }

    /// Create the session, attach the adapter and wire the seek bar
    pub async fn build(self) -> PlayerResult<Player> {
        let video = self.video.ok_or_else(|| missing("video"))?;
        let module = self.module.ok_or_else(|| missing("engine"))?;
        let source = self.source.ok_or_else(|| missing("source"))?;

        let mut config = self.config;
        config.validate()?;
        let start_time = self
            .start_time
            .unwrap_or(config.adapter.default_start_time);
        validate_start_time(start_time)?;

        if module.flavor() != config.adapter.engine {
            debug!(
                "Engine module is {}, overriding configured {}",
                module.flavor(),
                config.adapter.engine
            );
            config.adapter.engine = module.flavor();
        }

        let mut session = PlaybackSession::new(video, source, Some(start_time))
            .with_engine_diagnostics(config.adapter.log_engine_diagnostics);
        session.attach(module).await?;

        let seekbar = SeekBarController::new(config.seekbar.clone());
        info!("[{}] Player ready ({})", session.id(), config.adapter.engine);

        Ok(Player {
            session,
            seekbar,
            config,
        })
    }
}

fn missing(field: &str) -> PlayerError {
    PlayerError::InvalidConfiguration {
        message: format!("{} is required", field),
    }
}

/// Player: one playback session plus the seek bar that drives it
///
/// Seek-bar handlers fail with [`PlayerError::NoActiveAdapter`] after
/// [`Player::shutdown`].
pub struct Player {
    session: PlaybackSession,
    seekbar: SeekBarController,
    config: PlayerConfig,
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("session", &self.session)
            .field("seekbar", &self.seekbar)
            .field("engine", &self.config.adapter.engine)
            .finish()
    }
}

impl Player {
    /// Start building a player
    pub fn builder() -> PlayerBuilder {
        PlayerBuilder::new()
    }

    /// Session ID
    pub fn id(&self) -> Uuid {
        self.session.id()
    }

    /// Active configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Engine currently configured
    pub fn engine(&self) -> EngineFlavor {
        self.config.adapter.engine
    }

    /// Current source
    pub fn source(&self) -> String {
        self.session.source()
    }

    /// Change the source; the adapter reloads when it differs from the
    /// current one
    pub fn set_source(&self, source: impl Into<String>) -> bool {
        self.session.set_source(source)
    }

    /// Active adapter
    pub fn adapter(&self) -> PlayerResult<&Arc<dyn PlaybackAdapter>> {
        self.session.require_adapter()
    }

    /// Whether an adapter is attached
    pub fn is_active(&self) -> bool {
        self.session.is_attached()
    }

    /// Destroy the current adapter and attach one backed by `module`
    pub async fn switch_engine(&mut self, module: Arc<dyn EngineModule>) -> PlayerResult<()> {
        let flavor = module.flavor();
        info!(
            "[{}] Switching engine {} -> {}",
            self.session.id(),
            self.config.adapter.engine,
            flavor
        );
        self.session.attach(module).await?;
        self.config.adapter.engine = flavor;
        Ok(())
    }

    /// Release the adapter. Safe to call more than once.
    pub async fn shutdown(&mut self) {
        self.session.detach().await;
    }

    // Transport

    /// Start playback
    pub fn play(&self) -> PlayerResult<()> {
        self.adapter()?.play();
        Ok(())
    }

    /// Pause playback
    pub fn pause(&self) -> PlayerResult<()> {
        self.adapter()?.pause();
        Ok(())
    }

    /// Selectable video qualities
    pub fn video_qualities(&self) -> PlayerResult<Vec<TrackDescriptor>> {
        Ok(self.adapter()?.video_quality_list())
    }

    /// Selectable audio tracks
    pub fn audio_tracks(&self) -> PlayerResult<Vec<TrackDescriptor>> {
        Ok(self.adapter()?.audio_track_list())
    }

    /// Capture the adapter's current state
    #[cfg(feature = "diagnostics")]
    pub fn snapshot(&self) -> PlayerResult<vtplayer_diagnostics::PlaybackSnapshot> {
        let adapter = self.adapter()?;
        Ok(vtplayer_diagnostics::PlaybackMonitor::snapshot(
            adapter.as_ref(),
        ))
    }

    // Seek bar

    /// Seek-bar state
    pub fn seek_state(&self) -> &SeekState {
        self.seekbar.state()
    }

    /// Seek-bar controller
    pub fn seekbar(&self) -> &SeekBarController {
        &self.seekbar
    }

    /// Position (0..=100) the progress indicator renders
    pub fn progress_percentage(&self) -> f64 {
        self.seekbar.progress_percentage()
    }

    /// Viewport resized
    pub fn resize(&mut self, viewport_width: f64) {
        self.seekbar.set_viewport_width(viewport_width);
        self.config.seekbar.viewport_width = viewport_width;
    }

    /// Player overlay shown or hidden
    pub fn set_overlay_visible(&mut self, visible: bool) {
        self.seekbar.set_overlay_visible(visible);
    }

    /// Move the progress indicator to the adapter's current time
    pub fn update_progress(&mut self) -> PlayerResult<()> {
        let adapter = self.session.require_adapter()?;
        self.seekbar
            .update_progress(adapter.current_time(), adapter.duration());
        Ok(())
    }

    /// Forward a mouse-enter on the seek bar
    pub fn on_mouse_enter(&mut self) -> GestureOutcome {
        self.seekbar.on_mouse_enter()
    }

    /// Forward a mouse-leave on the seek bar
    pub fn on_mouse_leave(&mut self) -> GestureOutcome {
        self.seekbar.on_mouse_leave()
    }

    /// Forward a mouse-down on the seek bar
    pub fn on_mouse_down(&mut self, page_x: f64) -> PlayerResult<GestureOutcome> {
        let adapter = self.session.require_adapter()?;
        Ok(self.seekbar.on_mouse_down(adapter.as_ref(), page_x))
    }

    /// Forward a mouse-move over the player
    pub fn on_mouse_move(&mut self, page_x: f64, page_y: f64) -> PlayerResult<GestureOutcome> {
        let adapter = self.session.require_adapter()?;
        Ok(self.seekbar.on_mouse_move(adapter.as_ref(), page_x, page_y))
    }

    /// Forward a mouse-up over the player
    pub fn on_mouse_up(&mut self) -> PlayerResult<GestureOutcome> {
        let adapter = self.session.require_adapter()?;
        Ok(self.seekbar.on_mouse_up(adapter.as_ref()))
    }

    /// Forward a click on the seek bar
    pub fn on_click(&mut self, page_x: f64) -> PlayerResult<GestureOutcome> {
        let adapter = self.session.require_adapter()?;
        Ok(self.seekbar.on_click(adapter.as_ref(), page_x))
    }

    /// Forward a touch-start on the seek bar
    pub fn on_touch_start(&mut self, client_x: f64) -> PlayerResult<GestureOutcome> {
        let adapter = self.session.require_adapter()?;
        Ok(self.seekbar.on_touch_start(adapter.as_ref(), client_x))
    }

    /// Forward a touch-move over the player
    pub fn on_touch_move(&mut self, client_x: f64, client_y: f64) -> PlayerResult<GestureOutcome> {
        let adapter = self.session.require_adapter()?;
        Ok(self
            .seekbar
            .on_touch_move(adapter.as_ref(), client_x, client_y))
    }

    /// Forward a touch-end over the player
    pub fn on_touch_end(&mut self) -> PlayerResult<GestureOutcome> {
        let adapter = self.session.require_adapter()?;
        Ok(self.seekbar.on_touch_end(adapter.as_ref()))
    }
}
