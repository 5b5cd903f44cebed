//! Playback session management
//!
//! A session binds one source to one video element and owns at most one
//! adapter at a time. Attaching a new adapter always destroys the previous
//! one first, so the element never has two engines attached.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;
use vtplayer_core::{PlayerError, PlayerResult};

use crate::adapter::PlaybackAdapter;
use crate::engine::{EngineModule, VideoElement};
use crate::engine_adapter::{AdapterOptions, EngineAdapter};

/// Active binding between a source and a video element
pub struct PlaybackSession {
    id: Uuid,
    source: watch::Sender<String>,
    start_time: Option<f64>,
    video: Arc<dyn VideoElement>,
    adapter: Option<Arc<dyn PlaybackAdapter>>,
    log_engine_diagnostics: bool,
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("id", &self.id)
            .field("source", &*self.source.borrow())
            .field("start_time", &self.start_time)
            .field("attached", &self.adapter.is_some())
            .finish()
    }
}

impl PlaybackSession {
    /// Create a session without an adapter
    pub fn new(
        video: Arc<dyn VideoElement>,
        source: impl Into<String>,
        start_time: Option<f64>,
    ) -> Self {
        let (source, _) = watch::channel(source.into());
        Self {
            id: Uuid::new_v4(),
            source,
            start_time,
            video,
            adapter: None,
            log_engine_diagnostics: true,
        }
    }

    /// Enable or disable engine diagnostic logging for future adapters
    pub fn with_engine_diagnostics(mut self, enabled: bool) -> Self {
        self.log_engine_diagnostics = enabled;
        self
    }

    /// Session ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current source
    pub fn source(&self) -> String {
        self.source.borrow().clone()
    }

    /// Start position used for loads
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    /// Change the source. Returns `false` when `source` equals the current
    /// one, in which case no reload happens.
    pub fn set_source(&self, source: impl Into<String>) -> bool {
        let source = source.into();
        let changed = self.source.send_if_modified(|current| {
            if *current == source {
                false
            } else {
                *current = source.clone();
                true
            }
        });

        if changed {
            debug!("[{}] Source set to {}", self.id, source);
        }
        changed
    }

    /// Attach an adapter backed by `module`, destroying the current one first
    pub async fn attach(&mut self, module: Arc<dyn EngineModule>) -> PlayerResult<()> {
        self.detach().await;

        let options = AdapterOptions {
            source: self.source.subscribe(),
            start_time: self.start_time,
            video: self.video.clone(),
            log_engine_diagnostics: self.log_engine_diagnostics,
        };
        let adapter = EngineAdapter::create(module, options).await?;

        info!(
            "[{}] Attached {} adapter",
            self.id,
            adapter.adapter_type().as_str()
        );
        self.adapter = Some(Arc::new(adapter));
        Ok(())
    }

    /// Destroy the current adapter, if any
    pub async fn detach(&mut self) {
        if let Some(adapter) = self.adapter.take() {
            adapter.destroy().await;
            info!("[{}] Detached adapter", self.id);
        }
    }

    /// Current adapter
    pub fn adapter(&self) -> Option<&Arc<dyn PlaybackAdapter>> {
        self.adapter.as_ref()
    }

    /// Current adapter, or `NoActiveAdapter`
    pub fn require_adapter(&self) -> PlayerResult<&Arc<dyn PlaybackAdapter>> {
        self.adapter.as_ref().ok_or(PlayerError::NoActiveAdapter)
    }

    /// Whether an adapter is attached
    pub fn is_attached(&self) -> bool {
        self.adapter.is_some()
    }

    /// Video element this session drives
    pub fn video(&self) -> &Arc<dyn VideoElement> {
        &self.video
    }
}
