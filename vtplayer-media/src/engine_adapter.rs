//! Engine-backed playback adapter
//!
//! Wraps one [`MediaEngine`] player attached to one video element. Loads are
//! serialised: a newer load aborts any load still in flight, and a load that
//! is no longer the newest when it gets its turn is skipped, so the most
//! recently requested source is always the one left attached.

use async_trait::async_trait;
use futures::future::{AbortHandle, AbortRegistration, Abortable};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;
use vtplayer_core::{AdapterEvent, EngineEvent, PlayerError, PlayerResult, TrackDescriptor};

use crate::adapter::PlaybackAdapter;
use crate::engine::{BufferedMedia, EngineModule, EventCallback, MediaEngine, VideoElement};
use crate::registry::EventRegistry;
use crate::vocabulary::{AdapterType, DiagnosticLevel, EngineFlavor};

/// Inputs for constructing an [`EngineAdapter`]
pub struct AdapterOptions {
    /// Manifest URL; every identity change triggers a reload
    pub source: watch::Receiver<String>,
    /// Start position in seconds (defaults to 0)
    pub start_time: Option<f64>,
    /// Element the engine attaches to
    pub video: Arc<dyn VideoElement>,
    /// Whether to log low-level engine diagnostics
    pub log_engine_diagnostics: bool,
}

impl AdapterOptions {
    /// Options with diagnostics logging enabled
    pub fn new(
        source: watch::Receiver<String>,
        start_time: Option<f64>,
        video: Arc<dyn VideoElement>,
    ) -> Self {
        Self {
            source,
            start_time,
            video,
            log_engine_diagnostics: true,
        }
    }
}

struct AdapterInner {
    id: Uuid,
    flavor: EngineFlavor,
    engine: Arc<dyn MediaEngine>,
    video: Arc<dyn VideoElement>,
    registry: Mutex<EventRegistry>,
    load_lock: tokio::sync::Mutex<()>,
    generation: AtomicU64,
    pending_load: Mutex<Option<AbortHandle>>,
    loaded_source: Mutex<Option<String>>,
    destroyed: AtomicBool,
}

impl AdapterInner {
    /// Claim the next load generation and supersede the pending load.
    fn begin_load(&self) -> (u64, AbortRegistration) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.pending_load.lock().replace(handle) {
            previous.abort();
        }
        (generation, registration)
    }

    async fn run_load(
        &self,
        generation: u64,
        registration: AbortRegistration,
        source: &str,
        start_time: f64,
    ) -> PlayerResult<()> {
        let load = Abortable::new(
            self.load_serialized(generation, source, start_time),
            registration,
        );
        match load.await {
            Ok(result) => result,
            Err(_aborted) => {
                debug!(
                    "[{}] Load of {} superseded by a newer source",
                    self.id, source
                );
                Err(PlayerError::LoadInterrupted {
                    source_url: source.to_string(),
                })
            }
        }
    }

    async fn load_serialized(
        &self,
        generation: u64,
        source: &str,
        start_time: f64,
    ) -> PlayerResult<()> {
        let _turn = self.load_lock.lock().await;

        if self.destroyed.load(Ordering::SeqCst) {
            return Err(PlayerError::AdapterDestroyed);
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("[{}] Skipping stale load of {}", self.id, source);
            return Err(PlayerError::LoadInterrupted {
                source_url: source.to_string(),
            });
        }

        self.engine
            .load(source, start_time)
            .await
            .map_err(|e| PlayerError::SourceLoad {
                source_url: source.to_string(),
                reason: e.to_string(),
            })?;

        *self.loaded_source.lock() = Some(source.to_string());
        info!(
            "[{}] Loaded {} at {:.1}s ({})",
            self.id, source, start_time, self.flavor
        );
        Ok(())
    }

    fn register_diagnostics(&self) {
        let engine_name = self.flavor.name();
        let mut registry = self.registry.lock();
        for &(native, level) in self.flavor.diagnostic_events() {
            let callback: EventCallback = Arc::new(move |event: &EngineEvent| match level {
                DiagnosticLevel::Warn => {
                    warn!("{} {} event: {:?}", engine_name, native, event.payload)
                }
                DiagnosticLevel::Debug => {
                    debug!("{} {} event: {:?}", engine_name, native, event.payload)
                }
            });
            registry.register_diagnostic(self.engine.as_ref(), native, callback);
        }
    }

    /// Best-effort release; never fails.
    async fn teardown(&self) {
        let pending = self.pending_load.lock().take();
        if let Some(pending) = pending {
            pending.abort();
        }

        self.registry.lock().clear(self.engine.as_ref());

        if let Err(e) = self.engine.destroy().await {
            warn!("[{}] Engine teardown reported: {}", self.id, e);
        }
        info!("[{}] {} adapter destroyed", self.id, self.flavor);
    }
}

/// Playback adapter driving one engine player.
///
/// Call [`PlaybackAdapter::destroy`] before dropping. Dropping only stops
/// the source watcher; engine listeners and the engine itself stay in place.
pub struct EngineAdapter {
    inner: Arc<AdapterInner>,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for EngineAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineAdapter")
            .field("id", &self.inner.id)
            .field("flavor", &self.inner.flavor)
            .field("loaded_source", &*self.inner.loaded_source.lock())
            .field("destroyed", &self.inner.destroyed.load(Ordering::SeqCst))
            .finish()
    }
}

impl EngineAdapter {
    /// Load the engine, attach it to the video element and load the
    /// current source.
    ///
    /// Fails with [`PlayerError::EnvironmentUnsupported`] before any player
    /// is constructed or attached when the engine rejects the environment.
    pub async fn create(
        module: Arc<dyn EngineModule>,
        options: AdapterOptions,
    ) -> PlayerResult<Self> {
        let flavor = module.flavor();

        module.import().await.map_err(|e| PlayerError::EngineLoad {
            engine: flavor.name().to_string(),
            reason: e.to_string(),
        })?;
        module.install_polyfills();

        if !module.is_supported() {
            warn!("{} engine does not support this environment", flavor);
            return Err(PlayerError::EnvironmentUnsupported {
                engine: flavor.name().to_string(),
            });
        }

        let engine = module.create_player()?;
        engine
            .attach(options.video.clone())
            .await
            .map_err(|e| PlayerError::Attach {
                reason: e.to_string(),
            })?;

        let inner = Arc::new(AdapterInner {
            id: Uuid::new_v4(),
            flavor,
            engine,
            video: options.video,
            registry: Mutex::new(EventRegistry::new(flavor)),
            load_lock: tokio::sync::Mutex::new(()),
            generation: AtomicU64::new(0),
            pending_load: Mutex::new(None),
            loaded_source: Mutex::new(None),
            destroyed: AtomicBool::new(false),
        });
        info!("[{}] Created {} adapter", inner.id, flavor);

        if options.log_engine_diagnostics {
            inner.register_diagnostics();
        }

        let mut source = options.source;
        let start_time = options.start_time.unwrap_or(0.0);
        let initial = source.borrow_and_update().clone();

        let (generation, registration) = inner.begin_load();
        if let Err(e) = inner
            .run_load(generation, registration, &initial, start_time)
            .await
        {
            inner.destroyed.store(true, Ordering::SeqCst);
            inner.teardown().await;
            return Err(e);
        }

        let watcher = tokio::spawn(watch_source(
            Arc::downgrade(&inner),
            source,
            initial,
            start_time,
        ));

        Ok(Self {
            inner,
            watcher: Mutex::new(Some(watcher)),
        })
    }

    /// Engine backing this adapter
    pub fn flavor(&self) -> EngineFlavor {
        self.inner.flavor
    }

    /// Adapter instance ID used in logs
    pub fn id(&self) -> Uuid {
        self.inner.id
    }
}

/// Reload whenever the source changes identity.
async fn watch_source(
    inner: Weak<AdapterInner>,
    mut source: watch::Receiver<String>,
    mut current: String,
    start_time: f64,
) {
    while source.changed().await.is_ok() {
        let next = source.borrow_and_update().clone();
        if next == current {
            continue;
        }
        current = next.clone();

        let Some(inner) = inner.upgrade() else {
            break;
        };
        if inner.destroyed.load(Ordering::SeqCst) {
            break;
        }

        debug!("[{}] Source changed to {}", inner.id, next);
        let (generation, registration) = inner.begin_load();
        tokio::spawn(async move {
            match inner
                .run_load(generation, registration, &next, start_time)
                .await
            {
                Ok(()) | Err(PlayerError::LoadInterrupted { .. }) => {}
                Err(e) => warn!("[{}] Reload failed: {}", inner.id, e),
            }
        });
    }
    debug!("Source watcher stopped");
}

#[async_trait]
impl PlaybackAdapter for EngineAdapter {
    fn adapter_type(&self) -> AdapterType {
        self.inner.flavor.adapter_type()
    }

    async fn load(&self, source: &str, start_time: f64) -> PlayerResult<()> {
        if self.inner.destroyed.load(Ordering::SeqCst) {
            return Err(PlayerError::AdapterDestroyed);
        }
        let (generation, registration) = self.inner.begin_load();
        self.inner
            .run_load(generation, registration, source, start_time)
            .await
    }

    async fn destroy(&self) {
        if self.inner.destroyed.swap(true, Ordering::SeqCst) {
            debug!("[{}] Adapter already destroyed", self.inner.id);
            return;
        }

        let watcher = self.watcher.lock().take();
        if let Some(watcher) = watcher {
            watcher.abort();
        }

        self.inner.teardown().await;
    }

    fn is_destroyed(&self) -> bool {
        self.inner.destroyed.load(Ordering::SeqCst)
    }

    fn loaded_source(&self) -> Option<String> {
        self.inner.loaded_source.lock().clone()
    }

    fn play(&self) {
        self.inner.video.play();
    }

    fn pause(&self) {
        self.inner.video.pause();
    }

    fn current_time(&self) -> f64 {
        self.inner.video.current_time()
    }

    fn set_time(&self, seconds: f64) {
        self.inner.video.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.inner.video.duration()
    }

    fn volume(&self) -> f64 {
        self.inner.video.volume()
    }

    fn set_volume(&self, volume: f64) {
        self.inner.video.set_volume(volume.clamp(0.0, 1.0));
    }

    fn playback_rate(&self) -> f64 {
        self.inner.engine.playback_rate()
    }

    fn set_playback_rate(&self, rate: f64) {
        if !rate.is_finite() || rate <= 0.0 {
            warn!("[{}] Ignoring invalid playback rate {}", self.inner.id, rate);
            return;
        }
        self.inner.video.set_playback_rate(rate);
    }

    fn video_quality_list(&self) -> Vec<TrackDescriptor> {
        self.inner
            .engine
            .variant_tracks()
            .iter()
            .filter(|track| track.height.is_some())
            .map(TrackDescriptor::video_quality)
            .collect()
    }

    fn audio_quality_list(&self) -> Vec<TrackDescriptor> {
        self.inner
            .engine
            .variant_tracks()
            .iter()
            .map(TrackDescriptor::audio_quality)
            .collect()
    }

    fn video_track_list(&self) -> Vec<TrackDescriptor> {
        self.inner
            .engine
            .image_tracks()
            .iter()
            .map(TrackDescriptor::image_track)
            .collect()
    }

    fn audio_track_list(&self) -> Vec<TrackDescriptor> {
        let mut seen = HashSet::new();
        self.inner
            .engine
            .variant_tracks()
            .iter()
            .map(TrackDescriptor::audio_track)
            .filter(|descriptor| seen.insert(descriptor.label.clone()))
            .collect()
    }

    fn buffer_level(&self) -> f64 {
        let engine = &self.inner.engine;
        engine
            .buffer_level(BufferedMedia::Video)
            .or_else(|| engine.buffer_level(BufferedMedia::Audio))
            .filter(|level| level.is_finite() && *level >= 0.0)
            .unwrap_or(0.0)
    }

    fn on(&self, event: AdapterEvent, callback: EventCallback) {
        if self.is_destroyed() {
            warn!(
                "[{}] Ignoring {} subscription on destroyed adapter",
                self.inner.id,
                event.event_type()
            );
            return;
        }
        self.inner
            .registry
            .lock()
            .register(self.inner.engine.as_ref(), event, callback);
    }

    fn off(&self, event: AdapterEvent) -> bool {
        self.inner
            .registry
            .lock()
            .unregister(self.inner.engine.as_ref(), event)
    }
}

impl Drop for EngineAdapter {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.get_mut().take() {
            watcher.abort();
        }
        if !self.inner.destroyed.load(Ordering::SeqCst) {
            warn!(
                "[{}] {} adapter dropped without destroy(); engine stays attached",
                self.inner.id, self.inner.flavor
            );
        }
    }
}
