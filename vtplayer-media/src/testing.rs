//! Scripted in-memory engine for tests and demos.
//!
//! `ScriptedEngine` records every call the adapter layer makes, dispatches
//! events synchronously to its listeners, and can hold `load` calls open
//! until the test releases them, which makes completion order controllable.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use vtplayer_core::{EngineEvent, PlayerError, PlayerResult, VariantTrack};

use crate::engine::{
    BufferedMedia, EngineModule, EventCallback, ListenerId, MediaEngine, VideoElement,
};
use crate::vocabulary::EngineFlavor;

#[derive(Debug, Clone, Copy)]
struct ElementState {
    current_time: f64,
    duration: f64,
    volume: f64,
    playback_rate: f64,
    paused: bool,
}

/// Video element double with plain stored properties
#[derive(Debug)]
pub struct ScriptedVideoElement {
    state: Mutex<ElementState>,
    seeks: Mutex<Vec<f64>>,
}

impl ScriptedVideoElement {
    /// Create an element whose media lasts `duration` seconds
    pub fn new(duration: f64) -> Self {
        Self {
            state: Mutex::new(ElementState {
                current_time: 0.0,
                duration,
                volume: 1.0,
                playback_rate: 1.0,
                paused: true,
            }),
            seeks: Mutex::new(Vec::new()),
        }
    }

    /// Change the reported duration
    pub fn set_duration(&self, duration: f64) {
        self.state.lock().duration = duration;
    }

    /// Whether playback is paused
    pub fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    /// Every time written through `set_current_time`, in order
    pub fn seeks(&self) -> Vec<f64> {
        self.seeks.lock().clone()
    }
}

impl VideoElement for ScriptedVideoElement {
    fn current_time(&self) -> f64 {
        self.state.lock().current_time
    }

    fn set_current_time(&self, seconds: f64) {
        self.state.lock().current_time = seconds;
        self.seeks.lock().push(seconds);
    }

    fn duration(&self) -> f64 {
        self.state.lock().duration
    }

    fn volume(&self) -> f64 {
        self.state.lock().volume
    }

    fn set_volume(&self, volume: f64) {
        self.state.lock().volume = volume;
    }

    fn playback_rate(&self) -> f64 {
        self.state.lock().playback_rate
    }

    fn set_playback_rate(&self, rate: f64) {
        self.state.lock().playback_rate = rate;
    }

    fn play(&self) {
        self.state.lock().paused = false;
    }

    fn pause(&self) {
        self.state.lock().paused = true;
    }
}

/// Tracks and metrics every engine created by a module starts with
#[derive(Debug, Clone, Default)]
pub struct EngineScript {
    /// Variant tracks reported after creation
    pub variant_tracks: Vec<VariantTrack>,
    /// Image tracks reported after creation
    pub image_tracks: Vec<VariantTrack>,
    /// Video buffer level; `None` means no metrics API
    pub video_buffer: Option<f64>,
    /// Audio buffer level; `None` means no metrics API
    pub audio_buffer: Option<f64>,
    /// Sources whose load fails
    pub failing_sources: Vec<String>,
}

/// Engine double recording the calls made against it
pub struct ScriptedEngine {
    script: Mutex<EngineScript>,
    listeners: Mutex<HashMap<String, Vec<(ListenerId, EventCallback)>>>,
    next_listener: AtomicU64,
    element: Mutex<Option<Arc<dyn VideoElement>>>,
    attach_count: AtomicUsize,
    destroy_count: AtomicUsize,
    fail_destroy: AtomicBool,
    load_calls: Mutex<Vec<String>>,
    loaded: Mutex<Option<String>>,
    load_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl std::fmt::Debug for ScriptedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedEngine")
            .field("attach_count", &self.attach_count.load(Ordering::SeqCst))
            .field("destroy_count", &self.destroy_count.load(Ordering::SeqCst))
            .field("loaded", &*self.loaded.lock())
            .finish()
    }
}

impl ScriptedEngine {
    /// Create an engine following `script`
    pub fn new(script: EngineScript) -> Self {
        Self {
            script: Mutex::new(script),
            listeners: Mutex::new(HashMap::new()),
            next_listener: AtomicU64::new(1),
            element: Mutex::new(None),
            attach_count: AtomicUsize::new(0),
            destroy_count: AtomicUsize::new(0),
            fail_destroy: AtomicBool::new(false),
            load_calls: Mutex::new(Vec::new()),
            loaded: Mutex::new(None),
            load_gate: Mutex::new(None),
        }
    }

    /// Dispatch `event` to every listener registered for its name
    pub fn emit(&self, event: &EngineEvent) -> usize {
        let callbacks: Vec<EventCallback> = self
            .listeners
            .lock()
            .get(&event.name)
            .map(|entries| entries.iter().map(|(_, cb)| cb.clone()).collect())
            .unwrap_or_default();

        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }

    /// Listeners registered for `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.lock().get(event).map_or(0, Vec::len)
    }

    /// Listeners registered across all events
    pub fn total_listeners(&self) -> usize {
        self.listeners.lock().values().map(Vec::len).sum()
    }

    /// Make subsequent loads wait until released with `release_load`
    pub fn hold_loads(&self) {
        *self.load_gate.lock() = Some(Arc::new(Semaphore::new(0)));
    }

    /// Let one held load complete
    pub fn release_load(&self) {
        if let Some(gate) = self.load_gate.lock().as_ref() {
            gate.add_permits(1);
        }
    }

    /// Make loads of `source` fail
    pub fn fail_source(&self, source: &str) {
        self.script.lock().failing_sources.push(source.to_string());
    }

    /// Make `destroy` return an error
    pub fn fail_destroy(&self) {
        self.fail_destroy.store(true, Ordering::SeqCst);
    }

    /// Replace the reported variant tracks
    pub fn set_variant_tracks(&self, tracks: Vec<VariantTrack>) {
        self.script.lock().variant_tracks = tracks;
    }

    /// Replace the reported buffer levels
    pub fn set_buffer_levels(&self, video: Option<f64>, audio: Option<f64>) {
        let mut script = self.script.lock();
        script.video_buffer = video;
        script.audio_buffer = audio;
    }

    /// Number of `attach` calls
    pub fn attach_count(&self) -> usize {
        self.attach_count.load(Ordering::SeqCst)
    }

    /// Number of `destroy` calls
    pub fn destroy_count(&self) -> usize {
        self.destroy_count.load(Ordering::SeqCst)
    }

    /// Sources passed to `load`, in call order
    pub fn load_calls(&self) -> Vec<String> {
        self.load_calls.lock().clone()
    }

    /// Source of the last load that completed
    pub fn loaded_source(&self) -> Option<String> {
        self.loaded.lock().clone()
    }
}

#[async_trait]
impl MediaEngine for ScriptedEngine {
    async fn attach(&self, element: Arc<dyn VideoElement>) -> PlayerResult<()> {
        self.attach_count.fetch_add(1, Ordering::SeqCst);
        *self.element.lock() = Some(element);
        Ok(())
    }

    async fn load(&self, source: &str, _start_time: f64) -> PlayerResult<()> {
        self.load_calls.lock().push(source.to_string());

        let gate = self.load_gate.lock().clone();
        if let Some(gate) = gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| PlayerError::engine(e.to_string()))?;
            permit.forget();
        }

        let failing = self.script.lock().failing_sources.iter().any(|s| s == source);
        if failing {
            return Err(PlayerError::engine(format!("manifest fetch failed: {}", source)));
        }

        *self.loaded.lock() = Some(source.to_string());
        Ok(())
    }

    async fn destroy(&self) -> PlayerResult<()> {
        self.destroy_count.fetch_add(1, Ordering::SeqCst);
        self.element.lock().take();
        if self.fail_destroy.load(Ordering::SeqCst) {
            return Err(PlayerError::engine("player already detached"));
        }
        Ok(())
    }

    fn variant_tracks(&self) -> Vec<VariantTrack> {
        self.script.lock().variant_tracks.clone()
    }

    fn image_tracks(&self) -> Vec<VariantTrack> {
        self.script.lock().image_tracks.clone()
    }

    fn playback_rate(&self) -> f64 {
        self.element
            .lock()
            .as_ref()
            .map_or(1.0, |element| element.playback_rate())
    }

    fn buffer_level(&self, media: BufferedMedia) -> Option<f64> {
        let script = self.script.lock();
        match media {
            BufferedMedia::Video => script.video_buffer,
            BufferedMedia::Audio => script.audio_buffer,
        }
    }

    fn add_event_listener(&self, event: &str, callback: EventCallback) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::SeqCst));
        self.listeners
            .lock()
            .entry(event.to_string())
            .or_default()
            .push((id, callback));
        id
    }

    fn remove_event_listener(&self, event: &str, listener: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        match listeners.get_mut(event) {
            Some(entries) => {
                let before = entries.len();
                entries.retain(|(id, _)| *id != listener);
                before != entries.len()
            }
            None => false,
        }
    }
}

/// Engine module double producing [`ScriptedEngine`]s
#[derive(Debug)]
pub struct ScriptedEngineModule {
    flavor: EngineFlavor,
    supported: bool,
    script: EngineScript,
    import_count: AtomicUsize,
    polyfills_installed: AtomicBool,
    engines: Mutex<Vec<Arc<ScriptedEngine>>>,
}

impl ScriptedEngineModule {
    /// Create a supported module for `flavor`
    pub fn new(flavor: EngineFlavor) -> Self {
        Self {
            flavor,
            supported: true,
            script: EngineScript::default(),
            import_count: AtomicUsize::new(0),
            polyfills_installed: AtomicBool::new(false),
            engines: Mutex::new(Vec::new()),
        }
    }

    /// Module whose support check fails
    pub fn unsupported(flavor: EngineFlavor) -> Self {
        Self {
            supported: false,
            ..Self::new(flavor)
        }
    }

    /// Use `script` for every engine created from now on
    pub fn with_script(mut self, script: EngineScript) -> Self {
        self.script = script;
        self
    }

    /// Number of `import` calls
    pub fn import_count(&self) -> usize {
        self.import_count.load(Ordering::SeqCst)
    }

    /// Whether polyfills were installed
    pub fn polyfills_installed(&self) -> bool {
        self.polyfills_installed.load(Ordering::SeqCst)
    }

    /// Engines created so far
    pub fn engines(&self) -> Vec<Arc<ScriptedEngine>> {
        self.engines.lock().clone()
    }

    /// Most recently created engine
    pub fn last_engine(&self) -> Option<Arc<ScriptedEngine>> {
        self.engines.lock().last().cloned()
    }
}

#[async_trait]
impl EngineModule for ScriptedEngineModule {
    fn flavor(&self) -> EngineFlavor {
        self.flavor
    }

    async fn import(&self) -> PlayerResult<()> {
        self.import_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn install_polyfills(&self) {
        self.polyfills_installed.store(true, Ordering::SeqCst);
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create_player(&self) -> PlayerResult<Arc<dyn MediaEngine>> {
        let engine = Arc::new(ScriptedEngine::new(self.script.clone()));
        self.engines.lock().push(engine.clone());
        Ok(engine)
    }
}
