//! Single-slot event registry
//!
//! Holds at most one caller callback per [`AdapterEvent`]. Registering again
//! for the same event removes the previous listener from the engine before
//! the new one is added, so the engine never sees two caller listeners for
//! one neutral event.

use std::collections::HashMap;
use tracing::debug;
use vtplayer_core::AdapterEvent;

use crate::engine::{EventCallback, ListenerId, MediaEngine};
use crate::vocabulary::EngineFlavor;

#[derive(Debug, Clone, Copy)]
struct Slot {
    native: &'static str,
    listener: ListenerId,
}

/// Mapping from neutral event to its single active engine listener
#[derive(Debug)]
pub struct EventRegistry {
    flavor: EngineFlavor,
    slots: HashMap<AdapterEvent, Slot>,
    diagnostics: Vec<(&'static str, ListenerId)>,
}

impl EventRegistry {
    /// Create an empty registry for `flavor`
    pub fn new(flavor: EngineFlavor) -> Self {
        Self {
            flavor,
            slots: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Put `callback` in the slot for `event`, replacing any previous one.
    ///
    /// Returns the listener that was replaced.
    pub fn register(
        &mut self,
        engine: &dyn MediaEngine,
        event: AdapterEvent,
        callback: EventCallback,
    ) -> Option<ListenerId> {
        let native = self.flavor.native_event(event);

        let replaced = self.slots.remove(&event).map(|previous| {
            engine.remove_event_listener(previous.native, previous.listener);
            previous.listener
        });

        let listener = engine.add_event_listener(native, callback);
        self.slots.insert(event, Slot { native, listener });

        debug!(
            "Registered {} for {} ({}){}",
            listener,
            event.event_type(),
            native,
            replaced
                .map(|old| format!(", replacing {}", old))
                .unwrap_or_default()
        );
        replaced
    }

    /// Add an internal diagnostic listener that lives outside the slots
    pub fn register_diagnostic(
        &mut self,
        engine: &dyn MediaEngine,
        native: &'static str,
        callback: EventCallback,
    ) -> ListenerId {
        let listener = engine.add_event_listener(native, callback);
        self.diagnostics.push((native, listener));
        listener
    }

    /// Remove the caller listener for `event`, if any
    pub fn unregister(&mut self, engine: &dyn MediaEngine, event: AdapterEvent) -> bool {
        match self.slots.remove(&event) {
            Some(slot) => engine.remove_event_listener(slot.native, slot.listener),
            None => false,
        }
    }

    /// Remove every listener this registry added to the engine
    pub fn clear(&mut self, engine: &dyn MediaEngine) {
        for (_, slot) in self.slots.drain() {
            engine.remove_event_listener(slot.native, slot.listener);
        }
        for (native, listener) in self.diagnostics.drain(..) {
            engine.remove_event_listener(native, listener);
        }
    }

    /// Whether a caller listener is registered for `event`
    pub fn is_registered(&self, event: AdapterEvent) -> bool {
        self.slots.contains_key(&event)
    }

    /// Number of caller slots in use
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no caller slot is in use
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EngineScript, ScriptedEngine};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use vtplayer_core::EngineEvent;

    fn counter() -> (Arc<AtomicUsize>, EventCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = count.clone();
        let callback: EventCallback = Arc::new(move |_event: &EngineEvent| {
            handle.fetch_add(1, Ordering::SeqCst);
        });
        (count, callback)
    }

    #[test]
    fn test_resubscribe_replaces_callback() {
        let engine = ScriptedEngine::new(EngineScript::default());
        let mut registry = EventRegistry::new(EngineFlavor::DashJs);

        let (first, first_cb) = counter();
        let (second, second_cb) = counter();

        assert!(registry
            .register(&engine, AdapterEvent::CanPlay, first_cb)
            .is_none());
        assert!(registry
            .register(&engine, AdapterEvent::CanPlay, second_cb)
            .is_some());

        assert_eq!(engine.listener_count("canPlay"), 1);
        engine.emit(&EngineEvent::new("canPlay"));

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_removes_slots_and_diagnostics() {
        let engine = ScriptedEngine::new(EngineScript::default());
        let mut registry = EventRegistry::new(EngineFlavor::Shaka);

        let (_, cb) = counter();
        registry.register(&engine, AdapterEvent::TimeUpdated, cb.clone());
        registry.register(&engine, AdapterEvent::Error, cb.clone());
        registry.register_diagnostic(&engine, "error", cb);
        assert_eq!(engine.listener_count("error"), 2);

        registry.clear(&engine);
        assert_eq!(engine.total_listeners(), 0);
        assert!(registry.is_empty());
        assert!(!registry.is_registered(AdapterEvent::TimeUpdated));
    }

    #[test]
    fn test_unregister() {
        let engine = ScriptedEngine::new(EngineScript::default());
        let mut registry = EventRegistry::new(EngineFlavor::Shaka);

        let (_, cb) = counter();
        registry.register(&engine, AdapterEvent::Waiting, cb);

        assert!(registry.unregister(&engine, AdapterEvent::Waiting));
        assert!(!registry.unregister(&engine, AdapterEvent::Waiting));
        assert_eq!(engine.listener_count("waiting"), 0);
    }
}
