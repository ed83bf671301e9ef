use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use crate::listener::Listener;
use crate::profile::Entity;
use crate::reconciler::Frame;

/// Broadcasts the add/update/remove/refresh events of one reconciled [`Frame`] to every
/// registered [`Listener`], in the fixed order required by the TUIO model: all adds, then all
/// updates, then all removes, then exactly one `refresh`.
pub struct Dispatcher {
    listeners: Vec<Box<dyn Listener>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher {
            listeners: Vec::new(),
        }
    }

    /// Adds the provided listener to the list of registered TUIO event listeners.
    pub fn add_listener<L: Listener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    /// Removes the provided listener from the list of registered TUIO event listeners.
    pub fn remove_listener<L: Listener + 'static>(&mut self, listener: L) {
        let listener: Box<dyn Listener> = Box::new(listener);
        self.listeners.retain(|existing| existing != &listener);
    }

    /// Removes all listeners.
    pub fn remove_all_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Dispatches one reconciled frame. A listener panicking during any callback is caught and
    /// logged via `tracing` rather than aborting the dispatch of the remaining listeners or
    /// events.
    pub fn dispatch(&mut self, frame: Frame) {
        for listener in self.listeners.iter_mut() {
            for entity in &frame.added {
                call(listener.as_mut(), entity, Call::Add);
            }
            for entity in &frame.updated {
                call(listener.as_mut(), entity, Call::Update);
            }
            for entity in &frame.removed {
                call(listener.as_mut(), entity, Call::Remove);
            }
            invoke("refresh", || listener.refresh(frame.frame_time));
        }
    }
}

enum Call {
    Add,
    Update,
    Remove,
}

fn call(listener: &mut dyn Listener, entity: &Entity, kind: Call) {
    match (entity, kind) {
        (Entity::Cursor(c), Call::Add) => invoke("add_cursor", || listener.add_cursor(c)),
        (Entity::Cursor(c), Call::Update) => invoke("update_cursor", || listener.update_cursor(c)),
        (Entity::Cursor(c), Call::Remove) => invoke("remove_cursor", || listener.remove_cursor(c)),
        (Entity::Object(o), Call::Add) => invoke("add_object", || listener.add_object(o)),
        (Entity::Object(o), Call::Update) => invoke("update_object", || listener.update_object(o)),
        (Entity::Object(o), Call::Remove) => invoke("remove_object", || listener.remove_object(o)),
        (Entity::Blob(b), Call::Add) => invoke("add_blob", || listener.add_blob(b)),
        (Entity::Blob(b), Call::Update) => invoke("update_blob", || listener.update_blob(b)),
        (Entity::Blob(b), Call::Remove) => invoke("remove_blob", || listener.remove_blob(b)),
    }
}

/// Runs one listener callback, containing a panic so it can't take down the rest of the
/// dispatch. We can't name the concrete listener in the error, only the callback that failed.
fn invoke<F: FnOnce()>(name: &str, f: F) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(f)) {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "listener panicked with a non-string payload".to_string());
        tracing::error!(callback = name, %message, "listener panicked during dispatch");
    }
}
