use std::time::Duration;

use dyn_partial_eq::*;

use crate::profile::{Blob, Cursor, Object};

/// Callback interface for TUIO frame events, pushed by the [`crate::dispatcher::Dispatcher`]
/// in the fixed order: every add, then every update, then every remove, then exactly one
/// [`Listener::refresh`] marking the end of the frame. All methods default to a no-op so a
/// listener only needs to implement the events it cares about.
#[dyn_partial_eq]
pub trait Listener {
    /// Notifies a new [Cursor]
    fn add_cursor(&mut self, _cursor: &Cursor) {}
    /// Notifies a [Cursor] update
    fn update_cursor(&mut self, _cursor: &Cursor) {}
    /// Notifies a [Cursor] removal
    fn remove_cursor(&mut self, _cursor: &Cursor) {}

    /// Notifies a new [Object]
    fn add_object(&mut self, _object: &Object) {}
    /// Notifies a [Object] update
    fn update_object(&mut self, _object: &Object) {}
    /// Notifies a [Object] removal
    fn remove_object(&mut self, _object: &Object) {}

    /// Notifies a new [Blob]
    fn add_blob(&mut self, _blob: &Blob) {}
    /// Notifies a [Blob] update
    fn update_blob(&mut self, _blob: &Blob) {}
    /// Notifies a [Blob] removal
    fn remove_blob(&mut self, _blob: &Blob) {}

    /// Marks the end of a received TUIO bundle, carrying the time the source attached to it.
    fn refresh(&mut self, _frame_time: Duration) {}
}
