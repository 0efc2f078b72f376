//! # Single-Use Events
//!
//! Controllers report UI work ("show this list", "hide the spinner") as
//! [`Event`]s. An event may be looked at by several observers, but only the
//! first call to [`Event::consume`] gets the payload, so an instruction is
//! acted upon at most once.
//!
//! Events travel from a controller task to its observer over an unbounded
//! channel ([`event_channel`]) so that emitting never waits on the observer.

use std::cell::Cell;
use std::fmt;
use tokio::sync::mpsc;
use tracing::trace;

/// A payload paired with a handled flag.
///
/// `Event` is neither `Clone` nor `Sync`: it is moved to the observer that
/// owns UI state and read there. Observers that need to share it wrap it in
/// an `Rc`.
pub struct Event<T> {
    content: T,
    handled: Cell<bool>,
}

impl<T> Event<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            handled: Cell::new(false),
        }
    }

    /// Returns the payload the first time it is called, `None` afterwards.
    pub fn consume(&self) -> Option<&T> {
        if self.handled.replace(true) {
            None
        } else {
            Some(&self.content)
        }
    }

    /// Returns the payload without marking the event handled.
    pub fn peek_content(&self) -> &T {
        &self.content
    }

    pub fn has_been_handled(&self) -> bool {
        self.handled.get()
    }
}

impl<T: fmt::Debug> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("content", &self.content)
            .field("handled", &self.handled.get())
            .finish()
    }
}

/// Receiving half of an event stream, held by the UI observer.
pub type EventReceiver<T> = mpsc::UnboundedReceiver<Event<T>>;

/// Sending half of an event stream, held by a controller.
#[derive(Debug)]
pub struct EventEmitter<T> {
    sender: mpsc::UnboundedSender<Event<T>>,
}

impl<T: fmt::Debug> EventEmitter<T> {
    /// Wraps `payload` in a fresh [`Event`] and hands it to the observer.
    ///
    /// An observer that has gone away is not an error: the screen is being
    /// torn down and the event is dropped.
    pub fn emit(&self, payload: T) {
        trace!(?payload, "Emit");
        if self.sender.send(Event::new(payload)).is_err() {
            trace!("Observer gone, event dropped");
        }
    }
}

impl<T> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Creates a connected emitter / receiver pair.
pub fn event_channel<T>() -> (EventEmitter<T>, EventReceiver<T>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (EventEmitter { sender }, receiver)
}
