//! Synchronous change notifications
//!
//! The [`EventChannel`] is a small observer bus: listeners are called in
//! registration order on the publishing thread, nothing is queued, and a
//! listener registered after an event was published never sees it.
//!
//! Listeners are reference-counted closures so the same handle can later be
//! passed to [`EventChannel::unsubscribe`]:
//!
//! ```
//! use favr::events::{ChangeEvent, EventChannel, listener};
//!
//! let channel = EventChannel::new();
//! let print = listener(|event: &ChangeEvent| {
//!     println!("{event}");
//!     Ok(())
//! });
//!
//! channel.subscribe(print.clone());
//! assert_eq!(channel.listener_count(), 1);
//! channel.unsubscribe(&print);
//! assert_eq!(channel.listener_count(), 0);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use tracing::{error, trace};

pub mod types;

pub use types::{ChangeEvent, ChangeKind};

/// Error type listeners may return; it is logged and otherwise ignored
pub type ListenerError = Box<dyn std::error::Error>;

/// Result returned by a listener
pub type ListenerResult = Result<(), ListenerError>;

/// Shared handle to a change listener
pub type Listener = Rc<dyn Fn(&ChangeEvent) -> ListenerResult>;

/// Wrap a closure into a [`Listener`] handle
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&ChangeEvent) -> ListenerResult + 'static,
{
    Rc::new(f)
}

fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Publish/subscribe bus for [`ChangeEvent`]s
///
/// Clones share the same listener list.
#[derive(Clone, Default)]
pub struct EventChannel {
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl EventChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    ///
    /// Registering the same handle twice is not deduplicated: it will then be
    /// called twice per event.
    pub fn subscribe(&self, listener: Listener) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Remove every registration of `listener`; no-op if it is not registered
    pub fn unsubscribe(&self, listener: &Listener) {
        self.listeners
            .borrow_mut()
            .retain(|registered| !same_listener(registered, listener));
    }

    /// Deliver `event` to every listener in registration order
    ///
    /// A listener that returns an error or panics is logged and skipped; the
    /// remaining listeners still receive the event. Listeners may subscribe or
    /// unsubscribe while being called; such changes apply from the next event.
    pub fn publish(&self, event: &ChangeEvent) {
        let snapshot: Vec<Listener> = self.listeners.borrow().clone();
        trace!(kind = %event.kind, listeners = snapshot.len(), "publishing change event");

        for (index, listener) in snapshot.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    error!(kind = %event.kind, listener = index, error = %err, "favorites listener failed");
                }
                Err(payload) => {
                    error!(
                        kind = %event.kind,
                        listener = index,
                        panic = %panic_message(payload.as_ref()),
                        "favorites listener panicked"
                    );
                }
            }
        }
    }

    /// Number of registrations (duplicates counted)
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
