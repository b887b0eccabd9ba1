//! State cells
//!
//! The dispatch table never owns state. It holds a handle to a cell that
//! provides two capabilities: read the current value, and replace it with a
//! value computed from the previous one. Handles are cheap clones sharing the
//! same slot.
//!
//! - [`LocalCell`]: single-threaded, `Rc<RefCell<_>>` backed
//! - [`WatchCell`]: backed by a `tokio::sync::watch` channel, so observers can
//!   react to every replacement

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

/// A shared, replace-only container for a state value
pub trait StateCell<S: Clone>: Clone + 'static {
    /// Create a cell seeded with `initial`
    fn new(initial: S) -> Self
    where
        Self: Sized;

    /// Clone out the current value
    fn get(&self) -> S;

    /// Replace the value with one computed from the previous value.
    ///
    /// If `f` fails the value is left untouched and the error is returned.
    fn try_update<E, F>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(&S) -> Result<S, E>;

    /// Number of replacements applied since the cell was created
    fn version(&self) -> u64;

    /// Replace the value with one computed from the previous value
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&S) -> S,
    {
        if let Err(never) = self.try_update::<Infallible, _>(|prev| Ok(f(prev))) {
            match never {}
        }
    }
}

struct Slot<S> {
    value: S,
    version: u64,
}

/// Single-threaded state cell.
///
/// Updates are applied synchronously, so the next [`get`](StateCell::get)
/// observes them. An update closure may read the cell, but updating the same
/// cell from inside one panics (the slot is borrowed for the duration of the
/// closure).
pub struct LocalCell<S> {
    slot: Rc<RefCell<Slot<S>>>,
}

impl<S> Clone for LocalCell<S> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<S> LocalCell<S> {
    /// Returns true if both handles point at the same slot
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }

    /// Borrow the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.slot.borrow().value)
    }
}

impl<S: Clone + 'static> StateCell<S> for LocalCell<S> {
    fn new(initial: S) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                value: initial,
                version: 0,
            })),
        }
    }

    fn get(&self) -> S {
        self.slot.borrow().value.clone()
    }

    fn try_update<E, F>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(&S) -> Result<S, E>,
    {
        // Compute under a shared borrow, write once it is released
        let next = f(&self.slot.borrow().value)?;
        let mut slot = self.slot.borrow_mut();
        slot.value = next;
        slot.version += 1;
        Ok(())
    }

    fn version(&self) -> u64 {
        self.slot.borrow().version
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for LocalCell<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("LocalCell")
            .field("value", &slot.value)
            .field("version", &slot.version)
            .finish()
    }
}

/// State cell that notifies subscribers of every replacement.
///
/// Subscribers get a [`watch::Receiver`]; `has_changed()` flips after each
/// successful update, which is the signal to re-render. No runtime is needed
/// to update or read the cell.
///
/// The next value is computed from a snapshot with no lock held, so an update
/// closure may read (or even update) the cell. Two updates racing from
/// different threads are not serialized: the last replacement wins.
pub struct WatchCell<S> {
    tx: Arc<watch::Sender<S>>,
    version: Arc<AtomicU64>,
}

impl<S> Clone for WatchCell<S> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
            version: Arc::clone(&self.version),
        }
    }
}

impl<S> WatchCell<S> {
    /// Subscribe to replacements; the current value counts as seen
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<S: Clone + 'static> StateCell<S> for WatchCell<S> {
    fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx: Arc::new(tx),
            version: Arc::new(AtomicU64::new(0)),
        }
    }

    fn get(&self) -> S {
        self.tx.borrow().clone()
    }

    fn try_update<E, F>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(&S) -> Result<S, E>,
    {
        // The channel lock must not be held while `f` runs: handlers may read
        // the cell they are updating
        let prev = self.get();
        let next = f(&prev)?;
        self.tx.send_replace(next);
        self.version.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}
