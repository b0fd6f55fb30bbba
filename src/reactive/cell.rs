use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use super::projection::ReadOnly;

pub(crate) type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

pub(crate) struct Listener<T> {
    pub(crate) id: u64,
    pub(crate) callback: Callback<T>,
}

/// State shared between a cell and its projections.
pub(crate) struct Shared<T> {
    pub(crate) tx: watch::Sender<T>,
    pub(crate) listeners: Mutex<Vec<Listener<T>>>,
    next_id: AtomicU64,
}

impl<T> Shared<T> {
    pub(crate) fn add_listener(&self, callback: Callback<T>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push(Listener { id, callback });
        id
    }

    pub(crate) fn remove_listener(&self, id: u64) {
        self.listeners.lock().retain(|l| l.id != id);
    }

    /// Copy the callback list so callbacks run without the lock held.
    fn snapshot_listeners(&self) -> Vec<Callback<T>> {
        self.listeners
            .lock()
            .iter()
            .map(|l| Arc::clone(&l.callback))
            .collect()
    }

    fn notify(&self, value: &T) {
        for callback in self.snapshot_listeners() {
            callback(value);
        }
    }
}

/// Writable, observable state cell.
///
/// The cell is deliberately not `Clone`: whoever owns it is the only writer.
/// Hand out [`ReadOnly`] projections to everyone else.
pub struct StateCell<T> {
    shared: Arc<Shared<T>>,
}

impl<T> StateCell<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self {
            shared: Arc::new(Shared {
                tx,
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.shared.tx.borrow().clone()
    }

    /// Replace the value and publish it.
    ///
    /// The new value is visible to readers before any callback runs.
    pub fn set(&self, value: T) {
        let listeners = self.shared.snapshot_listeners();
        if listeners.is_empty() {
            self.shared.tx.send_replace(value);
            return;
        }
        self.shared.tx.send_replace(value.clone());
        for callback in listeners {
            callback(&value);
        }
    }

    /// Mutate the value in place and publish the result.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.shared.tx.send_modify(f);
        let value = self.get();
        self.shared.notify(&value);
    }

    /// Create a read-only projection of this cell.
    pub fn read_only(&self) -> ReadOnly<T> {
        ReadOnly::new(Arc::clone(&self.shared))
    }
}

impl<T> StateCell<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Compute a new value from the current one and publish it only if it
    /// differs. Returns whether anything was published.
    ///
    /// The read-compute-write runs under the channel's write lock, so two
    /// concurrent callers never compute from the same old value.
    pub fn replace_with(&self, f: impl FnOnce(T) -> T) -> bool {
        let modified = self.shared.tx.send_if_modified(|current| {
            let next = f(current.clone());
            if next == *current {
                false
            } else {
                *current = next;
                true
            }
        });
        if modified {
            let value = self.get();
            self.shared.notify(&value);
        }
        modified
    }
}

impl<T> std::fmt::Debug for StateCell<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &*self.shared.tx.borrow())
            .finish()
    }
}
