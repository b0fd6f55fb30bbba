use std::sync::Arc;

use tokio::sync::watch;

use super::cell::Shared;

/// Read-only projection of a [`StateCell`](super::StateCell).
///
/// Forwards reads and change notifications; there is no way to write
/// through it.
pub struct ReadOnly<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for ReadOnly<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> ReadOnly<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        Self { shared }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.shared.tx.borrow().clone()
    }

    /// Borrow the current value without cloning it.
    ///
    /// Keep `f` short: writers wait while it runs.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.tx.borrow())
    }

    /// A fresh watch receiver. The current value counts as already seen.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.shared.tx.subscribe()
    }

    /// Wait for the next write and return the value it published.
    pub async fn changed(&self) -> T {
        let mut rx = self.shared.tx.subscribe();
        // The sender lives in `self.shared`, so it cannot close while we wait.
        let _ = rx.changed().await;
        let value = rx.borrow_and_update().clone();
        value
    }

    /// Wait until the value satisfies `predicate`, returning immediately if
    /// it already does.
    pub async fn wait_for(&self, mut predicate: impl FnMut(&T) -> bool) -> T {
        let mut rx = self.shared.tx.subscribe();
        loop {
            {
                let current = rx.borrow_and_update();
                if predicate(&current) {
                    return current.clone();
                }
            }
            let _ = rx.changed().await;
        }
    }

    /// Call `callback` with the new value after every write.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.shared.add_listener(Arc::new(callback));
        let weak = Arc::downgrade(&self.shared);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.remove_listener(id);
                }
            })),
        }
    }
}

impl<T> std::fmt::Debug for ReadOnly<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ReadOnly")
            .field(&*self.shared.tx.borrow())
            .finish()
    }
}

/// Guard for a callback registered with [`ReadOnly::subscribe`].
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Remove the callback now. Equivalent to dropping the guard.
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
