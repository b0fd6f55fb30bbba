//! Shared test utilities: controllable producers and transition recorders.

#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_state::{AsyncState, Subscription};
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use tokio::sync::Notify;

/// Producer whose n-th call waits for `gates[n]` and then yields `results[n]`.
///
/// Also counts calls so tests can assert how often the producer ran.
pub struct Scripted<T> {
    pub gates: Vec<Arc<Notify>>,
    results: Arc<Vec<Result<T, String>>>,
    calls: Arc<AtomicUsize>,
}

impl<T> Scripted<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(results: Vec<Result<T, String>>) -> Self {
        let gates = results.iter().map(|_| Arc::new(Notify::new())).collect();
        Self {
            gates,
            results: Arc::new(results),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Open the gate for the n-th call (0-based).
    pub fn release(&self, call: usize) {
        self.gates[call].notify_one();
    }

    pub fn release_all(&self) {
        for gate in &self.gates {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn producer(&self) -> impl Fn() -> BoxFuture<'static, anyhow::Result<T>> + Send + Sync + 'static {
        let gates = self.gates.clone();
        let results = Arc::clone(&self.results);
        let calls = Arc::clone(&self.calls);
        move || {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            let gate = Arc::clone(&gates[call]);
            let result = results[call].clone();
            async move {
                gate.notified().await;
                result.map_err(anyhow::Error::msg)
            }
            .boxed()
        }
    }
}

/// Producer that resolves at once with `value`.
pub fn ready<T>(value: T) -> impl Fn() -> BoxFuture<'static, anyhow::Result<T>> + Send + Sync + 'static
where
    T: Clone + Send + Sync + 'static,
{
    move || futures::future::ready(Ok(value.clone())).boxed()
}

/// Producer that fails at once with `message`.
pub fn failing<T>(message: &'static str) -> impl Fn() -> BoxFuture<'static, anyhow::Result<T>> + Send + Sync + 'static
where
    T: Send + 'static,
{
    move || futures::future::ready(Err(anyhow::anyhow!(message))).boxed()
}

/// Records every published transition of a controller, in order.
pub struct Recorder {
    pub events: Arc<Mutex<Vec<String>>>,
    _subscriptions: Vec<Subscription>,
}

impl Recorder {
    pub fn attach<T>(state: &AsyncState<T>) -> Self
    where
        T: Clone + Send + Sync + std::fmt::Debug + 'static,
    {
        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriptions = vec![
            state.is_loading().subscribe({
                let events = Arc::clone(&events);
                move |loading| events.lock().push(format!("loading={loading}"))
            }),
            state.data().subscribe({
                let events = Arc::clone(&events);
                move |data| events.lock().push(format!("data={data:?}"))
            }),
            state.error().subscribe({
                let events = Arc::clone(&events);
                move |error| {
                    let text = match error {
                        Some(error) => error.message(),
                        None => "none".to_string(),
                    };
                    events.lock().push(format!("error={text}"))
                }
            }),
        ];
        Self {
            events,
            _subscriptions: subscriptions,
        }
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock())
    }
}
