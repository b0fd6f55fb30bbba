use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::async_state::error::{AsyncError, AsyncStateError};
use crate::async_state::options::{AsyncStateOptions, ErrorCallback};
use crate::async_state::snapshot::{AsyncSnapshot, AsyncStatus};
use crate::reactive::{ReadOnly, StateCell};

type Producer<T> = Box<dyn Fn() -> BoxFuture<'static, anyhow::Result<T>> + Send + Sync>;

/// The producer's future, or the panic raised while calling it.
type Started<T> = Result<BoxFuture<'static, anyhow::Result<T>>, AsyncError>;

/// Tracks `data`, `is_loading` and `error` for a zero-argument async
/// producer.
///
/// Cloning gives another handle to the same state; every handle can trigger
/// [`execute`](Self::execute) and read the projections, none can write them.
pub struct AsyncState<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for AsyncState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<T> {
    producer: Producer<T>,
    data: StateCell<Option<T>>,
    is_loading: StateCell<bool>,
    error: StateCell<Option<AsyncError>>,
    on_error: Option<ErrorCallback>,
    has_succeeded: AtomicBool,
    attempts: AtomicU64,
}

impl<T> AsyncState<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Build a controller around `producer`.
    ///
    /// With `options.immediate` set, the first execution has already started
    /// when this returns: `is_loading` reads `true` and the rest of the
    /// execution runs as a spawned task. That path needs a Tokio runtime and
    /// fails with [`AsyncStateError::NoRuntime`] outside one.
    pub fn new<F, Fut, E>(
        producer: F,
        options: AsyncStateOptions<T>,
    ) -> Result<Self, AsyncStateError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        let AsyncStateOptions {
            immediate,
            initial_state,
            on_error,
        } = options;

        let runtime = if immediate {
            Some(Handle::try_current()?)
        } else {
            None
        };

        let producer: Producer<T> =
            Box::new(move || producer().map(|result| result.map_err(Into::into)).boxed());

        let state = Self {
            inner: Arc::new(Inner {
                producer,
                data: StateCell::new(initial_state),
                is_loading: StateCell::new(false),
                error: StateCell::new(None),
                on_error,
                has_succeeded: AtomicBool::new(false),
                attempts: AtomicU64::new(0),
            }),
        };

        if let Some(runtime) = runtime {
            // Fire-and-forget; dropping the handle does not cancel the task.
            drop(state.spawn_on(&runtime));
        }

        Ok(state)
    }

    /// Run the producer once.
    ///
    /// `is_loading` is set and `error` cleared before this returns; the
    /// producer has also been called. The returned future awaits the
    /// producer's result and records it. Dropping the future unfinished
    /// clears `is_loading` and leaves `data` and `error` as they were.
    ///
    /// Overlapping executions are not coordinated: whichever settles last
    /// wins.
    pub fn execute(&self) -> impl Future<Output = ()> + Send + 'static {
        let (attempt, started) = Attempt::begin(Arc::clone(&self.inner));
        attempt.run(started)
    }

    /// Like [`execute`](Self::execute), but the rest of the execution runs
    /// as a task on the current Tokio runtime. The [`Completion`] may be
    /// awaited or dropped.
    pub fn execute_detached(&self) -> Result<Completion, AsyncStateError> {
        let runtime = Handle::try_current()?;
        Ok(self.spawn_on(&runtime))
    }

    fn spawn_on(&self, runtime: &Handle) -> Completion {
        let execution = self.execute();
        Completion {
            handle: runtime.spawn(execution),
        }
    }

    pub fn data(&self) -> ReadOnly<Option<T>> {
        self.inner.data.read_only()
    }

    pub fn is_loading(&self) -> ReadOnly<bool> {
        self.inner.is_loading.read_only()
    }

    pub fn error(&self) -> ReadOnly<Option<AsyncError>> {
        self.inner.error.read_only()
    }

    pub fn status(&self) -> AsyncStatus {
        AsyncStatus::derive(
            self.inner.is_loading.get(),
            self.inner.error.get().is_some(),
            self.inner.has_succeeded.load(Ordering::SeqCst),
        )
    }

    pub fn snapshot(&self) -> AsyncSnapshot<T> {
        AsyncSnapshot {
            data: self.inner.data.get(),
            is_loading: self.inner.is_loading.get(),
            error: self.inner.error.get(),
        }
    }

    /// Wait until no execution is in flight and return the state at that
    /// point. Returns at once if nothing is running.
    pub async fn settled(&self) -> AsyncSnapshot<T> {
        self.is_loading().wait_for(|loading| !*loading).await;
        self.snapshot()
    }
}

impl<T> std::fmt::Debug for AsyncState<T>
where
    T: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("AsyncState")
            .field("data", &snapshot.data)
            .field("is_loading", &snapshot.is_loading)
            .field("error", &snapshot.error)
            .finish()
    }
}

/// One execution of the producer, from `begin` until its result is recorded.
struct Attempt<T> {
    inner: Arc<Inner<T>>,
    id: u64,
    settled: bool,
}

impl<T> Attempt<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Synchronous part of an execution: flag loading, clear the previous
    /// error, call the producer.
    fn begin(inner: Arc<Inner<T>>) -> (Self, Started<T>) {
        let id = inner.attempts.fetch_add(1, Ordering::Relaxed) + 1;

        inner.is_loading.set(true);
        inner.error.set(None);
        tracing::debug!(attempt = id, "Execution started");

        let started = panic::catch_unwind(AssertUnwindSafe(|| (inner.producer)()))
            .map_err(AsyncError::from_panic);

        let attempt = Self {
            inner,
            id,
            settled: false,
        };
        (attempt, started)
    }

    async fn run(mut self, started: Started<T>) {
        let outcome = match started {
            Ok(future) => match AssertUnwindSafe(future).catch_unwind().await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(error)) => Err(AsyncError::new(error)),
                Err(payload) => Err(AsyncError::from_panic(payload)),
            },
            Err(error) => Err(error),
        };
        self.settle(outcome);
    }

    fn settle(&mut self, outcome: Result<T, AsyncError>) {
        match outcome {
            Ok(value) => {
                self.inner.has_succeeded.store(true, Ordering::SeqCst);
                self.inner.data.set(Some(value));
                tracing::debug!(attempt = self.id, "Execution succeeded");
            }
            Err(error) => {
                tracing::warn!(attempt = self.id, error = %error, "Producer failed");
                self.inner.error.set(Some(error.clone()));
                if let Some(on_error) = &self.inner.on_error {
                    on_error(&error);
                }
            }
        }
        self.inner.is_loading.set(false);
        self.settled = true;
    }
}

impl<T> Drop for Attempt<T> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!(attempt = self.id, "Execution dropped before settling");
            self.inner.is_loading.set(false);
        }
    }
}

/// Handle to a detached execution.
///
/// Resolves once the execution has recorded its outcome. Dropping it lets
/// the execution finish on its own.
#[derive(Debug)]
pub struct Completion {
    handle: JoinHandle<()>,
}

impl Completion {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(())) => Poll::Ready(()),
            Poll::Ready(Err(err)) if err.is_panic() => panic::resume_unwind(err.into_panic()),
            Poll::Ready(Err(err)) => {
                tracing::debug!(error = %err, "Execution task cancelled");
                Poll::Ready(())
            }
        }
    }
}
