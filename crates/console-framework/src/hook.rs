//! # Resource Hook
//!
//! A [`ResourceHook<T>`] binds async operations producing `T` to one observable
//! [`AsyncState<T>`]. It is the smallest unit of the fetch-state-render pattern:
//! every list fetch, every mutation and the current-user lookup runs through one.
//!
//! ## Sequencing
//!
//! Each call to [`execute`](ResourceHook::execute) takes a ticket from a
//! monotonically increasing counter. When an execution settles, its result is
//! written to state only if its ticket is still the latest one issued. An
//! older request that settles late is returned to its own caller but never
//! overwrites the state of a newer one.
//!
//! ## Cancellation
//!
//! [`cancel`](ResourceHook::cancel) aborts every in-flight execution. Aborted
//! executions resolve to [`ApiError::Cancelled`] and a hook that was `Loading`
//! goes back to `Idle`.

use crate::error::ApiError;
use crate::state::{AsyncState, Status};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, warn};

type SuccessCallback<T> = Box<dyn Fn(&T) + Send + Sync>;
type ErrorCallback = Box<dyn Fn(&ApiError) + Send + Sync>;

/// Callbacks invoked when an execution's settlement is applied to state.
///
/// They run while the hook's state is locked and must not read or drive the
/// hook they are attached to.
pub struct HookOptions<T> {
    on_success: Option<SuccessCallback<T>>,
    on_error: Option<ErrorCallback>,
}

impl<T> Default for HookOptions<T> {
    fn default() -> Self {
        Self {
            on_success: None,
            on_error: None,
        }
    }
}

impl<T> HookOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_success(mut self, callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&ApiError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }
}

/// Binds async operations to an observable tri-state.
///
/// ```rust
/// use console_framework::{ApiError, ResourceHook, Status};
///
/// #[tokio::main]
/// async fn main() {
///     let hook = ResourceHook::<u32>::new("answer");
///     let pending = hook.execute(async { Ok::<_, ApiError>(42) });
///
///     // State flips before the future is polled.
///     assert_eq!(hook.status(), Status::Loading);
///
///     assert_eq!(pending.await, Ok(42));
///     assert_eq!(hook.state().data(), Some(&42));
/// }
/// ```
pub struct ResourceHook<T> {
    name: String,
    state: watch::Sender<AsyncState<T>>,
    ticket: AtomicU64,
    cancel: watch::Sender<u64>,
    options: HookOptions<T>,
}

impl<T> ResourceHook<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>) -> Self {
        let (state, _) = watch::channel(AsyncState::Idle);
        let (cancel, _) = watch::channel(0);
        Self {
            name: name.into(),
            state,
            ticket: AtomicU64::new(0),
            cancel,
            options: HookOptions::default(),
        }
    }

    pub fn with_options(mut self, options: HookOptions<T>) -> Self {
        self.options = options;
        self
    }

    /// Seeds the hook with a state other than `Idle`.
    pub fn with_state(self, state: AsyncState<T>) -> Self {
        self.state.send_replace(state);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> AsyncState<T> {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> Status {
        self.state.borrow().status()
    }

    /// Receives every state change applied from now on.
    pub fn subscribe(&self) -> watch::Receiver<AsyncState<T>> {
        self.state.subscribe()
    }

    /// Runs `op` and records its outcome.
    ///
    /// The state switches to `Loading` when this method is called, before the
    /// returned future is first polled. Dropping the future without polling it
    /// to completion leaves the hook `Loading` until the next execution,
    /// `cancel` or `reset`.
    pub fn execute<'a, Fut>(
        &'a self,
        op: Fut,
    ) -> impl Future<Output = Result<T, ApiError>> + Send + 'a
    where
        Fut: Future<Output = Result<T, ApiError>> + Send + 'a,
    {
        let mut cancelled = self.cancel.subscribe();
        let ticket = self.begin();

        async move {
            let (outcome, aborted) = tokio::select! {
                biased;
                _ = cancelled.changed() => (Err(ApiError::Cancelled), true),
                result = op => (result, false),
            };

            if aborted {
                debug!(hook = %self.name, ticket, "Execution cancelled");
                return outcome;
            }

            if !self.settle(ticket, &outcome) {
                debug!(hook = %self.name, ticket, "Discarding stale settlement");
            }

            outcome
        }
    }

    /// Aborts all in-flight executions.
    pub fn cancel(&self) {
        self.cancel.send_modify(|epoch| *epoch += 1);
        self.state.send_if_modified(|state| {
            self.ticket.fetch_add(1, Ordering::SeqCst);
            if state.is_loading() {
                *state = AsyncState::Idle;
                true
            } else {
                false
            }
        });
    }

    /// Returns to `Idle`, discarding any in-flight settlement.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            self.ticket.fetch_add(1, Ordering::SeqCst);
            *state = AsyncState::Idle;
        });
    }

    fn begin(&self) -> u64 {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.ticket.fetch_add(1, Ordering::SeqCst) + 1;
            *state = AsyncState::Loading;
        });
        debug!(hook = %self.name, ticket, "Loading");
        ticket
    }

    // Ticket check, state write and callbacks run under the channel lock.
    fn settle(&self, ticket: u64, outcome: &Result<T, ApiError>) -> bool {
        self.state.send_if_modified(|state| {
            if self.ticket.load(Ordering::SeqCst) != ticket {
                return false;
            }
            match outcome {
                Ok(value) => {
                    *state = AsyncState::Success(value.clone());
                    if let Some(callback) = &self.options.on_success {
                        callback(value);
                    }
                }
                Err(e) => {
                    warn!(hook = %self.name, ticket, error = %e, "Execution failed");
                    *state = AsyncState::Error(e.clone());
                    if let Some(callback) = &self.options.on_error {
                        callback(e);
                    }
                }
            }
            true
        })
    }
}
