//! The store: single owner of a feature's state.
//!
//! # Dispatch model
//!
//! ```text
//! dispatch(action) ──→ queue ──→ drain (one thread at a time)
//!                                  │
//!                                  ├─→ reducer.reduce(state, action)
//!                                  ├─→ commit + notify observers
//!                                  └─→ runtime.execute(effect)
//!                                           │
//!              effect output ←──────────────┘
//! ```
//!
//! Actions are applied strictly one after another. A dispatch made while
//! the store is already draining on the same thread (from an observer or a
//! `Send` effect) is queued and applied right after the current action.

mod subscription;

use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex};
use tokio::runtime::Handle;

use crate::effect::{EffectRuntime, Emitter, Envelope, Mailbox};
use crate::mvi::Reducer;

pub use subscription::Subscription;

type Observer<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct Observers<S> {
    next_id: u64,
    entries: Vec<(u64, Observer<S>)>,
}

impl<S> Default for Observers<S> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

struct StoreInner<R: Reducer> {
    reducer: R,
    state: Mutex<R::State>,
    queue: Mutex<VecDeque<Envelope<R::Action>>>,
    /// Held while draining; the flag marks the owning thread as mid-drain.
    processing: ReentrantMutex<Cell<bool>>,
    observers: Arc<Mutex<Observers<R::State>>>,
    runtime: EffectRuntime,
    emitter: Emitter<R::Action>,
}

impl<R: Reducer> StoreInner<R> {
    fn enqueue(&self, envelope: Envelope<R::Action>) {
        self.queue.lock().push_back(envelope);
    }

    fn drain(&self) {
        let processing = self.processing.lock();
        if processing.get() {
            return;
        }
        processing.set(true);
        let _draining = scopeguard::guard(processing, |processing| processing.set(false));

        loop {
            let next = self.queue.lock().pop_front();
            let Some(envelope) = next else {
                break;
            };
            if envelope.is_stale() {
                tracing::trace!(action = ?envelope.action, "Dropping action from cancelled effect");
                continue;
            }
            self.process(envelope.action);
        }
    }

    fn process(&self, action: R::Action) {
        tracing::trace!(action = ?action, "Reducing action");

        let previous = self.state.lock().clone();
        let (next, effect) = self.reducer.reduce(previous.clone(), action);
        let changed = next != previous;
        *self.state.lock() = next.clone();

        if changed {
            self.notify(&next);
        }
        if !effect.is_none() {
            tracing::trace!(effect = ?effect, "Executing effect");
        }
        self.runtime.execute(effect, &self.emitter);
    }

    fn notify(&self, state: &R::State) {
        let observers: Vec<Observer<R::State>> = self
            .observers
            .lock()
            .entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(state);
        }
    }
}

/// Routes effect output back into the owning store.
///
/// Holds the store weakly so running effects never keep it alive.
struct StoreMailbox<R: Reducer> {
    inner: Weak<StoreInner<R>>,
}

impl<R: Reducer> Mailbox<R::Action> for StoreMailbox<R> {
    fn post(&self, envelope: Envelope<R::Action>) {
        if let Some(inner) = self.inner.upgrade() {
            inner.enqueue(envelope);
        }
    }

    fn flush(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain();
        }
    }
}

/// Owns one feature state and applies actions to it through a reducer.
///
/// Cloning yields another handle to the same store. When the last handle
/// is dropped every in-flight effect is cancelled.
pub struct Store<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store whose effects run on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new(initial_state: R::State, reducer: R) -> Self {
        Self::with_runtime(initial_state, reducer, Handle::current())
    }

    /// Create a store whose effects run on `handle`.
    pub fn with_runtime(initial_state: R::State, reducer: R, handle: Handle) -> Self {
        let inner = Arc::new_cyclic(|weak: &Weak<StoreInner<R>>| {
            let mailbox: Arc<dyn Mailbox<R::Action>> = Arc::new(StoreMailbox {
                inner: weak.clone(),
            });
            StoreInner {
                reducer,
                state: Mutex::new(initial_state),
                queue: Mutex::new(VecDeque::new()),
                processing: ReentrantMutex::new(Cell::new(false)),
                observers: Arc::new(Mutex::new(Observers::default())),
                runtime: EffectRuntime::new(handle),
                emitter: Emitter::new(mailbox),
            }
        });
        Self { inner }
    }

    /// Apply `action`.
    ///
    /// Returns once the action has been reduced and committed, unless the
    /// call is nested inside this store's own processing, in which case the
    /// action is queued behind the one being processed.
    pub fn dispatch(&self, action: R::Action) {
        self.inner.enqueue(Envelope::new(action));
        self.inner.drain();
    }

    /// Register `observer` to be called with the new state after every
    /// action that changes it.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&R::State) + Send + Sync + 'static,
    {
        let observer: Observer<R::State> = Arc::new(observer);
        let id = {
            let mut observers = self.inner.observers.lock();
            let id = observers.next_id;
            observers.next_id += 1;
            observers.entries.push((id, observer));
            id
        };

        let observers = Arc::downgrade(&self.inner.observers);
        Subscription::new(move || {
            if let Some(observers) = observers.upgrade() {
                observers.lock().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> R::State {
        self.inner.state.lock().clone()
    }

    /// Read the current state through `read`.
    ///
    /// `read` sees a snapshot taken before it runs, so it may dispatch to
    /// this store.
    pub fn with_state<T>(&self, read: impl FnOnce(&R::State) -> T) -> T {
        let snapshot = self.state();
        read(&snapshot)
    }

    /// Number of effects still running.
    pub fn in_flight(&self) -> usize {
        self.inner.runtime.in_flight()
    }

    /// Cancel every in-flight effect.
    pub fn cancel_all(&self) {
        self.inner.runtime.cancel_all();
    }
}
