//! Execution of effects on a tokio runtime.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::{AbortHandle, JoinError};

use super::cancel::CancelId;
use super::emitter::{Emitter, Liveness};
use super::error::EffectError;
use super::{Effect, FailureMapper, Operation, Task};

/// One live effect in the cancellation registry.
struct Registration {
    generation: u64,
    liveness: Arc<Liveness>,
    abort: AbortHandle,
}

#[derive(Default)]
struct Registry {
    tasks: HashMap<CancelId, Registration>,
    next_generation: u64,
}

/// Runs effects produced by a store's reducer.
///
/// Every running effect is registered under a [`CancelId`]. Starting an
/// effect under an id that is still live cancels the older one first, so
/// at most one effect per id is ever running.
pub struct EffectRuntime {
    handle: Handle,
    registry: Arc<Mutex<Registry>>,
    in_flight: Arc<AtomicUsize>,
}

impl EffectRuntime {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            registry: Arc::new(Mutex::new(Registry::default())),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Runtime bound to the tokio runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Carry out `effect`, delivering its actions through `emitter`.
    pub(crate) fn execute<A: Send + 'static>(&self, effect: Effect<A>, emitter: &Emitter<A>) {
        match effect {
            Effect::None => {}
            Effect::Send(action) => {
                emitter.emit(action);
            }
            Effect::Run(task) => self.spawn(task, emitter),
            Effect::Cancel(id) => self.cancel(&id),
            Effect::Dismiss => {
                tracing::warn!("Dismiss reached a store with no presenting parent; ignored");
            }
            Effect::Merge(effects) => {
                for effect in effects {
                    self.execute(effect, emitter);
                }
            }
        }
    }

    fn spawn<A: Send + 'static>(&self, task: Task<A>, emitter: &Emitter<A>) {
        let (id, operation, on_failure) = task.into_parts();
        let id = id.unwrap_or_else(CancelId::unique);
        let liveness = Liveness::new();

        let mut registry = self.registry.lock();
        if let Some(previous) = registry.tasks.remove(&id) {
            tracing::debug!(effect = %id, "Superseding running effect");
            self.retire(previous);
        }
        registry.next_generation += 1;
        let generation = registry.next_generation;
        self.in_flight.fetch_add(1, Ordering::SeqCst);

        let run = Supervised {
            id: id.clone(),
            generation,
            liveness: Arc::clone(&liveness),
            emitter: emitter.with_liveness(Arc::clone(&liveness)),
            registry: Arc::clone(&self.registry),
            in_flight: Arc::clone(&self.in_flight),
        };
        let join = self
            .handle
            .spawn(run.supervise(self.handle.clone(), operation, on_failure));

        tracing::debug!(effect = %id, generation, "Effect started");
        registry.tasks.insert(
            id,
            Registration {
                generation,
                liveness,
                abort: join.abort_handle(),
            },
        );
    }

    /// Cancel the effect registered under `id` and every effect nested below it.
    ///
    /// After this returns, no action emitted by those effects is processed.
    pub fn cancel(&self, id: &CancelId) {
        let removed: Vec<(CancelId, Registration)> = {
            let mut registry = self.registry.lock();
            let matching: Vec<CancelId> = registry
                .tasks
                .keys()
                .filter(|candidate| id.contains(candidate))
                .cloned()
                .collect();
            matching
                .into_iter()
                .filter_map(|key| registry.tasks.remove(&key).map(|reg| (key, reg)))
                .collect()
        };

        for (key, registration) in removed {
            tracing::debug!(effect = %key, "Effect cancelled");
            self.retire(registration);
        }
    }

    /// Cancel everything this runtime is running.
    pub fn cancel_all(&self) {
        let removed: Vec<Registration> = {
            let mut registry = self.registry.lock();
            registry.tasks.drain().map(|(_, reg)| reg).collect()
        };
        if !removed.is_empty() {
            tracing::debug!(count = removed.len(), "Cancelling all effects");
        }
        for registration in removed {
            self.retire(registration);
        }
    }

    /// Number of effects that have started and neither finished nor been cancelled.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// True if an effect is registered under exactly `id`.
    pub fn is_running(&self, id: &CancelId) -> bool {
        self.registry.lock().tasks.contains_key(id)
    }

    fn retire(&self, registration: Registration) {
        if registration.liveness.cancel() {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        registration.abort.abort();
    }
}

impl Drop for EffectRuntime {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Bookkeeping for one spawned effect.
struct Supervised<A> {
    id: CancelId,
    generation: u64,
    liveness: Arc<Liveness>,
    emitter: Emitter<A>,
    registry: Arc<Mutex<Registry>>,
    in_flight: Arc<AtomicUsize>,
}

impl<A: Send + 'static> Supervised<A> {
    /// Run the operation in its own task so panics surface as `JoinError`s.
    ///
    /// Aborting this task aborts the operation along with it.
    async fn supervise(
        self,
        handle: Handle,
        operation: Operation<A>,
        on_failure: Option<FailureMapper<A>>,
    ) {
        let inner = handle.spawn(operation(self.emitter.clone()));
        let _abort_inner = scopeguard::guard(inner.abort_handle(), |abort| abort.abort());

        let outcome = match inner.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => Err(EffectError::Panicked(panic_message(err))),
            Err(_) => Ok(()),
        };

        if let Err(error) = outcome {
            if !self.liveness.is_cancelled() {
                match on_failure {
                    Some(map) => {
                        tracing::debug!(
                            effect = %self.id,
                            error = %error,
                            "Effect failed; emitting mapped action"
                        );
                        self.emitter.emit(map(error));
                    }
                    None => {
                        tracing::error!(effect = %self.id, error = %error, "Effect failed");
                    }
                }
            }
        }

        {
            let mut registry = self.registry.lock();
            let current = registry
                .tasks
                .get(&self.id)
                .is_some_and(|reg| reg.generation == self.generation);
            if current {
                registry.tasks.remove(&self.id);
            }
        }
        if self.liveness.finish() {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            tracing::debug!(effect = %self.id, "Effect finished");
        }
    }
}

fn panic_message(err: JoinError) -> String {
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
