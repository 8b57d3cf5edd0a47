//! Effects: deferred work returned by reducers.
//!
//! A reducer never performs I/O. It describes follow-up work as an
//! [`Effect`], which the store hands to the [`EffectRuntime`]. Output of
//! running effects re-enters the store as ordinary actions.

mod cancel;
mod emitter;
mod error;
mod runtime;
mod timer;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub use cancel::CancelId;
pub use emitter::Emitter;
pub use error::EffectError;
pub use runtime::EffectRuntime;
pub use timer::timer;

pub(crate) use emitter::{Envelope, Mailbox};

/// Boxed future returned by effect operations.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

type Operation<A> = Box<dyn FnOnce(Emitter<A>) -> BoxFuture<Result<(), EffectError>> + Send>;
type FailureMapper<A> = Box<dyn FnOnce(EffectError) -> A + Send>;

/// An asynchronous operation waiting to be spawned.
pub struct Task<A> {
    id: Option<CancelId>,
    operation: Operation<A>,
    on_failure: Option<FailureMapper<A>>,
}

impl<A: Send + 'static> Task<A> {
    /// Cancellation id, if one was assigned.
    pub fn id(&self) -> Option<&CancelId> {
        self.id.as_ref()
    }

    pub(crate) fn with_id(mut self, id: CancelId) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Option<CancelId>,
        Operation<A>,
        Option<FailureMapper<A>>,
    ) {
        (self.id, self.operation, self.on_failure)
    }

    /// Translate emitted actions into another action type.
    pub(crate) fn map<B: Send + 'static>(self, map: Arc<dyn Fn(A) -> B + Send + Sync>) -> Task<B> {
        let operation = self.operation;
        let op_map = Arc::clone(&map);
        let on_failure = self.on_failure.map(|failure| {
            Box::new(move |error: EffectError| map(failure(error))) as FailureMapper<B>
        });
        Task {
            id: self.id,
            operation: Box::new(move |emitter: Emitter<B>| operation(emitter.contramap(op_map))),
            on_failure,
        }
    }
}

/// Description of work to perform after a state transition.
pub enum Effect<A> {
    /// Nothing to do.
    None,
    /// Feed an action back into the store right after the current one.
    Send(A),
    /// Run an asynchronous operation.
    Run(Task<A>),
    /// Cancel in-flight effects registered under this id (and below it).
    Cancel(CancelId),
    /// Ask the presenting parent to clear this feature's state.
    Dismiss,
    /// Several effects, started in order.
    Merge(Vec<Effect<A>>),
}

impl<A: Send + 'static> Effect<A> {
    pub fn none() -> Self {
        Effect::None
    }

    pub fn send(action: A) -> Self {
        Effect::Send(action)
    }

    /// Run `operation`, which may emit any number of actions.
    ///
    /// ```ignore
    /// Effect::run(|emitter| async move {
    ///     emitter.emit(Action::Started);
    ///     Ok(())
    /// })
    /// ```
    pub fn run<F, Fut>(operation: F) -> Self
    where
        F: FnOnce(Emitter<A>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), EffectError>> + Send + 'static,
    {
        Effect::Run(Task {
            id: None,
            operation: Box::new(move |emitter| Box::pin(operation(emitter))),
            on_failure: None,
        })
    }

    /// Await `future` once and emit `map(output)`.
    pub fn task<Fut, T, M>(future: Fut, map: M) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        M: FnOnce(T) -> A + Send + 'static,
    {
        Effect::run(move |emitter| async move {
            let output = future.await;
            emitter.emit(map(output));
            Ok(())
        })
    }

    pub fn cancel(id: impl Into<CancelId>) -> Self {
        Effect::Cancel(id.into())
    }

    pub fn dismiss() -> Self {
        Effect::Dismiss
    }

    /// Combine effects, dropping `None`s and flattening nested merges.
    pub fn merge(effects: impl IntoIterator<Item = Effect<A>>) -> Self {
        let mut flat = Vec::new();
        for effect in effects {
            match effect {
                Effect::None => {}
                Effect::Merge(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Effect::None,
            1 => flat.pop().unwrap_or(Effect::None),
            _ => Effect::Merge(flat),
        }
    }

    /// Register every `Run` in this effect under `id`.
    ///
    /// Starting a new effect under an id that is still running cancels the
    /// previous one first.
    pub fn cancellable(self, id: impl Into<CancelId>) -> Self {
        let id = id.into();
        match self {
            Effect::Run(task) => Effect::Run(task.with_id(id)),
            Effect::Merge(effects) => Effect::Merge(
                effects
                    .into_iter()
                    .map(|effect| effect.cancellable(id.clone()))
                    .collect(),
            ),
            other => other,
        }
    }

    /// Turn a failure of this `Run` into an action instead of a log line.
    ///
    /// Only applies to a single `Run`; other variants are returned unchanged.
    pub fn catch<M>(self, map: M) -> Self
    where
        M: FnOnce(EffectError) -> A + Send + 'static,
    {
        match self {
            Effect::Run(mut task) => {
                task.on_failure = Some(Box::new(map));
                Effect::Run(task)
            }
            other => other,
        }
    }

    /// Translate every action this effect produces.
    pub fn map<B, F>(self, map: F) -> Effect<B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        self.map_shared(Arc::new(map))
    }

    fn map_shared<B: Send + 'static>(self, map: Arc<dyn Fn(A) -> B + Send + Sync>) -> Effect<B> {
        match self {
            Effect::None => Effect::None,
            Effect::Send(action) => Effect::Send(map(action)),
            Effect::Run(task) => Effect::Run(task.map(map)),
            Effect::Cancel(id) => Effect::Cancel(id),
            Effect::Dismiss => Effect::Dismiss,
            Effect::Merge(effects) => Effect::Merge(
                effects
                    .into_iter()
                    .map(|effect| effect.map_shared(Arc::clone(&map)))
                    .collect(),
            ),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }
}

impl<A: fmt::Debug> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => write!(f, "None"),
            Effect::Send(action) => f.debug_tuple("Send").field(action).finish(),
            Effect::Run(task) => f
                .debug_struct("Run")
                .field("id", &task.id)
                .field("catches", &task.on_failure.is_some())
                .finish(),
            Effect::Cancel(id) => f.debug_tuple("Cancel").field(id).finish(),
            Effect::Dismiss => write!(f, "Dismiss"),
            Effect::Merge(effects) => f.debug_list().entries(effects).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_drops_none_and_flattens() {
        let effect: Effect<u8> = Effect::merge([
            Effect::none(),
            Effect::merge([Effect::send(1), Effect::send(2)]),
            Effect::dismiss(),
        ]);
        match effect {
            Effect::Merge(effects) => {
                assert_eq!(effects.len(), 3);
                assert!(matches!(effects[0], Effect::Send(1)));
                assert!(matches!(effects[1], Effect::Send(2)));
                assert!(matches!(effects[2], Effect::Dismiss));
            }
            other => panic!("Expected Merge, got {:?}", other),
        }
    }

    #[test]
    fn merge_of_single_effect_unwraps() {
        let effect: Effect<u8> = Effect::merge([Effect::none(), Effect::send(3)]);
        assert!(matches!(effect, Effect::Send(3)));
        let empty: Effect<u8> = Effect::merge([]);
        assert!(empty.is_none());
    }

    #[test]
    fn cancellable_tags_run_effects() {
        let effect: Effect<u8> = Effect::run(|_| async { Ok(()) }).cancellable("timer");
        match effect {
            Effect::Run(task) => assert_eq!(task.id(), Some(&CancelId::new("timer"))),
            other => panic!("Expected Run, got {:?}", other),
        }
    }

    #[test]
    fn cancellable_leaves_send_alone() {
        let effect: Effect<u8> = Effect::send(1).cancellable("timer");
        assert!(matches!(effect, Effect::Send(1)));
    }

    #[test]
    fn map_translates_send_and_keeps_cancel_ids() {
        let effect: Effect<u8> = Effect::merge([Effect::send(4), Effect::cancel("fact")]);
        let mapped: Effect<String> = effect.map(|n| format!("n={n}"));
        match mapped {
            Effect::Merge(effects) => {
                assert!(matches!(&effects[0], Effect::Send(s) if s == "n=4"));
                assert!(matches!(&effects[1], Effect::Cancel(id) if id.to_string() == "fact"));
            }
            other => panic!("Expected Merge, got {:?}", other),
        }
    }

    #[test]
    fn debug_shows_run_id() {
        let effect: Effect<u8> = Effect::run(|_| async { Ok(()) }).cancellable("fact");
        let rendered = format!("{:?}", effect);
        assert!(rendered.contains("Run"));
        assert!(rendered.contains("fact"));
    }
}
