//! Action delivery from running effects back into a store.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const RUNNING: u8 = 0;
const CANCELLED: u8 = 1;
const FINISHED: u8 = 2;

/// Lifecycle flag shared between a running effect and the runtime.
///
/// Actions carry their effect's flag into the store queue so that anything
/// emitted before a cancel, but not yet processed, is discarded.
#[derive(Debug)]
pub(crate) struct Liveness {
    state: AtomicU8,
}

impl Liveness {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            state: AtomicU8::new(RUNNING),
        })
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::SeqCst) == CANCELLED
    }

    /// Returns true if this call moved the effect out of the running state.
    pub(crate) fn cancel(&self) -> bool {
        self.state
            .compare_exchange(RUNNING, CANCELLED, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Returns true if this call moved the effect out of the running state.
    pub(crate) fn finish(&self) -> bool {
        self.state
            .compare_exchange(RUNNING, FINISHED, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

/// An action on its way into a store, tagged with the effect that sent it.
#[derive(Debug)]
pub(crate) struct Envelope<A> {
    pub(crate) action: A,
    pub(crate) liveness: Option<Arc<Liveness>>,
}

impl<A> Envelope<A> {
    pub(crate) fn new(action: A) -> Self {
        Self {
            action,
            liveness: None,
        }
    }

    /// Sent by an effect that has since been cancelled.
    pub(crate) fn is_stale(&self) -> bool {
        self.liveness
            .as_ref()
            .is_some_and(|liveness| liveness.is_cancelled())
    }
}

/// Destination for emitted actions.
pub(crate) trait Mailbox<A>: Send + Sync {
    /// Queue an action.
    fn post(&self, envelope: Envelope<A>);

    /// Process queued actions if the owner does so eagerly.
    fn flush(&self);
}

/// Mailbox that translates child actions into a parent's action type.
struct MappedMailbox<C, A> {
    parent: Arc<dyn Mailbox<A>>,
    map: Arc<dyn Fn(C) -> A + Send + Sync>,
}

impl<C, A> Mailbox<C> for MappedMailbox<C, A>
where
    C: Send + 'static,
    A: Send + 'static,
{
    fn post(&self, envelope: Envelope<C>) {
        self.parent.post(Envelope {
            action: (self.map)(envelope.action),
            liveness: envelope.liveness,
        });
    }

    fn flush(&self) {
        self.parent.flush();
    }
}

/// Handle an effect uses to send actions back to its store.
///
/// Once the effect is cancelled, `emit` drops actions and returns `false`,
/// which long-running loops use as their stop signal.
pub struct Emitter<A> {
    mailbox: Arc<dyn Mailbox<A>>,
    liveness: Option<Arc<Liveness>>,
}

impl<A> Clone for Emitter<A> {
    fn clone(&self) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
            liveness: self.liveness.clone(),
        }
    }
}

impl<A: Send + 'static> Emitter<A> {
    pub(crate) fn new(mailbox: Arc<dyn Mailbox<A>>) -> Self {
        Self {
            mailbox,
            liveness: None,
        }
    }

    /// Same destination, tied to a specific running effect.
    pub(crate) fn with_liveness(&self, liveness: Arc<Liveness>) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
            liveness: Some(liveness),
        }
    }

    /// Emitter for a child action type that embeds into this one.
    pub(crate) fn contramap<C: Send + 'static>(
        &self,
        map: Arc<dyn Fn(C) -> A + Send + Sync>,
    ) -> Emitter<C> {
        Emitter {
            mailbox: Arc::new(MappedMailbox {
                parent: Arc::clone(&self.mailbox),
                map,
            }),
            liveness: self.liveness.clone(),
        }
    }

    /// Send an action to the store.
    ///
    /// Returns `false` without sending if the effect was cancelled.
    pub fn emit(&self, action: A) -> bool {
        if self.is_cancelled() {
            return false;
        }
        self.mailbox.post(Envelope {
            action,
            liveness: self.liveness.clone(),
        });
        self.mailbox.flush();
        true
    }

    /// True once the owning effect has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.liveness
            .as_ref()
            .is_some_and(|liveness| liveness.is_cancelled())
    }
}
