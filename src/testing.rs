//! Exhaustive test harness for reducers.
//!
//! [`TestStore`] runs a reducer with real effects but asserts every step:
//! each sent action must produce exactly the expected state, every action
//! emitted by an effect must be received explicitly, and no effect may be
//! left running at the end of the test.
//!
//! ```ignore
//! let mut store = TestStore::new(CounterState::default(), reducer);
//! store.send(CounterAction::FactButtonTapped, |s| s.is_loading = true);
//! store
//!     .receive(|a| matches!(a, CounterAction::FactResponse(Ok(_))), |s| {
//!         s.is_loading = false;
//!         s.fact = Some("0 is a good number.".into());
//!     })
//!     .await;
//! store.finish().await;
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::effect::{EffectRuntime, Emitter, Envelope, Mailbox};
use crate::mvi::Reducer;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

struct ChannelMailbox<A> {
    sender: mpsc::UnboundedSender<Envelope<A>>,
}

impl<A: Send + 'static> Mailbox<A> for ChannelMailbox<A> {
    fn post(&self, envelope: Envelope<A>) {
        // Receiver lives as long as the store that owns this mailbox.
        let _ = self.sender.send(envelope);
    }

    fn flush(&self) {}
}

/// Store replacement that checks every transition.
pub struct TestStore<R: Reducer> {
    reducer: R,
    state: R::State,
    runtime: EffectRuntime,
    emitter: Emitter<R::Action>,
    inbox: mpsc::UnboundedReceiver<Envelope<R::Action>>,
    pending: VecDeque<R::Action>,
    timeout: Duration,
}

impl<R: Reducer> TestStore<R> {
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new(initial_state: R::State, reducer: R) -> Self {
        let (sender, inbox) = mpsc::unbounded_channel();
        let mailbox: Arc<dyn Mailbox<R::Action>> = Arc::new(ChannelMailbox { sender });
        Self {
            reducer,
            state: initial_state,
            runtime: EffectRuntime::current(),
            emitter: Emitter::new(mailbox),
            inbox,
            pending: VecDeque::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// How long `receive` and `finish` wait for effects.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> &R::State {
        &self.state
    }

    /// Number of effects still running.
    pub fn in_flight(&self) -> usize {
        self.runtime.in_flight()
    }

    /// Send `action` and assert the resulting state.
    ///
    /// `update` receives a copy of the state before the action and must
    /// mutate it into the state expected afterwards.
    ///
    /// # Panics
    ///
    /// Panics if effect output is waiting to be received, or if the state
    /// differs from the expectation.
    #[track_caller]
    pub fn send(&mut self, action: R::Action, update: impl FnOnce(&mut R::State)) {
        self.collect_pending();
        if !self.pending.is_empty() {
            panic!(
                "Must handle {} received action(s) before sending {:?}: {:?}",
                self.pending.len(),
                action,
                self.pending
            );
        }
        self.apply(action, update);
    }

    /// Await the next action emitted by an effect and assert its result.
    ///
    /// # Panics
    ///
    /// Panics if nothing arrives within the timeout, if `matches` rejects
    /// the action, or if the state differs from the expectation.
    pub async fn receive(
        &mut self,
        matches: impl FnOnce(&R::Action) -> bool,
        update: impl FnOnce(&mut R::State),
    ) {
        let Some(action) = self.next_received().await else {
            panic!(
                "Expected to receive an action, but none arrived within {:?}",
                self.timeout
            );
        };
        assert!(matches(&action), "Received unexpected action: {:?}", action);
        self.apply(action, update);
    }

    /// Assert that every emitted action was received and no effect is
    /// still running.
    pub async fn finish(mut self) {
        let deadline = Instant::now() + self.timeout;
        while self.runtime.in_flight() > 0 && Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        self.collect_pending();
        assert!(
            self.pending.is_empty(),
            "{} received action(s) were never asserted: {:?}",
            self.pending.len(),
            self.pending
        );

        let running = self.runtime.in_flight();
        assert_eq!(running, 0, "{} effect(s) still running at end of test", running);
    }

    #[track_caller]
    fn apply(&mut self, action: R::Action, update: impl FnOnce(&mut R::State)) {
        let mut expected = self.state.clone();
        update(&mut expected);

        let (next, effect) = self.reducer.reduce(self.state.clone(), action.clone());
        self.state = next;
        assert_eq!(self.state, expected, "State mismatch after {:?}", action);

        self.runtime.execute(effect, &self.emitter);
    }

    fn collect_pending(&mut self) {
        while let Ok(envelope) = self.inbox.try_recv() {
            if !envelope.is_stale() {
                self.pending.push_back(envelope.action);
            }
        }
    }

    async fn next_received(&mut self) -> Option<R::Action> {
        self.collect_pending();
        if let Some(action) = self.pending.pop_front() {
            return Some(action);
        }

        let deadline = Instant::now() + self.timeout;
        loop {
            match tokio::time::timeout_at(deadline, self.inbox.recv()).await {
                Ok(Some(envelope)) if envelope.is_stale() => continue,
                Ok(Some(envelope)) => return Some(envelope.action),
                _ => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;
    use crate::mvi::{Action, FeatureState};

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Echo {
        heard: Vec<String>,
    }

    impl FeatureState for Echo {}

    #[derive(Debug, Clone)]
    enum EchoAction {
        Say(String),
        Heard(String),
    }

    impl Action for EchoAction {}

    struct EchoReducer;

    impl Reducer for EchoReducer {
        type State = Echo;
        type Action = EchoAction;

        fn reduce(&self, mut state: Echo, action: EchoAction) -> (Echo, Effect<EchoAction>) {
            match action {
                EchoAction::Say(word) => (
                    state,
                    Effect::task(async move { word }, EchoAction::Heard),
                ),
                EchoAction::Heard(word) => {
                    state.heard.push(word);
                    (state, Effect::none())
                }
            }
        }
    }

    #[tokio::test]
    async fn send_receive_finish() {
        let mut store = TestStore::new(Echo::default(), EchoReducer);
        store.send(EchoAction::Say("hi".into()), |_| {});
        store
            .receive(
                |action| matches!(action, EchoAction::Heard(word) if word == "hi"),
                |state| state.heard = vec!["hi".into()],
            )
            .await;
        store.finish().await;
    }

    #[tokio::test]
    #[should_panic(expected = "State mismatch")]
    async fn wrong_expectation_panics() {
        let mut store = TestStore::new(Echo::default(), EchoReducer);
        store.send(EchoAction::Heard("x".into()), |_| {});
    }

    #[tokio::test]
    #[should_panic(expected = "never asserted")]
    async fn unreceived_action_fails_finish() {
        let mut store = TestStore::new(Echo::default(), EchoReducer);
        store.send(EchoAction::Say("hi".into()), |_| {});
        store.finish().await;
    }

    #[tokio::test]
    #[should_panic(expected = "none arrived")]
    async fn receive_times_out() {
        let mut store =
            TestStore::new(Echo::default(), EchoReducer).with_timeout(Duration::from_millis(20));
        store.receive(|_| true, |_| {}).await;
    }
}
