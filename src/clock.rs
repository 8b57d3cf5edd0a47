//! Time source for effects.
//!
//! Reducers capture an `Arc<dyn Clock>` and hand it to timer effects, so
//! tests can swap in [`TestClock`] and advance time by hand.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

/// Abstract sleeping so effects can run on virtual time.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock time via `tokio::time`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Yields given to other tasks each time virtual time moves.
const SETTLE_YIELDS: usize = 32;

struct Sleeper {
    deadline: Duration,
    seq: u64,
    wake: oneshot::Sender<()>,
}

#[derive(Default)]
struct VirtualTime {
    now: Duration,
    sleepers: Vec<Sleeper>,
    next_seq: u64,
}

/// Manually driven clock for deterministic tests.
///
/// Sleeps only complete when [`TestClock::advance`] moves time past their
/// deadline. Intended for a current-thread tokio runtime, where yielding
/// lets woken tasks run to their next await before `advance` returns.
#[derive(Default)]
pub struct TestClock {
    time: Mutex<VirtualTime>,
}

impl TestClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.time.lock().now
    }

    /// Number of sleeps waiting on this clock.
    pub fn pending_sleeps(&self) -> usize {
        self.time.lock().sleepers.len()
    }

    /// Move time forward by `by`, waking due sleepers in deadline order.
    ///
    /// Each wake is followed by a settle so a repeating timer can register
    /// its next sleep before the following deadline is checked.
    pub async fn advance(&self, by: Duration) {
        let target = self.time.lock().now + by;
        settle().await;

        loop {
            let due = {
                let mut time = self.time.lock();
                let next = time
                    .sleepers
                    .iter()
                    .enumerate()
                    .filter(|(_, sleeper)| sleeper.deadline <= target)
                    .min_by_key(|(_, sleeper)| (sleeper.deadline, sleeper.seq))
                    .map(|(index, _)| index);
                match next {
                    Some(index) => {
                        let sleeper = time.sleepers.remove(index);
                        time.now = sleeper.deadline;
                        Some(sleeper)
                    }
                    None => {
                        time.now = target;
                        None
                    }
                }
            };

            match due {
                Some(sleeper) => {
                    // Receiver may be gone if its effect was cancelled.
                    let _ = sleeper.wake.send(());
                    settle().await;
                }
                None => break,
            }
        }
    }
}

#[async_trait]
impl Clock for TestClock {
    async fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        let wake = {
            let mut time = self.time.lock();
            let (tx, rx) = oneshot::channel();
            let seq = time.next_seq;
            time.next_seq += 1;
            let deadline = time.now + duration;
            time.sleepers.push(Sleeper {
                deadline,
                seq,
                wake: tx,
            });
            rx
        };
        if wake.await.is_err() {
            // Clock dropped: never wake.
            std::future::pending::<()>().await;
        }
    }
}

async fn settle() {
    for _ in 0..SETTLE_YIELDS {
        tokio::task::yield_now().await;
    }
}
