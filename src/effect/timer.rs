//! Repeating timer effect.

use std::sync::Arc;
use std::time::Duration;

use super::Effect;
use crate::clock::Clock;

/// Effect that emits `make_action()` every `interval` until cancelled.
///
/// The first action arrives one full interval after the effect starts.
pub fn timer<A, F>(clock: Arc<dyn Clock>, interval: Duration, make_action: F) -> Effect<A>
where
    A: Send + 'static,
    F: Fn() -> A + Send + 'static,
{
    Effect::run(move |emitter| async move {
        loop {
            clock.sleep(interval).await;
            if !emitter.emit(make_action()) {
                break;
            }
        }
        Ok(())
    })
}
