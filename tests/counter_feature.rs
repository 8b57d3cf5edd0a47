mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{counter_with, failing_facts, good_number_facts, TICK};
use unistate::clock::{Clock, TestClock};
use unistate::facts::{FactClient, FactError, FnFactClient};
use unistate::features::counter::{CounterAction, CounterState};
use unistate::testing::TestStore;

#[tokio::test]
async fn increment_and_decrement() {
    let reducer = counter_with(Arc::new(TestClock::new()), good_number_facts());
    let mut store = TestStore::new(CounterState::default(), reducer);

    store.send(CounterAction::IncrementButtonTapped, |s| s.count = 1);
    store.send(CounterAction::DecrementButtonTapped, |s| s.count = 0);
    store.finish().await;
}

#[tokio::test]
async fn increment_clears_displayed_fact() {
    let reducer = counter_with(Arc::new(TestClock::new()), good_number_facts());
    let initial = CounterState {
        fact: Some("3 is a good number.".into()),
        count: 3,
        ..Default::default()
    };
    let mut store = TestStore::new(initial, reducer);

    store.send(CounterAction::IncrementButtonTapped, |s| {
        s.count = 4;
        s.fact = None;
    });
    store.finish().await;
}

#[tokio::test]
async fn timer_ticks_on_virtual_clock_until_stopped() {
    let clock = Arc::new(TestClock::new());
    let reducer = counter_with(clock.clone(), good_number_facts());
    let mut store = TestStore::new(CounterState::default(), reducer);

    store.send(CounterAction::ToggleTimerButtonTapped, |s| {
        s.is_timer_running = true;
    });

    clock.advance(TICK).await;
    store
        .receive(|a| matches!(a, CounterAction::TimerTick), |s| s.count = 1)
        .await;

    store.send(CounterAction::ToggleTimerButtonTapped, |s| {
        s.is_timer_running = false;
    });

    clock.advance(TICK * 5).await;
    assert_eq!(store.state().count, 1);
    store.finish().await;
}

#[tokio::test]
async fn timer_emits_one_tick_per_interval() {
    let clock = Arc::new(TestClock::new());
    let reducer = counter_with(clock.clone(), good_number_facts());
    let mut store = TestStore::new(CounterState::default(), reducer);

    store.send(CounterAction::ToggleTimerButtonTapped, |s| {
        s.is_timer_running = true;
    });

    for expected in 1..=3 {
        clock.advance(TICK).await;
        store
            .receive(|a| matches!(a, CounterAction::TimerTick), |s| s.count = expected)
            .await;
    }

    store.send(CounterAction::ToggleTimerButtonTapped, |s| {
        s.is_timer_running = false;
    });
    store.finish().await;
}

#[tokio::test]
async fn number_fact_success() {
    let reducer = counter_with(Arc::new(TestClock::new()), good_number_facts());
    let mut store = TestStore::new(CounterState::default(), reducer);

    store.send(CounterAction::FactButtonTapped, |s| s.is_loading = true);
    store
        .receive(
            |a| matches!(a, CounterAction::FactResponse(Ok(_))),
            |s| {
                s.is_loading = false;
                s.fact = Some("0 is a good number.".into());
            },
        )
        .await;
    store.finish().await;
}

#[tokio::test]
async fn number_fact_failure_is_surfaced() {
    let reducer = counter_with(
        Arc::new(TestClock::new()),
        failing_facts(FactError::Status { status: 503 }),
    );
    let mut store = TestStore::new(CounterState::default(), reducer);

    store.send(CounterAction::FactButtonTapped, |s| s.is_loading = true);
    store
        .receive(
            |a| matches!(a, CounterAction::FactResponse(Err(FactError::Status { status: 503 }))),
            |s| {
                s.is_loading = false;
                s.error = Some("Fact service returned status 503".into());
            },
        )
        .await;
    store.finish().await;
}

#[tokio::test]
async fn repeated_fact_request_supersedes_previous() {
    let clock = Arc::new(TestClock::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let facts: Arc<dyn FactClient> = {
        let clock = clock.clone();
        let calls = calls.clone();
        Arc::new(FnFactClient::new(move |n| {
            let clock = clock.clone();
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if call == 0 {
                    clock.sleep(Duration::from_secs(5)).await;
                    Ok(format!("stale fact about {n}"))
                } else {
                    Ok(format!("fresh fact about {n}"))
                }
            }
        }))
    };
    let reducer = counter_with(clock.clone(), facts);
    let mut store = TestStore::new(CounterState::default(), reducer);

    store.send(CounterAction::FactButtonTapped, |s| s.is_loading = true);
    // Let the first lookup start and park on the clock.
    clock.advance(Duration::from_secs(1)).await;
    store.send(CounterAction::FactButtonTapped, |_| {});
    store
        .receive(
            |a| matches!(a, CounterAction::FactResponse(Ok(fact)) if fact == "fresh fact about 0"),
            |s| {
                s.is_loading = false;
                s.fact = Some("fresh fact about 0".into());
            },
        )
        .await;

    // The superseded lookup would complete here if it were still running.
    clock.advance(Duration::from_secs(10)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    store.finish().await;
}
