//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_facts;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use unistate::clock::TestClock;
use unistate::facts::{FactClient, FactError, FnFactClient};
use unistate::features::counter::{CounterEnvironment, CounterReducer};

/// Interval used by counter timers in tests.
pub const TICK: Duration = Duration::from_secs(1);

/// Write `content` to a temporary `config.toml`.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Fact client answering `"{n} is a good number."`.
pub fn good_number_facts() -> Arc<dyn FactClient> {
    Arc::new(FnFactClient::new(|n| async move {
        Ok(format!("{n} is a good number."))
    }))
}

/// Fact client that always fails with `error`.
pub fn failing_facts(error: FactError) -> Arc<dyn FactClient> {
    Arc::new(FnFactClient::new(move |_| {
        let error = error.clone();
        async move { Err(error) }
    }))
}

/// Counter reducer on a virtual clock.
pub fn counter_with(clock: Arc<TestClock>, facts: Arc<dyn FactClient>) -> CounterReducer {
    CounterReducer::new(CounterEnvironment {
        clock,
        facts,
        timer_interval: TICK,
    })
}

/// Poll `check` until it passes or `timeout` elapses.
pub async fn eventually(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    check()
}
