use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::facts::{FactClient, FactError, HttpFactClient};

/// Dependencies of the counter feature.
#[derive(Clone)]
pub struct CounterEnvironment {
    pub clock: Arc<dyn Clock>,
    pub facts: Arc<dyn FactClient>,
    pub timer_interval: Duration,
}

impl CounterEnvironment {
    /// Wall clock and the HTTP fact service described by `config`.
    pub fn live(config: &Config) -> Result<Self, FactError> {
        Ok(Self {
            clock: Arc::new(SystemClock),
            facts: Arc::new(HttpFactClient::new(&config.facts)?),
            timer_interval: config.timer_interval(),
        })
    }
}
