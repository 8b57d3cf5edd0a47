use crate::effect::{timer, Effect};
use crate::facts::FactError;
use crate::features::counter::action::CounterAction;
use crate::features::counter::environment::CounterEnvironment;
use crate::features::counter::state::CounterState;
use crate::mvi::Reducer;

/// Cancellation id of the repeating timer.
pub const TIMER_ID: &str = "timer";
/// Cancellation id of the in-flight fact lookup.
pub const FACT_ID: &str = "fact";

pub struct CounterReducer {
    env: CounterEnvironment,
}

impl CounterReducer {
    pub fn new(env: CounterEnvironment) -> Self {
        Self { env }
    }

    fn start_timer(&self) -> Effect<CounterAction> {
        timer(self.env.clock.clone(), self.env.timer_interval, || {
            CounterAction::TimerTick
        })
        .cancellable(TIMER_ID)
    }

    fn fetch_fact(&self, number: u64) -> Effect<CounterAction> {
        let facts = self.env.facts.clone();
        Effect::task(
            async move { facts.fetch(number).await },
            CounterAction::FactResponse,
        )
        .cancellable(FACT_ID)
    }
}

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;

    fn reduce(
        &self,
        mut state: CounterState,
        action: CounterAction,
    ) -> (CounterState, Effect<CounterAction>) {
        match action {
            CounterAction::IncrementButtonTapped | CounterAction::TimerTick => {
                state.count += 1;
                state.fact = None;
                (state, Effect::none())
            }
            CounterAction::DecrementButtonTapped => {
                state.count -= 1;
                state.fact = None;
                (state, Effect::none())
            }
            CounterAction::ToggleTimerButtonTapped => {
                state.is_timer_running = !state.is_timer_running;
                let effect = if state.is_timer_running {
                    self.start_timer()
                } else {
                    Effect::cancel(TIMER_ID)
                };
                (state, effect)
            }
            CounterAction::FactButtonTapped => {
                state.fact = None;
                state.error = None;
                match u64::try_from(state.count) {
                    Ok(number) => {
                        state.is_loading = true;
                        let effect = self.fetch_fact(number);
                        (state, effect)
                    }
                    Err(_) => {
                        let err = FactError::NegativeNumber {
                            number: state.count,
                        };
                        tracing::debug!(count = state.count, "Skipping fact lookup");
                        state.is_loading = false;
                        state.error = Some(err.to_string());
                        (state, Effect::cancel(FACT_ID))
                    }
                }
            }
            CounterAction::FactResponse(Ok(fact)) => {
                state.is_loading = false;
                state.fact = Some(fact);
                (state, Effect::none())
            }
            CounterAction::FactResponse(Err(err)) => {
                tracing::warn!(error = %err, "Fact lookup failed");
                state.is_loading = false;
                state.error = Some(err.to_string());
                (state, Effect::none())
            }
        }
    }
}
