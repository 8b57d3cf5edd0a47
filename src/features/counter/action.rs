use crate::facts::FactError;
use crate::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum CounterAction {
    IncrementButtonTapped,
    DecrementButtonTapped,
    ToggleTimerButtonTapped,
    /// Emitted by the running timer once per interval.
    TimerTick,
    FactButtonTapped,
    FactResponse(Result<String, FactError>),
}

impl Action for CounterAction {}
