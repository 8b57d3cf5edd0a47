mod action;
mod environment;
mod reducer;
mod state;

pub use action::CounterAction;
pub use environment::CounterEnvironment;
pub use reducer::{CounterReducer, FACT_ID, TIMER_ID};
pub use state::CounterState;
