use crate::mvi::FeatureState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CounterState {
    pub count: i64,
    pub fact: Option<String>,
    pub is_loading: bool,
    pub is_timer_running: bool,
    /// Message from the last failed fact lookup.
    pub error: Option<String>,
}

impl FeatureState for CounterState {}
