//! Reducer trait for MVI architecture.

use super::action::Action;
use super::state::FeatureState;
use crate::effect::Effect;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Action) -> (State, Effect).
/// Dependencies such as clocks or API clients live on `self` and are only
/// touched from inside the returned effect, never while reducing.
pub trait Reducer: Send + Sync + 'static {
    /// The state type this reducer operates on.
    type State: FeatureState;

    /// The action type this reducer handles.
    type Action: Action;

    /// Process an action and return the new state plus follow-up work.
    fn reduce(
        &self,
        state: Self::State,
        action: Self::Action,
    ) -> (Self::State, Effect<Self::Action>);
}
