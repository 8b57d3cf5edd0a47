use crate::effect::Effect;
use crate::mvi::Reducer;

/// Wraps a reducer and logs every transition at `debug` level.
pub struct PrintChanges<R> {
    inner: R,
    label: &'static str,
}

impl<R: Reducer> PrintChanges<R> {
    pub fn new(inner: R, label: &'static str) -> Self {
        Self { inner, label }
    }
}

impl<R: Reducer> Reducer for PrintChanges<R> {
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: R::State, action: R::Action) -> (R::State, Effect<R::Action>) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return self.inner.reduce(state, action);
        }

        let before = state.clone();
        let (after, effect) = self.inner.reduce(state, action.clone());
        if after == before {
            tracing::debug!(feature = self.label, action = ?action, "No state changes");
        } else {
            tracing::debug!(
                feature = self.label,
                action = ?action,
                before = ?before,
                after = ?after,
                "State changed"
            );
        }
        (after, effect)
    }
}
