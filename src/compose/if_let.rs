use std::sync::Arc;

use super::PresentationAction;
use crate::effect::{CancelId, Effect};
use crate::mvi::Reducer;

/// Parent reducer with an optional child feature embedded in its state.
///
/// For a child-bound action the child reducer runs first, then the parent
/// sees the same action (typically to react to delegate actions). A
/// `Dismiss` clears the slot after the parent has seen it. Whenever the
/// slot goes from present to absent, every effect under the child's
/// namespace is cancelled.
///
/// The parent should change a presented child only through child actions.
/// If the parent's own transition leaves a different child in an occupied
/// slot, that is a new presentation and the old child's effects are
/// cancelled as well.
pub struct IfLet<P: Reducer, C: Reducer> {
    parent: P,
    child: C,
    namespace: CancelId,
    slot: fn(&mut P::State) -> &mut Option<C::State>,
    extract: fn(&P::Action) -> Option<&PresentationAction<C::Action>>,
    embed: fn(PresentationAction<C::Action>) -> P::Action,
}

impl<P: Reducer, C: Reducer> IfLet<P, C> {
    pub fn new(
        parent: P,
        child: C,
        namespace: CancelId,
        slot: fn(&mut P::State) -> &mut Option<C::State>,
        extract: fn(&P::Action) -> Option<&PresentationAction<C::Action>>,
        embed: fn(PresentationAction<C::Action>) -> P::Action,
    ) -> Self {
        Self {
            parent,
            child,
            namespace,
            slot,
            extract,
            embed,
        }
    }

    pub fn namespace(&self) -> &CancelId {
        &self.namespace
    }

    /// Rewrite a child effect into the parent's action and id space.
    fn lift(&self, effect: Effect<C::Action>) -> Effect<P::Action> {
        let embed = self.embed;
        match effect {
            Effect::None => Effect::None,
            Effect::Send(action) => Effect::Send(embed(PresentationAction::Presented(action))),
            Effect::Run(task) => {
                let id = task
                    .id()
                    .cloned()
                    .unwrap_or_else(CancelId::unique)
                    .scoped(&self.namespace);
                Effect::Run(task.with_id(id).map(Arc::new(move |action: C::Action| {
                    embed(PresentationAction::Presented(action))
                })))
            }
            Effect::Cancel(id) => Effect::Cancel(id.scoped(&self.namespace)),
            Effect::Dismiss => Effect::Send(embed(PresentationAction::Dismiss)),
            Effect::Merge(effects) => {
                Effect::Merge(effects.into_iter().map(|effect| self.lift(effect)).collect())
            }
        }
    }
}

impl<P: Reducer, C: Reducer> Reducer for IfLet<P, C> {
    type State = P::State;
    type Action = P::Action;

    fn reduce(&self, mut state: P::State, action: P::Action) -> (P::State, Effect<P::Action>) {
        let was_present = (self.slot)(&mut state).is_some();
        let mut child_effect = Effect::None;
        let mut dismissing = false;

        match (self.extract)(&action).cloned() {
            Some(PresentationAction::Presented(child_action)) => {
                let slot = (self.slot)(&mut state);
                match slot.take() {
                    Some(child_state) => {
                        let (next, effect) = self.child.reduce(child_state, child_action);
                        *slot = Some(next);
                        child_effect = self.lift(effect);
                    }
                    None => {
                        tracing::warn!(
                            namespace = %self.namespace,
                            action = ?child_action,
                            "Child action received while child is not presented; ignored"
                        );
                    }
                }
            }
            Some(PresentationAction::Dismiss) => dismissing = true,
            None => {}
        }

        let child_before_parent = (self.slot)(&mut state).clone();
        let (mut state, parent_effect) = self.parent.reduce(state, action);

        let replaced = match (&child_before_parent, (self.slot)(&mut state).as_ref()) {
            (Some(before), Some(after)) => before != after,
            _ => false,
        };
        if replaced {
            tracing::debug!(namespace = %self.namespace, "Child replaced by parent");
        }

        if dismissing && (self.slot)(&mut state).take().is_some() {
            tracing::debug!(namespace = %self.namespace, "Child dismissed");
        }

        let teardown = if was_present && (replaced || (self.slot)(&mut state).is_none()) {
            Effect::cancel(self.namespace.clone())
        } else {
            Effect::none()
        };

        (state, Effect::merge([child_effect, parent_effect, teardown]))
    }
}
