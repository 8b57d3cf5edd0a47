//! Reducer combinators.
//!
//! - [`IfLet`]: run an optional child feature inside a parent
//! - [`PrintChanges`]: log every transition of a reducer

mod if_let;
mod print_changes;

use crate::effect::CancelId;
use crate::mvi::Reducer;

pub use if_let::IfLet;
pub use print_changes::PrintChanges;

/// Envelope a parent uses to route actions to an optional child.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationAction<A> {
    /// An action for the presented child.
    Presented(A),
    /// Clear the child's state and tear down its effects.
    Dismiss,
}

/// Combinator methods available on every reducer.
pub trait ReducerExt: Reducer + Sized {
    /// Embed `child` into the optional slot returned by `slot`.
    ///
    /// `extract` picks child-bound actions out of the parent's action type
    /// and `embed` wraps child output back into it. Child effects are
    /// registered under `namespace`, so clearing the slot cancels them all.
    fn if_let<C: Reducer>(
        self,
        child: C,
        namespace: impl Into<CancelId>,
        slot: fn(&mut Self::State) -> &mut Option<C::State>,
        extract: fn(&Self::Action) -> Option<&PresentationAction<C::Action>>,
        embed: fn(PresentationAction<C::Action>) -> Self::Action,
    ) -> IfLet<Self, C> {
        IfLet::new(self, child, namespace.into(), slot, extract, embed)
    }

    /// Log each action with the state change it caused.
    fn print_changes(self, label: &'static str) -> PrintChanges<Self> {
        PrintChanges::new(self, label)
    }
}

impl<R: Reducer> ReducerExt for R {}
