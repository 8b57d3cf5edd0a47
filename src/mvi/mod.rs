//! Model-View-Intent (MVI) primitives.
//!
//! Base traits for unidirectional data flow between a UI layer and the
//! store.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ (State, Effect) ──→ View
//!    ↑                        │
//!    └──── effect output ─────┘
//! ```
//!
//! - **State**: Value owned by exactly one store
//! - **Action**: User input or effect output
//! - **Reducer**: Pure function from (State, Action) to (State, Effect)

mod action;
mod reducer;
mod state;

pub use action::Action;
pub use reducer::Reducer;
pub use state::FeatureState;
