//! Unidirectional state management: a store applies actions to state
//! through a pure reducer, and asynchronous effects feed their results
//! back in as further actions.

pub mod clock;
pub mod compose;
pub mod config;
pub mod effect;
pub mod facts;
pub mod features;
pub mod identified;
pub mod logging;
pub mod mvi;
pub mod store;
pub mod testing;
