//! Base trait for actions (user/system events) in MVI architecture.

use std::fmt::Debug;

/// Marker trait for action objects.
///
/// Actions represent:
/// - User actions (button taps, text edits)
/// - Effect output (timer ticks, API responses)
/// - Child-to-parent notifications (delegate actions)
///
/// Actions are processed by reducers to produce new states. They are
/// cloned when a composed reducer hands the same action to a child and
/// to its parent.
pub trait Action: Clone + Debug + Send + 'static {}
