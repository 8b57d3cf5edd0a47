//! Base trait for feature state in MVI architecture.

use std::fmt::Debug;

/// Marker trait for feature state objects.
///
/// States should be:
/// - Cloneable (observers receive snapshots)
/// - Comparable (PartialEq for detecting changes)
/// - Defaultable (the store swaps the value out while reducing)
pub trait FeatureState: Clone + PartialEq + Default + Debug + Send + 'static {}
