//! Cancellation identifiers for in-flight effects.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

/// Key identifying a class of in-flight effects.
///
/// An id is a path of segments (`"add_contact/timer"`). Cancelling an id
/// also cancels every id nested below it, which is how an embedded child
/// feature's effects are torn down together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CancelId {
    segments: Arc<[String]>,
}

impl CancelId {
    /// Single-segment id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            segments: Arc::from(vec![name.into()]),
        }
    }

    /// Fresh id that cannot collide with any other.
    ///
    /// Used for effects that were not given an id so they can still be
    /// tracked and torn down.
    pub fn unique() -> Self {
        Self::new(format!("anon-{}", Uuid::new_v4()))
    }

    /// Id nested one level below `self`.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.to_vec();
        segments.push(name.into());
        Self {
            segments: Arc::from(segments),
        }
    }

    /// Re-root this id under `namespace`.
    pub fn scoped(&self, namespace: &CancelId) -> Self {
        let segments: Vec<String> = namespace
            .segments
            .iter()
            .chain(self.segments.iter())
            .cloned()
            .collect();
        Self {
            segments: Arc::from(segments),
        }
    }

    /// True if `other` is this id or nested below it.
    pub fn contains(&self, other: &CancelId) -> bool {
        other.segments.starts_with(&self.segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for CancelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl From<&str> for CancelId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CancelId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
