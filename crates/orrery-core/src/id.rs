//! Strongly-typed body identifiers.

use std::fmt;

/// Identifies a body within a simulation run.
///
/// Bodies live in contiguous vectors and are addressed by handle, never by
/// object identity. Ids are allocated from a monotonic counter owned by the
/// simulation that created them; a body produced by a merge always receives
/// a fresh id, so an id observed once never silently changes meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BodyId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
