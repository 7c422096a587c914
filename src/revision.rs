//! Optimistic concurrency revisions shared by every persisted aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic revision counter stamped on each aggregate write.
///
/// Repositories accept an update only when the stored revision matches the
/// revision the caller loaded, so two racing check-then-write operations on
/// the same aggregate cannot both commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// Revision of a freshly created aggregate.
    pub const INITIAL: Self = Self(0);

    /// Creates a revision from a persisted value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the revision that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
