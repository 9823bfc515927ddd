//! Strongly-typed identifiers and the [`Lineage`] type alias.

use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ClassId`] allocation.
static CLASS_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identity of a class type.
///
/// Allocated from a monotonic atomic counter via [`ClassId::next`]. Two
/// classes built from identical declarations still receive different IDs.
/// The abstract base produced by a build and each concrete subclass derived
/// from it all have distinct IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u64);

impl ClassId {
    /// Allocate a fresh, unique class ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(CLASS_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a slot in a shared storage table.
///
/// A slot is allocated the first time a shared field is declared and is
/// carried unchanged by every subclass that inherits the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SharedSlot(pub u32);

impl fmt::Display for SharedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SharedSlot {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// The chain of abstract base identities a class descends from, nearest first.
///
/// Uses `SmallVec<[ClassId; 4]>` since inheritance chains are shallow in
/// practice; deeper chains spill to the heap transparently.
pub type Lineage = SmallVec<[ClassId; 4]>;
