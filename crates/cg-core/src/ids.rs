//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub`; prefer
//! the `.index()` helper when indexing a `Vec`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identifier painted into every cell of one building footprint.
    ///
    /// Assigned sequentially from 1; `BuildingId(0)` is never placed.
    pub struct BuildingId(u32);
}

typed_id! {
    /// Position of a node in the graph's node arena.
    pub struct NodeIndex(u32);
}

typed_id! {
    /// Position of an edge in the graph's edge list.
    pub struct EdgeIndex(u32);
}

impl BuildingId {
    /// The first id handed out by a fresh grid.
    pub const FIRST: BuildingId = BuildingId(1);

    /// The id following `self`.
    #[inline]
    pub fn next(self) -> BuildingId {
        BuildingId(self.0 + 1)
    }

    /// Iterate `FIRST .. end` (exclusive), i.e. every id placed on a grid
    /// whose `next_building_id` is `end`.
    pub fn range_to(end: BuildingId) -> impl Iterator<Item = BuildingId> {
        (Self::FIRST.0..end.0.max(Self::FIRST.0)).map(BuildingId)
    }
}
