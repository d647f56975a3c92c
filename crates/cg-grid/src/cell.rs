//! Per-cell classification.

use std::fmt;

use cg_core::BuildingId;

/// What occupies one grid square.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Road,
    Building(BuildingId),
}

impl Cell {
    #[inline]
    pub fn is_road(self) -> bool {
        matches!(self, Cell::Road)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The building id, if this cell belongs to a footprint.
    #[inline]
    pub fn building(self) -> Option<BuildingId> {
        match self {
            Cell::Building(id) => Some(id),
            _ => None,
        }
    }

    /// Glyph used by the text rendering of a grid.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty       => '_',
            Cell::Road        => '▮',
            Cell::Building(_) => '⌂',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
