//! Integer grid geometry: cell positions, inclusive bounding boxes, axes.
//!
//! Coordinates are signed so that neighbourhood probes may step outside the
//! grid (`x = -1`) without wrapping; the grid itself decides what lies out of
//! bounds.  `x` grows to the right (columns), `y` grows downward (rows).

use std::fmt;

// ── Pos ───────────────────────────────────────────────────────────────────────

/// One grid cell coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `self` shifted by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Pos {
        Pos::new(self.x + dx, self.y + dy)
    }

    /// Coordinate along `axis` (`x` for horizontal, `y` for vertical).
    #[inline]
    pub fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical   => self.y,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Up, down, left, right.
pub const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// The four diagonal neighbours.
pub const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

// ── Axis ──────────────────────────────────────────────────────────────────────

/// Direction a straight road strip runs in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Runs along `x`; its width is measured on `y`.
    Horizontal,
    /// Runs along `y`; its width is measured on `x`.
    Vertical,
}

impl Axis {
    /// Build a position from a coordinate along this axis and one across it.
    #[inline]
    pub fn pos(self, along: i32, across: i32) -> Pos {
        match self {
            Axis::Horizontal => Pos::new(along, across),
            Axis::Vertical   => Pos::new(across, along),
        }
    }
}

// ── BBox ──────────────────────────────────────────────────────────────────────

/// Inclusive axis-aligned bounding box in cell coordinates.
///
/// Constructors always produce the canonical form (`min <= max` on both
/// axes), so structural equality doubles as node identity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BBox {
    /// Box spanning two arbitrary corners.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Single-cell box.
    #[inline]
    pub fn from_pos(p: Pos) -> Self {
        Self { min_x: p.x, min_y: p.y, max_x: p.x, max_y: p.y }
    }

    /// Smallest box containing every position, or `None` for an empty input.
    pub fn enclosing<I: IntoIterator<Item = Pos>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = BBox::from_pos(it.next()?);
        Some(it.fold(first, BBox::expanded))
    }

    /// `self` grown to include `p`.
    #[inline]
    pub fn expanded(self, p: Pos) -> Self {
        Self {
            min_x: self.min_x.min(p.x),
            min_y: self.min_y.min(p.y),
            max_x: self.max_x.max(p.x),
            max_y: self.max_y.max(p.y),
        }
    }

    /// Number of columns covered.
    #[inline]
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x + 1) as u32
    }

    /// Number of rows covered.
    #[inline]
    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y + 1) as u32
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Extent measured across `axis`: the width of a strip running along it.
    #[inline]
    pub fn extent_across(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.height(),
            Axis::Vertical   => self.width(),
        }
    }

    /// `(min, max)` along `axis`.
    #[inline]
    pub fn span_along(&self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::Horizontal => (self.min_x, self.max_x),
            Axis::Vertical   => (self.min_y, self.max_y),
        }
    }

    /// `(min, max)` across `axis`.
    #[inline]
    pub fn span_across(&self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::Horizontal => (self.min_y, self.max_y),
            Axis::Vertical   => (self.min_x, self.max_x),
        }
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    #[inline]
    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Every cell in the box, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.min_y..=self.max_y)
            .flat_map(move |y| (self.min_x..=self.max_x).map(move |x| Pos::new(x, y)))
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{} .. {},{}]", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}
