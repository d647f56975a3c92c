//! Dense cell storage and the read contract consumed by graph extraction.

use std::collections::BTreeSet;
use std::fmt;

use cg_core::{BuildingId, CoreError, Pos};

use crate::{Cell, GridError, GridResult};

// ── CellGrid ──────────────────────────────────────────────────────────────────

/// Read-only view of a populated city grid.
///
/// Implementors guarantee that every id in `1..next_building_id()` was
/// actually placed and that `cell` answers `Some` exactly for positions inside
/// `width × height`.
pub trait CellGrid {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Cell at `(x, y)`, or `None` outside the grid.
    fn cell(&self, x: i32, y: i32) -> Option<Cell>;

    /// Exclusive upper bound of assigned building ids.
    fn next_building_id(&self) -> BuildingId;

    /// Building ids flagged as warehouses.
    fn warehouse_ids(&self) -> &BTreeSet<BuildingId>;

    #[inline]
    fn in_bounds(&self, p: Pos) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width() && (p.y as u32) < self.height()
    }

    #[inline]
    fn cell_at(&self, p: Pos) -> Option<Cell> {
        self.cell(p.x, p.y)
    }

    /// `true` only for in-bounds road cells.
    #[inline]
    fn is_road(&self, p: Pos) -> bool {
        self.cell(p.x, p.y).is_some_and(Cell::is_road)
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Row-major `width × height` cell array plus building bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width:            u32,
    height:           u32,
    cells:            Vec<Cell>,
    next_building_id: BuildingId,
    warehouses:       BTreeSet<BuildingId>,
}

impl Grid {
    /// An all-empty grid.  Both dimensions must be positive.
    pub fn new(width: u32, height: u32) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height }.into());
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
            next_building_id: BuildingId::FIRST,
            warehouses: BTreeSet::new(),
        })
    }

    /// Wrap raw cell data without checking building consistency.
    ///
    /// Used to load grids produced elsewhere; graph extraction reports any
    /// inconsistency between `cells`, `next_building_id` and `warehouses`.
    pub fn from_cells(
        width:            u32,
        height:           u32,
        cells:            Vec<Cell>,
        next_building_id: BuildingId,
        warehouses:       BTreeSet<BuildingId>,
    ) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height }.into());
        }
        if cells.len() != width as usize * height as usize {
            return Err(GridError::CellCountMismatch { width, height, got: cells.len() });
        }
        Ok(Self { width, height, cells, next_building_id, warehouses })
    }

    /// Erase every cell and forget all buildings and warehouses.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
        self.next_building_id = BuildingId::FIRST;
        self.warehouses.clear();
    }

    #[inline]
    fn offset(&self, p: Pos) -> Option<usize> {
        self.in_bounds(p)
            .then(|| p.y as usize * self.width as usize + p.x as usize)
    }

    /// Overwrite one cell.  No building bookkeeping is touched.
    pub fn set_cell(&mut self, p: Pos, cell: Cell) -> GridResult<()> {
        let i = self.offset(p).ok_or(GridError::OutOfBounds(p))?;
        self.cells[i] = cell;
        Ok(())
    }

    pub fn set_road(&mut self, p: Pos) -> GridResult<()> {
        self.set_cell(p, Cell::Road)
    }

    /// Paint the full row `y` as road.  Returns the number of newly painted
    /// cells; rows outside the grid paint nothing.
    pub fn fill_road_row(&mut self, y: i32) -> usize {
        let mut painted = 0;
        for x in 0..self.width as i32 {
            if let Some(i) = self.offset(Pos::new(x, y)) {
                if !self.cells[i].is_road() {
                    self.cells[i] = Cell::Road;
                    painted += 1;
                }
            }
        }
        painted
    }

    /// Paint the full column `x` as road.  See [`fill_road_row`](Self::fill_road_row).
    pub fn fill_road_column(&mut self, x: i32) -> usize {
        let mut painted = 0;
        for y in 0..self.height as i32 {
            if let Some(i) = self.offset(Pos::new(x, y)) {
                if !self.cells[i].is_road() {
                    self.cells[i] = Cell::Road;
                    painted += 1;
                }
            }
        }
        painted
    }

    /// Place a `w × h` building with its top-left corner at `(x, y)`.
    ///
    /// Fails without side effects (returns `None`) when any cell is outside
    /// the grid or not empty; otherwise paints the footprint with the next id.
    pub fn place_building(&mut self, x: i32, y: i32, w: u32, h: u32) -> Option<BuildingId> {
        if w == 0 || h == 0 {
            return None;
        }
        let (x1, y1) = (x + w as i32 - 1, y + h as i32 - 1);
        for yy in y..=y1 {
            for xx in x..=x1 {
                if self.cell(xx, yy) != Some(Cell::Empty) {
                    return None;
                }
            }
        }

        let id = self.next_building_id;
        for yy in y..=y1 {
            for xx in x..=x1 {
                let i = yy as usize * self.width as usize + xx as usize;
                self.cells[i] = Cell::Building(id);
            }
        }
        self.next_building_id = id.next();
        Some(id)
    }

    /// `true` if any cell of the one-cell ring around the rectangle (corners
    /// included) is road.
    pub fn is_adjacent_to_road(&self, x: i32, y: i32, w: u32, h: u32) -> bool {
        let (w, h) = (w as i32, h as i32);
        for xx in (x - 1)..=(x + w) {
            if self.is_road(Pos::new(xx, y - 1)) || self.is_road(Pos::new(xx, y + h)) {
                return true;
            }
        }
        for yy in (y - 1)..=(y + h) {
            if self.is_road(Pos::new(x - 1, yy)) || self.is_road(Pos::new(x + w, yy)) {
                return true;
            }
        }
        false
    }

    /// Flag a placed building as a warehouse.
    pub fn mark_warehouse(&mut self, id: BuildingId) -> GridResult<()> {
        if id < BuildingId::FIRST || id >= self.next_building_id {
            return Err(GridError::UnknownBuilding { id, next: self.next_building_id });
        }
        self.warehouses.insert(id);
        Ok(())
    }

    /// Number of buildings placed so far.
    #[inline]
    pub fn building_count(&self) -> usize {
        (self.next_building_id.0 - BuildingId::FIRST.0) as usize
    }

    /// Number of road cells.
    pub fn road_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_road()).count()
    }

    /// Row-major cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl CellGrid for Grid {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.offset(Pos::new(x, y)).map(|i| self.cells[i])
    }

    #[inline]
    fn next_building_id(&self) -> BuildingId {
        self.next_building_id
    }

    #[inline]
    fn warehouse_ids(&self) -> &BTreeSet<BuildingId> {
        &self.warehouses
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width as usize) {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
