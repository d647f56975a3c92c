//! Per-cell road topology tests.
//!
//! Every road cell gets two neighbour sums, one over its orthogonal
//! neighbours and one over its diagonal neighbours.  A neighbour contributes
//! 1 when it is out of bounds or not road.  From those sums:
//!
//! | Class                | Test (in order)                                          |
//! |----------------------|----------------------------------------------------------|
//! | `DeadEndCorner`      | both sets touch the border, both sums `> 0`              |
//! | `IntersectionCorner` | orthogonal sum `== 0`, diagonal sum `!= 0`               |
//! | `PlainRoad`          | anything else                                            |
//!
//! A road that stops short of the border is not a dead end under these rules;
//! its terminal cells are `PlainRoad`.

use log::debug;

use cg_core::{DIAGONAL, ORTHOGONAL, Pos};
use cg_grid::CellGrid;

/// Non-road count over one neighbour set.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct NeighborSum {
    /// Neighbours that are out of bounds or not road (0..=4).
    pub sum:     u8,
    /// At least one neighbour in the set lies outside the grid.
    pub on_edge: bool,
}

impl NeighborSum {
    fn over<G: CellGrid + ?Sized>(grid: &G, p: Pos, dirs: &[(i32, i32); 4]) -> Self {
        let mut out = NeighborSum::default();
        for &(dx, dy) in dirs {
            let n = p.offset(dx, dy);
            if !grid.in_bounds(n) {
                out.sum += 1;
                out.on_edge = true;
            } else if !grid.is_road(n) {
                out.sum += 1;
            }
        }
        out
    }
}

/// Both neighbour sums of one road cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct CellProbe {
    pub orthogonal: NeighborSum,
    pub diagonal:   NeighborSum,
}

impl CellProbe {
    pub fn of<G: CellGrid + ?Sized>(grid: &G, p: Pos) -> Self {
        Self {
            orthogonal: NeighborSum::over(grid, p, &ORTHOGONAL),
            diagonal:   NeighborSum::over(grid, p, &DIAGONAL),
        }
    }

    /// Apply the classification table.
    pub fn class(&self) -> RoadClass {
        let (o, d) = (self.orthogonal, self.diagonal);
        if o.on_edge && d.on_edge && o.sum > 0 && d.sum > 0 {
            RoadClass::DeadEndCorner
        } else if o.sum == 0 && d.sum != 0 {
            RoadClass::IntersectionCorner
        } else {
            RoadClass::PlainRoad
        }
    }

    /// All eight neighbours are road: the cell sits strictly inside a
    /// junction.
    #[inline]
    pub fn is_deep_interior(&self) -> bool {
        self.orthogonal.sum == 0 && self.diagonal.sum == 0
    }
}

/// Topological role of one road cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoadClass {
    PlainRoad,
    IntersectionCorner,
    DeadEndCorner,
}

// ── Classification ────────────────────────────────────────────────────────────

/// Probes for every road cell of a grid, plus the corner lists in row-major
/// order.
///
/// Pure function of the grid; the grid is not modified.
#[derive(Clone, Debug)]
pub struct Classification {
    width:  u32,
    height: u32,
    /// Row-major; `None` for cells that are not road.
    probes: Vec<Option<CellProbe>>,
    pub intersection_corners: Vec<Pos>,
    pub dead_end_corners:     Vec<Pos>,
}

impl Classification {
    /// Probe every cell of `grid`.
    ///
    /// With the `parallel` feature rows are probed on the Rayon pool; the
    /// result is identical to the sequential scan.
    pub fn compute<G: CellGrid + Sync + ?Sized>(grid: &G) -> Self {
        let (width, height) = (grid.width(), grid.height());

        #[cfg(not(feature = "parallel"))]
        let probes: Vec<Option<CellProbe>> = (0..height as i32)
            .flat_map(|y| probe_row(grid, y))
            .collect();

        #[cfg(feature = "parallel")]
        let probes: Vec<Option<CellProbe>> = {
            use rayon::prelude::*;
            (0..height as i32)
                .into_par_iter()
                .map(|y| probe_row(grid, y))
                .collect::<Vec<_>>()
                .into_iter()
                .flatten()
                .collect()
        };

        let mut intersection_corners = Vec::new();
        let mut dead_end_corners = Vec::new();
        for (i, probe) in probes.iter().enumerate() {
            let Some(probe) = probe else { continue };
            let p = Pos::new((i % width as usize) as i32, (i / width as usize) as i32);
            match probe.class() {
                RoadClass::IntersectionCorner => intersection_corners.push(p),
                RoadClass::DeadEndCorner      => dead_end_corners.push(p),
                RoadClass::PlainRoad          => {}
            }
        }

        debug!(
            "classified {width}x{height} grid: {} intersection corners, {} dead-end corners",
            intersection_corners.len(),
            dead_end_corners.len(),
        );

        Self { width, height, probes, intersection_corners, dead_end_corners }
    }

    #[inline]
    fn offset(&self, p: Pos) -> Option<usize> {
        (p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height)
            .then(|| p.y as usize * self.width as usize + p.x as usize)
    }

    /// Probe of the cell at `p`; `None` when it is not an in-bounds road cell.
    #[inline]
    pub fn probe(&self, p: Pos) -> Option<CellProbe> {
        self.offset(p).and_then(|i| self.probes[i])
    }

    #[inline]
    pub fn is_road(&self, p: Pos) -> bool {
        self.probe(p).is_some()
    }

    /// Class of the cell at `p`; `None` when it is not road.
    #[inline]
    pub fn class(&self, p: Pos) -> Option<RoadClass> {
        self.probe(p).map(|pr| pr.class())
    }

    #[inline]
    pub fn is_deep_interior(&self, p: Pos) -> bool {
        self.probe(p).is_some_and(|pr| pr.is_deep_interior())
    }

    /// Number of road cells seen.
    pub fn road_cells(&self) -> usize {
        self.probes.iter().filter(|p| p.is_some()).count()
    }
}

fn probe_row<G: CellGrid + ?Sized>(grid: &G, y: i32) -> Vec<Option<CellProbe>> {
    (0..grid.width() as i32)
        .map(|x| {
            let p = Pos::new(x, y);
            grid.is_road(p).then(|| CellProbe::of(grid, p))
        })
        .collect()
}
