//! Grid → graph extraction pipeline.
//!
//! 1. Building and warehouse nodes, one per placed id.
//! 2. Cell classification, then intersection and dead-end region merging.
//! 3. Dead-end pairing and strip tracing to create edges.
//!
//! The grid is only read.  The graph is published once fully built; any
//! inconsistency aborts extraction with a [`GraphError`].

use std::collections::HashSet;

use log::debug;

use cg_core::{BBox, BuildingId, NodeIndex, Pos};
use cg_grid::{Cell, CellGrid};

use crate::classify::Classification;
use crate::index::BoxIndex;
use crate::merge::{merge_dead_ends, merge_intersections};
use crate::trace::{pair_dead_ends, trace_pair};
use crate::{CityGraph, CityGraphBuilder, GraphError, GraphResult, NodeKind};

/// One building footprint found on the grid.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Footprint {
    pub id:   BuildingId,
    pub bbox: BBox,
    pub kind: NodeKind,
}

/// Build the road-topology graph of `grid`.
pub fn extract_graph<G: CellGrid + Sync + ?Sized>(grid: &G) -> GraphResult<CityGraph> {
    let (width, height) = (grid.width(), grid.height());
    if width == 0 || height == 0 {
        return Err(GraphError::InvalidGridDimensions { width, height });
    }

    let footprints = building_footprints(grid)?;
    let classes    = Classification::compute(grid);
    let junctions  = merge_intersections(&classes);
    let termini    = merge_dead_ends(&classes);

    let mut graph = CityGraphBuilder::with_capacity(
        footprints.len() + junctions.len() + termini.len(),
        footprints.len() + 4 * junctions.len() + termini.len(),
    );

    for fp in &footprints {
        graph.add_node(fp.bbox, fp.kind, Some(fp.id))?;
    }
    for &bbox in &junctions {
        graph.add_node(bbox, NodeKind::Intersection, None)?;
    }
    let mut ends: Vec<(NodeIndex, BBox)> = Vec::with_capacity(termini.len());
    for &bbox in &termini {
        ends.push((graph.add_node(bbox, NodeKind::RoadEnd, None)?, bbox));
    }
    graph.check_overlaps()?;

    // Dead ends are endpoints of a trace, never stops along one.
    let candidates = BoxIndex::build(
        graph
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind != NodeKind::RoadEnd)
            .map(|(i, n)| (NodeIndex(i as u32), n.bbox)),
    );

    let pairs = pair_dead_ends(grid, &ends);
    let mut consumed = HashSet::new();
    let mut edges = 0;
    for pair in &pairs {
        consumed.clear();
        edges += trace_pair(pair, &candidates, &mut consumed, &mut graph);
    }

    debug!(
        "extracted graph: {} footprints, {} intersections, {} dead ends ({} pairs), {edges} edges",
        footprints.len(),
        junctions.len(),
        termini.len(),
        pairs.len(),
    );

    graph.build()
}

/// Bounding box and kind of every id in `1..next_building_id`.
///
/// Fails when the range holds more ids than the grid has cells, when an id in
/// range has no cells, when its cells do not fill their bounding box, when a
/// cell carries an id outside the range, or when a warehouse id is outside
/// the range.
pub fn building_footprints<G: CellGrid + ?Sized>(grid: &G) -> GraphResult<Vec<Footprint>> {
    let next = grid.next_building_id();
    let in_range = |id: BuildingId| id >= BuildingId::FIRST && id < next;

    if let Some(&id) = grid.warehouse_ids().iter().find(|&&id| !in_range(id)) {
        return Err(GraphError::InconsistentBuildingId {
            id,
            reason: "warehouse id outside the placed range",
        });
    }

    // Every placed id owns at least one cell.
    let grid_cells = grid.width() as u64 * grid.height() as u64;
    if next.0 as u64 > grid_cells + 1 {
        return Err(GraphError::InconsistentBuildingId {
            id:     next,
            reason: "more ids in range than cells on the grid",
        });
    }

    // Indexed by id; slot 0 is never used.
    let mut seen: Vec<Option<(BBox, u64)>> = vec![None; next.index().max(1)];
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let Some(Cell::Building(id)) = grid.cell(x, y) else { continue };
            if !in_range(id) {
                return Err(GraphError::InconsistentBuildingId {
                    id,
                    reason: "cell carries an id that was never assigned",
                });
            }
            let p = Pos::new(x, y);
            seen[id.index()] = Some(match seen[id.index()] {
                Some((bbox, n)) => (bbox.expanded(p), n + 1),
                None => (BBox::from_pos(p), 1),
            });
        }
    }

    BuildingId::range_to(next)
        .map(|id| {
            let Some((bbox, cells)) = seen[id.index()] else {
                return Err(GraphError::InconsistentBuildingId { id, reason: "no cells carry this id" });
            };
            if bbox.area() != cells {
                return Err(GraphError::InconsistentBuildingId {
                    id,
                    reason: "footprint is not a solid rectangle",
                });
            }
            let kind = if grid.warehouse_ids().contains(&id) {
                NodeKind::Warehouse
            } else {
                NodeKind::Building
            };
            Ok(Footprint { id, bbox, kind })
        })
        .collect()
}
