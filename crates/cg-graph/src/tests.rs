//! Unit tests for cg-graph.
//!
//! All scenario grids are hand-painted; property tests use seeded layouts.

#[cfg(test)]
mod helpers {
    use cg_core::{BBox, CityRng, LayoutConfig};
    use cg_grid::{Grid, LayoutGenerator};

    use crate::{CityGraph, NodeKind};

    /// `w × h` grid with full-length roads on the given rows and columns.
    pub fn crossing_grid(w: u32, h: u32, rows: &[i32], cols: &[i32]) -> Grid {
        let mut g = Grid::new(w, h).unwrap();
        for &y in rows {
            g.fill_road_row(y);
        }
        for &x in cols {
            g.fill_road_column(x);
        }
        g
    }

    pub fn generated(seed: u64, w: u32, h: u32) -> Grid {
        let cfg = LayoutConfig { seed, ..Default::default() };
        LayoutGenerator::new(cfg)
            .unwrap()
            .generate(w, h, &mut CityRng::new(seed))
            .unwrap()
    }

    pub fn boxes_of(g: &CityGraph, kind: NodeKind) -> Vec<BBox> {
        let mut v: Vec<BBox> = g.nodes().filter(|n| n.1 == kind).map(|n| n.0).collect();
        v.sort();
        v
    }

    pub fn node(g: &CityGraph, bbox: BBox) -> cg_core::NodeIndex {
        g.node_by_box(&bbox).unwrap_or_else(|| panic!("no node at {bbox}"))
    }
}

// ── Cell classification ───────────────────────────────────────────────────────

#[cfg(test)]
mod classify {
    use cg_core::Pos;

    use super::helpers::crossing_grid;
    use crate::{Classification, NeighborSum, RoadClass};

    #[test]
    fn border_terminus_probe() {
        let g = crossing_grid(6, 6, &[3], &[]);
        let c = Classification::compute(&g);
        let probe = c.probe(Pos::new(0, 3)).unwrap();
        // Left is off-grid, up and down are empty.
        assert_eq!(probe.orthogonal, NeighborSum { sum: 3, on_edge: true });
        assert_eq!(probe.diagonal, NeighborSum { sum: 4, on_edge: true });
        assert_eq!(probe.class(), RoadClass::DeadEndCorner);
    }

    #[test]
    fn mid_strip_is_plain() {
        let g = crossing_grid(6, 6, &[3], &[]);
        let c = Classification::compute(&g);
        let probe = c.probe(Pos::new(2, 3)).unwrap();
        assert_eq!(probe.orthogonal, NeighborSum { sum: 2, on_edge: false });
        assert_eq!(c.class(Pos::new(2, 3)), Some(RoadClass::PlainRoad));
    }

    #[test]
    fn non_road_has_no_probe() {
        let g = crossing_grid(6, 6, &[3], &[]);
        let c = Classification::compute(&g);
        assert!(c.probe(Pos::new(0, 0)).is_none());
        assert!(c.probe(Pos::new(-1, 3)).is_none());
        assert_eq!(c.road_cells(), 6);
    }

    #[test]
    fn single_cell_crossing_is_corner() {
        let g = crossing_grid(7, 7, &[3], &[3]);
        let c = Classification::compute(&g);
        assert_eq!(c.intersection_corners, [Pos::new(3, 3)]);
        assert_eq!(
            c.dead_end_corners,
            [Pos::new(3, 0), Pos::new(0, 3), Pos::new(6, 3), Pos::new(3, 6)]
        );
    }

    #[test]
    fn wide_overlap_centre_is_deep_interior() {
        let g = crossing_grid(12, 12, &[4, 5, 6], &[4, 5, 6]);
        let c = Classification::compute(&g);
        assert!(c.is_deep_interior(Pos::new(5, 5)));
        assert!(c.is_deep_interior(Pos::new(5, 4)));
        assert_eq!(c.class(Pos::new(5, 5)), Some(RoadClass::PlainRoad));
        assert_eq!(
            c.intersection_corners,
            [Pos::new(4, 4), Pos::new(6, 4), Pos::new(4, 6), Pos::new(6, 6)]
        );
    }

    #[test]
    fn mid_grid_stub_is_not_a_dead_end() {
        let mut g = cg_grid::Grid::new(6, 6).unwrap();
        for x in 0..3 {
            g.set_road(Pos::new(x, 3)).unwrap();
        }
        let c = Classification::compute(&g);
        assert_eq!(c.class(Pos::new(2, 3)), Some(RoadClass::PlainRoad));
        assert_eq!(c.dead_end_corners, [Pos::new(0, 3)]);
    }
}

// ── Region merging ────────────────────────────────────────────────────────────

#[cfg(test)]
mod merge {
    use cg_core::BBox;

    use super::helpers::crossing_grid;
    use crate::Classification;
    use crate::merge::{merge_dead_ends, merge_intersections};

    #[test]
    fn two_by_two_overlap_is_one_box() {
        let g = crossing_grid(10, 10, &[4, 5], &[4, 5]);
        let c = Classification::compute(&g);
        assert_eq!(c.intersection_corners.len(), 4);
        assert_eq!(merge_intersections(&c), [BBox::new(4, 4, 5, 5)]);
    }

    #[test]
    fn three_by_three_overlap_is_one_box() {
        let g = crossing_grid(12, 12, &[4, 5, 6], &[4, 5, 6]);
        let c = Classification::compute(&g);
        assert_eq!(merge_intersections(&c), [BBox::new(4, 4, 6, 6)]);
    }

    #[test]
    fn mixed_width_overlap() {
        // 1-wide row crossing a 2-wide column.
        let g = crossing_grid(10, 10, &[4], &[4, 5]);
        let c = Classification::compute(&g);
        assert_eq!(merge_intersections(&c), [BBox::new(4, 4, 5, 4)]);
    }

    #[test]
    fn separate_junctions_stay_separate() {
        let g = crossing_grid(12, 8, &[3], &[3, 8]);
        let c = Classification::compute(&g);
        assert_eq!(
            merge_intersections(&c),
            [BBox::new(3, 3, 3, 3), BBox::new(8, 3, 8, 3)]
        );
    }

    #[test]
    fn wide_terminus_merges_along_border() {
        let g = crossing_grid(10, 10, &[4, 5], &[]);
        let c = Classification::compute(&g);
        assert_eq!(
            merge_dead_ends(&c),
            [BBox::new(0, 4, 0, 5), BBox::new(9, 4, 9, 5)]
        );
    }

    #[test]
    fn three_wide_terminus_does_not_reach_across() {
        let g = crossing_grid(12, 12, &[4, 5, 6], &[]);
        let c = Classification::compute(&g);
        assert_eq!(
            merge_dead_ends(&c),
            [BBox::new(0, 4, 0, 6), BBox::new(11, 4, 11, 6)]
        );
    }

    #[test]
    fn opposite_termini_of_thin_road_do_not_merge() {
        let g = crossing_grid(6, 6, &[3], &[]);
        let c = Classification::compute(&g);
        assert_eq!(
            merge_dead_ends(&c),
            [BBox::new(0, 3, 0, 3), BBox::new(5, 3, 5, 3)]
        );
    }

    #[test]
    fn parallel_roads_ends_do_not_merge() {
        let g = crossing_grid(10, 10, &[2, 6], &[]);
        let c = Classification::compute(&g);
        assert_eq!(merge_dead_ends(&c).len(), 4);
    }

    #[test]
    fn two_column_grid_terminus_swallows_diagonal_corner() {
        // Every cell of the band touches the border; (1,3) shares no row or
        // column with the seed (0,2).
        let g = crossing_grid(2, 6, &[2, 3], &[]);
        let c = Classification::compute(&g);
        assert_eq!(c.dead_end_corners.len(), 4);
        assert_eq!(merge_dead_ends(&c), [BBox::new(0, 2, 1, 3)]);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use cg_core::{BBox, BuildingId, Pos};
    use cg_grid::Grid;

    use super::helpers::{boxes_of, crossing_grid, node};
    use crate::{NodeKind, extract_graph};

    #[test]
    fn straight_road_two_ends_one_edge() {
        let g = crossing_grid(6, 6, &[3], &[]);
        let graph = extract_graph(&g).unwrap();

        assert_eq!(
            boxes_of(&graph, NodeKind::RoadEnd),
            [BBox::new(0, 3, 0, 3), BBox::new(5, 3, 5, 3)]
        );
        assert_eq!(graph.count_kind(NodeKind::Intersection), 0);
        assert_eq!(graph.count_kind(NodeKind::Building), 0);
        assert_eq!(graph.count_kind(NodeKind::Warehouse), 0);

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges.len(), 1);
        let (a, b, weight, segment) = edges[0];
        assert_eq!((a, b), (BBox::new(0, 3, 0, 3), BBox::new(5, 3, 5, 3)));
        assert_eq!(weight, 1);
        assert_eq!(segment, Some(BBox::new(1, 3, 4, 3)));
    }

    #[test]
    fn single_cell_crossing() {
        let g = crossing_grid(7, 7, &[3], &[3]);
        let graph = extract_graph(&g).unwrap();

        assert_eq!(boxes_of(&graph, NodeKind::Intersection), [BBox::new(3, 3, 3, 3)]);
        assert_eq!(graph.count_kind(NodeKind::RoadEnd), 4);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.edges().all(|e| e.2 == 1));

        let centre = node(&graph, BBox::new(3, 3, 3, 3));
        assert_eq!(graph.degree(centre), 4);
        for end in boxes_of(&graph, NodeKind::RoadEnd) {
            let n = node(&graph, end);
            assert_eq!(graph.degree(n), 1);
            assert!(graph.edge_between(n, centre).is_some());
        }
    }

    #[test]
    fn crossing_segments_stop_at_the_junction() {
        let g = crossing_grid(7, 7, &[3], &[3]);
        let graph = extract_graph(&g).unwrap();
        let west = node(&graph, BBox::new(0, 3, 0, 3));
        let centre = node(&graph, BBox::new(3, 3, 3, 3));
        let east = node(&graph, BBox::new(6, 3, 6, 3));

        let e = graph.edge_between(west, centre).unwrap();
        assert_eq!(graph.edge(e).segment, Some(BBox::new(1, 3, 2, 3)));
        let e = graph.edge_between(centre, east).unwrap();
        assert_eq!(graph.edge(e).segment, Some(BBox::new(4, 3, 5, 3)));
    }

    #[test]
    fn building_beside_strip() {
        let mut g = crossing_grid(8, 8, &[4], &[]);
        let id = g.place_building(2, 0, 4, 4).unwrap();
        let graph = extract_graph(&g).unwrap();

        let house = node(&graph, BBox::new(2, 0, 5, 3));
        assert_eq!(graph.node(house).kind, NodeKind::Building);
        assert_eq!(graph.node(house).building, Some(id));
        // Bottom row of the footprint touches the strip's top flank.
        assert_eq!(graph.node(house).bbox.max_y + 1, 4);

        assert_eq!(graph.degree(house), 2);
        for e in graph.incident_edges(house) {
            assert_eq!(graph.edge(*e).weight, 1);
        }
        let west = node(&graph, BBox::new(0, 4, 0, 4));
        let east = node(&graph, BBox::new(7, 4, 7, 4));
        assert!(graph.edge_between(west, house).is_some());
        assert!(graph.edge_between(house, east).is_some());
        assert!(graph.edge_between(west, east).is_none());
    }

    #[test]
    fn building_below_wide_strip_gets_strip_width() {
        let mut g = crossing_grid(10, 10, &[3, 4], &[]);
        g.place_building(3, 5, 4, 4).unwrap();
        let graph = extract_graph(&g).unwrap();
        let house = node(&graph, BBox::new(3, 5, 6, 8));
        assert_eq!(graph.degree(house), 2);
        assert!(graph.incident_edges(house).iter().all(|e| graph.edge(*e).weight == 2));
    }

    #[test]
    fn no_buildings_placed() {
        let g = crossing_grid(10, 10, &[4], &[6]);
        assert_eq!(cg_grid::CellGrid::next_building_id(&g), BuildingId::FIRST);
        let graph = extract_graph(&g).unwrap();
        assert_eq!(graph.count_kind(NodeKind::Building), 0);
        assert_eq!(graph.count_kind(NodeKind::Warehouse), 0);
        assert!(graph.node_count() > 0);
    }

    #[test]
    fn wide_crossing_weights_are_two() {
        let g = crossing_grid(10, 10, &[4, 5], &[4, 5]);
        let graph = extract_graph(&g).unwrap();
        assert_eq!(boxes_of(&graph, NodeKind::Intersection), [BBox::new(4, 4, 5, 5)]);
        assert_eq!(
            boxes_of(&graph, NodeKind::RoadEnd),
            [
                BBox::new(0, 4, 0, 5),
                BBox::new(4, 0, 5, 0),
                BBox::new(4, 9, 5, 9),
                BBox::new(9, 4, 9, 5),
            ]
        );
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.edges().all(|e| e.2 == 2));
    }

    #[test]
    fn path_threads_junctions_and_buildings_in_order() {
        let mut g = crossing_grid(12, 8, &[3], &[3, 8]);
        // Bottom row of the footprint flanks row 3 between the two junctions.
        g.place_building(5, 1, 2, 2).unwrap();
        let graph = extract_graph(&g).unwrap();

        let west  = node(&graph, BBox::new(0, 3, 0, 3));
        let j1    = node(&graph, BBox::new(3, 3, 3, 3));
        let house = node(&graph, BBox::new(5, 1, 6, 2));
        let j2    = node(&graph, BBox::new(8, 3, 8, 3));
        let east  = node(&graph, BBox::new(11, 3, 11, 3));

        for (a, b) in [(west, j1), (j1, house), (house, j2), (j2, east)] {
            assert!(graph.edge_between(a, b).is_some(), "missing {a} - {b}");
        }
        assert!(graph.edge_between(j1, j2).is_none());
        // Four along the row, two along each column.
        assert_eq!(graph.edge_count(), 8);
    }

    #[test]
    fn two_column_grid_wide_road() {
        let g = crossing_grid(2, 6, &[2, 3], &[]);
        let graph = extract_graph(&g).unwrap();
        assert_eq!(boxes_of(&graph, NodeKind::RoadEnd), [BBox::new(0, 2, 1, 3)]);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn unpaired_dead_end_is_isolated_not_an_error() {
        let mut g = Grid::new(6, 6).unwrap();
        for x in 0..3 {
            g.set_road(Pos::new(x, 3)).unwrap();
        }
        let graph = extract_graph(&g).unwrap();
        assert_eq!(graph.count_kind(NodeKind::RoadEnd), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn building_without_road_is_zero_degree() {
        let mut g = Grid::new(6, 6).unwrap();
        g.place_building(1, 1, 2, 2).unwrap();
        let graph = extract_graph(&g).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.degree(node(&graph, BBox::new(1, 1, 2, 2))), 0);
    }

    #[test]
    fn warehouse_flag_sets_kind() {
        let mut g = crossing_grid(8, 8, &[4], &[]);
        let a = g.place_building(0, 0, 2, 2).unwrap();
        let b = g.place_building(3, 0, 2, 2).unwrap();
        g.mark_warehouse(b).unwrap();
        let graph = extract_graph(&g).unwrap();

        let na = node(&graph, BBox::new(0, 0, 1, 1));
        let nb = node(&graph, BBox::new(3, 0, 4, 1));
        assert_eq!((graph.node(na).kind, graph.node(na).building), (NodeKind::Building, Some(a)));
        assert_eq!((graph.node(nb).kind, graph.node(nb).building), (NodeKind::Warehouse, Some(b)));
    }

    #[test]
    fn nodes_at_finds_containing_box() {
        let mut g = crossing_grid(8, 8, &[4], &[]);
        g.place_building(2, 0, 4, 4).unwrap();
        let graph = extract_graph(&g).unwrap();
        let house = node(&graph, BBox::new(2, 0, 5, 3));
        assert_eq!(graph.nodes_at(Pos::new(3, 2)).collect::<Vec<_>>(), [house]);
        assert_eq!(graph.nodes_at(Pos::new(3, 4)).count(), 0);
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod errors {
    use std::collections::BTreeSet;

    use cg_core::{BBox, BuildingId};
    use cg_grid::{Cell, CellGrid, Grid};

    use crate::{CityGraphBuilder, GraphError, NodeKind, extract_graph};

    /// A grid view that reports a zero width.
    struct Degenerate(BTreeSet<BuildingId>);

    impl CellGrid for Degenerate {
        fn width(&self) -> u32 { 0 }
        fn height(&self) -> u32 { 4 }
        fn cell(&self, _x: i32, _y: i32) -> Option<Cell> { None }
        fn next_building_id(&self) -> BuildingId { BuildingId::FIRST }
        fn warehouse_ids(&self) -> &BTreeSet<BuildingId> { &self.0 }
    }

    fn raw(w: u32, h: u32, paint: &[(i32, i32, Cell)], next: u32, warehouses: &[u32]) -> Grid {
        let mut cells = vec![Cell::Empty; (w * h) as usize];
        for &(x, y, c) in paint {
            cells[(y as u32 * w + x as u32) as usize] = c;
        }
        Grid::from_cells(
            w,
            h,
            cells,
            BuildingId(next),
            warehouses.iter().map(|&i| BuildingId(i)).collect(),
        )
        .unwrap()
    }

    const B1: Cell = Cell::Building(BuildingId(1));

    #[test]
    fn zero_width_rejected() {
        let err = extract_graph(&Degenerate(BTreeSet::new())).unwrap_err();
        assert!(matches!(err, GraphError::InvalidGridDimensions { width: 0, height: 4 }));
    }

    #[test]
    fn missing_id_rejected() {
        let g = raw(4, 4, &[(0, 0, B1)], 3, &[]);
        let err = extract_graph(&g).unwrap_err();
        assert!(matches!(err, GraphError::InconsistentBuildingId { id: BuildingId(2), .. }));
    }

    #[test]
    fn l_shaped_footprint_rejected() {
        let g = raw(4, 4, &[(0, 0, B1), (1, 0, B1), (0, 1, B1)], 2, &[]);
        let err = extract_graph(&g).unwrap_err();
        assert!(matches!(err, GraphError::InconsistentBuildingId { id: BuildingId(1), .. }));
    }

    #[test]
    fn unassigned_id_on_cell_rejected() {
        let g = raw(4, 4, &[(0, 0, Cell::Building(BuildingId(5)))], 1, &[]);
        assert!(matches!(
            extract_graph(&g),
            Err(GraphError::InconsistentBuildingId { id: BuildingId(5), .. })
        ));
    }

    #[test]
    fn warehouse_out_of_range_rejected() {
        let g = raw(4, 4, &[(0, 0, B1)], 2, &[7]);
        assert!(matches!(
            extract_graph(&g),
            Err(GraphError::InconsistentBuildingId { id: BuildingId(7), .. })
        ));
    }

    #[test]
    fn id_range_larger_than_grid_rejected() {
        let g = raw(4, 4, &[(0, 0, B1)], u32::MAX, &[]);
        assert!(matches!(
            extract_graph(&g),
            Err(GraphError::InconsistentBuildingId { id: BuildingId(u32::MAX), .. })
        ));
        // One id per cell is the largest consistent range.
        let g = raw(2, 1, &[(0, 0, B1), (1, 0, Cell::Building(BuildingId(2)))], 3, &[]);
        assert_eq!(extract_graph(&g).unwrap().node_count(), 2);
        let g = raw(2, 1, &[(0, 0, B1), (1, 0, Cell::Building(BuildingId(2)))], 4, &[]);
        assert!(matches!(
            extract_graph(&g),
            Err(GraphError::InconsistentBuildingId { id: BuildingId(4), .. })
        ));
    }

    #[test]
    fn overlapping_boxes_rejected() {
        let mut b = CityGraphBuilder::new();
        b.add_node(BBox::new(0, 0, 3, 3), NodeKind::Building, Some(BuildingId(1))).unwrap();
        b.add_node(BBox::new(3, 3, 4, 4), NodeKind::Intersection, None).unwrap();
        assert!(matches!(b.build(), Err(GraphError::OverlappingRegion { .. })));
    }

    #[test]
    fn same_box_different_kind_rejected() {
        let mut b = CityGraphBuilder::new();
        b.add_node(BBox::new(1, 1, 1, 1), NodeKind::Intersection, None).unwrap();
        let err = b.add_node(BBox::new(1, 1, 1, 1), NodeKind::RoadEnd, None).unwrap_err();
        assert!(matches!(
            err,
            GraphError::OverlappingRegion { a_kind: NodeKind::Intersection, b_kind: NodeKind::RoadEnd, .. }
        ));
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use cg_core::BBox;

    use crate::{CityGraphBuilder, NodeKind};

    #[test]
    fn empty_build() {
        let g = CityGraphBuilder::new().build().unwrap();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn same_box_coalesces() {
        let mut b = CityGraphBuilder::new();
        let x = b.add_node(BBox::new(2, 2, 3, 3), NodeKind::Intersection, None).unwrap();
        let y = b.add_node(BBox::new(3, 3, 2, 2), NodeKind::Intersection, None).unwrap();
        assert_eq!(x, y);
        assert_eq!(b.node_count(), 1);
    }

    #[test]
    fn self_loops_and_repeats_dropped() {
        let mut b = CityGraphBuilder::new();
        let x = b.add_node(BBox::new(0, 0, 0, 0), NodeKind::RoadEnd, None).unwrap();
        let y = b.add_node(BBox::new(5, 0, 5, 0), NodeKind::RoadEnd, None).unwrap();
        assert!(b.add_edge(x, x, 1, None).is_none());
        assert!(b.add_edge(x, y, 1, None).is_some());
        assert!(b.add_edge(y, x, 2, None).is_none());
        let g = b.build().unwrap();
        assert_eq!(g.edge_count(), 1);
        // First edge wins.
        assert_eq!(g.edges().next().unwrap().2, 1);
    }

    #[test]
    fn csr_incidence() {
        let mut b = CityGraphBuilder::new();
        let hub = b.add_node(BBox::new(5, 5, 5, 5), NodeKind::Intersection, None).unwrap();
        let spokes: Vec<_> = [(0, 5), (9, 5), (5, 0), (5, 9)]
            .into_iter()
            .map(|(x, y)| b.add_node(BBox::new(x, y, x, y), NodeKind::RoadEnd, None).unwrap())
            .collect();
        for &s in &spokes {
            b.add_edge(hub, s, 1, None);
        }
        let g = b.build().unwrap();
        assert_eq!(g.degree(hub), 4);
        let mut around: Vec<_> = g.neighbors(hub).collect();
        around.sort();
        assert_eq!(around, spokes);
        for &s in &spokes {
            assert_eq!(g.neighbors(s).collect::<Vec<_>>(), [hub]);
        }
    }
}

// ── Properties over generated layouts ─────────────────────────────────────────

#[cfg(test)]
mod properties {
    use std::collections::BTreeSet;

    use cg_core::BuildingId;
    use cg_grid::{Cell, CellGrid};

    use super::helpers::generated;
    use crate::{NodeKind, extract_graph};

    const SEEDS: [u64; 6] = [1, 2, 3, 17, 42, 2024];

    #[test]
    fn one_node_per_building_id() {
        for seed in SEEDS {
            let grid = generated(seed, 48, 40);
            let graph = extract_graph(&grid).unwrap();

            let ids: BTreeSet<BuildingId> = graph.nodes().filter_map(|n| n.2).collect();
            let expected: BTreeSet<BuildingId> = BuildingId::range_to(grid.next_building_id()).collect();
            assert_eq!(ids, expected, "seed {seed}");

            for (bbox, _, id) in graph.nodes().filter(|n| n.1.is_footprint()) {
                let id = id.unwrap();
                assert!(bbox.cells().all(|p| grid.cell_at(p) == Some(Cell::Building(id))));
            }
        }
    }

    #[test]
    fn warehouses_and_buildings_partition_ids() {
        for seed in SEEDS {
            let grid = generated(seed, 48, 40);
            let graph = extract_graph(&grid).unwrap();
            let warehouses: BTreeSet<_> = graph
                .nodes()
                .filter(|n| n.1 == NodeKind::Warehouse)
                .filter_map(|n| n.2)
                .collect();
            assert_eq!(&warehouses, grid.warehouse_ids(), "seed {seed}");
            assert_eq!(
                graph.count_kind(NodeKind::Building) + graph.count_kind(NodeKind::Warehouse),
                grid.building_count()
            );
        }
    }

    #[test]
    fn road_regions_are_all_road_and_disjoint() {
        for seed in SEEDS {
            let grid = generated(seed, 48, 40);
            let graph = extract_graph(&grid).unwrap();
            let regions: Vec<_> = graph
                .nodes()
                .filter(|n| matches!(n.1, NodeKind::Intersection | NodeKind::RoadEnd))
                .map(|n| n.0)
                .collect();
            assert!(!regions.is_empty());
            for (i, a) in regions.iter().enumerate() {
                assert!(a.cells().all(|p| grid.is_road(p)), "seed {seed}: {a} not all road");
                for b in &regions[i + 1..] {
                    assert!(!a.intersects(b), "seed {seed}: {a} overlaps {b}");
                }
            }
        }
    }

    #[test]
    fn narrow_layouts_extract_cleanly() {
        for height in 5..=11 {
            for seed in 0..16 {
                let grid = generated(seed, 2, height);
                let graph = extract_graph(&grid)
                    .unwrap_or_else(|e| panic!("2x{height} seed {seed}: {e}"));
                let regions: Vec<_> = graph
                    .nodes()
                    .filter(|n| n.1 == NodeKind::RoadEnd)
                    .map(|n| n.0)
                    .collect();
                for (i, a) in regions.iter().enumerate() {
                    assert!(a.cells().all(|p| grid.is_road(p)));
                    assert!(regions[i + 1..].iter().all(|b| !a.intersects(b)));
                }
            }
        }
    }

    #[test]
    fn rebuild_is_identical() {
        for seed in SEEDS {
            let grid = generated(seed, 40, 40);
            let a = extract_graph(&grid).unwrap();
            let b = extract_graph(&grid).unwrap();
            assert_eq!(a.nodes().collect::<Vec<_>>(), b.nodes().collect::<Vec<_>>());
            assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
        }
    }

    #[test]
    fn same_seed_same_graph() {
        let a = extract_graph(&generated(77, 40, 30)).unwrap();
        let b = extract_graph(&generated(77, 40, 30)).unwrap();
        assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
    }

    #[test]
    fn edges_join_existing_nodes_with_strip_width() {
        for seed in SEEDS {
            let grid = generated(seed, 48, 40);
            let graph = extract_graph(&grid).unwrap();
            for (a, b, weight, _) in graph.edges() {
                assert!(graph.node_by_box(&a).is_some());
                assert!(graph.node_by_box(&b).is_some());
                assert_ne!(a, b);
                assert!((1..=2).contains(&weight));
            }
            // A terminus box is one cell thick along its road and strip-wide
            // across it.
            for end in graph.nodes_of_kind(NodeKind::RoadEnd) {
                let bbox = graph.node(end).bbox;
                let width = bbox.width().max(bbox.height());
                for e in graph.incident_edges(end) {
                    assert_eq!(graph.edge(*e).weight, width, "seed {seed}: {bbox}");
                }
            }
        }
    }

    #[test]
    fn every_generated_road_end_is_paired() {
        for seed in SEEDS {
            let grid = generated(seed, 48, 40);
            let graph = extract_graph(&grid).unwrap();
            for end in graph.nodes_of_kind(NodeKind::RoadEnd) {
                assert_eq!(graph.degree(end), 1, "seed {seed}: {}", graph.node(end).bbox);
            }
            for junction in graph.nodes_of_kind(NodeKind::Intersection) {
                assert!(graph.degree(junction) >= 2);
            }
        }
    }
}
