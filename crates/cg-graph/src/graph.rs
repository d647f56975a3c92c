//! City road graph representation and builder.
//!
//! # Data layout
//!
//! Nodes live in an arena (`Vec<Node>`) indexed by [`NodeIndex`].  A node's
//! bounding box is its identity: `by_box` maps each canonical box to its arena
//! slot, so inserting the same region twice yields one node.
//!
//! Edges are undirected and stored once.  Incident edges per node use
//! **Compressed Sparse Row (CSR)** layout: node `n` owns
//!
//! ```text
//! incident[ incident_start[n] .. incident_start[n+1] ]
//! ```
//!
//! # Spatial index
//!
//! An R-tree over node boxes answers point-in-node queries.

use std::fmt;

use log::trace;

use cg_core::{BBox, BuildingId, EdgeIndex, NodeIndex, Pos};

use crate::index::BoxIndex;
use crate::{GraphError, GraphResult};

#[cfg(feature = "fx-hash")]
pub(crate) type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

// ── Node / Edge records ───────────────────────────────────────────────────────

/// What a node stands for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Building,
    Warehouse,
    Intersection,
    RoadEnd,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Building,
        NodeKind::Warehouse,
        NodeKind::Intersection,
        NodeKind::RoadEnd,
    ];

    /// Stable lowercase name used by writers.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Building     => "building",
            NodeKind::Warehouse    => "warehouse",
            NodeKind::Intersection => "intersection",
            NodeKind::RoadEnd      => "road_end",
        }
    }

    /// Inverse of [`as_str`](Self::as_str).
    pub fn parse(s: &str) -> Option<NodeKind> {
        NodeKind::ALL.into_iter().find(|k| k.as_str() == s.trim())
    }

    /// Building or warehouse.
    #[inline]
    pub fn is_footprint(self) -> bool {
        matches!(self, NodeKind::Building | NodeKind::Warehouse)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node record.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub bbox:     BBox,
    pub kind:     NodeKind,
    /// Set for `Building` and `Warehouse` nodes only.
    pub building: Option<BuildingId>,
}

/// One undirected edge record.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub a:       NodeIndex,
    pub b:       NodeIndex,
    /// Width in cells of the road strip the edge runs along.
    pub weight:  u32,
    /// The stretch of road strip between the two endpoints, when non-empty.
    pub segment: Option<BBox>,
}

impl Edge {
    /// The endpoint that is not `n`.
    #[inline]
    pub fn other(&self, n: NodeIndex) -> NodeIndex {
        if self.a == n { self.b } else { self.a }
    }
}

// ── CityGraph ─────────────────────────────────────────────────────────────────

/// Immutable road-topology graph extracted from one grid snapshot.
///
/// Do not construct directly; use [`CityGraphBuilder`] or
/// [`extract_graph`](crate::extract_graph).
#[derive(Debug)]
pub struct CityGraph {
    nodes:          Vec<Node>,
    edges:          Vec<Edge>,
    by_box:         Map<BBox, NodeIndex>,
    incident_start: Vec<u32>,
    incident:       Vec<EdgeIndex>,
    spatial_idx:    BoxIndex,
}

impl CityGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, n: NodeIndex) -> &Node {
        &self.nodes[n.index()]
    }

    #[inline]
    pub fn edge(&self, e: EdgeIndex) -> &Edge {
        &self.edges[e.index()]
    }

    pub fn node_records(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edge_records(&self) -> &[Edge] {
        &self.edges
    }

    /// Arena index of the node identified by `bbox`.
    pub fn node_by_box(&self, bbox: &BBox) -> Option<NodeIndex> {
        self.by_box.get(bbox).copied()
    }

    /// Every node as `(bbox, kind, building id)`, in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = (BBox, NodeKind, Option<BuildingId>)> + '_ {
        self.nodes.iter().map(|n| (n.bbox, n.kind, n.building))
    }

    /// Every edge as `(box_a, box_b, weight, road segment)`, in insertion
    /// order.
    pub fn edges(&self) -> impl Iterator<Item = (BBox, BBox, u32, Option<BBox>)> + '_ {
        self.edges.iter().map(|e| {
            (self.nodes[e.a.index()].bbox, self.nodes[e.b.index()].bbox, e.weight, e.segment)
        })
    }

    /// Nodes of one kind.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.kind == kind)
            .map(|(i, _)| NodeIndex(i as u32))
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Edges touching `node`, as a contiguous slice.
    #[inline]
    pub fn incident_edges(&self, node: NodeIndex) -> &[EdgeIndex] {
        let start = self.incident_start[node.index()] as usize;
        let end   = self.incident_start[node.index() + 1] as usize;
        &self.incident[start..end]
    }

    #[inline]
    pub fn degree(&self, node: NodeIndex) -> usize {
        self.incident_edges(node).len()
    }

    /// Nodes sharing an edge with `node`.
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.incident_edges(node)
            .iter()
            .map(move |&e| self.edges[e.index()].other(node))
    }

    /// The edge joining `a` and `b`, if any.
    pub fn edge_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.incident_edges(a)
            .iter()
            .copied()
            .find(|&e| self.edges[e.index()].other(a) == b)
    }

    /// Nodes whose box contains `p`.
    pub fn nodes_at(&self, p: Pos) -> impl Iterator<Item = NodeIndex> + '_ {
        self.spatial_idx.at(p).map(|(n, _)| n)
    }
}

// ── CityGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`CityGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use cg_core::BBox;
/// use cg_graph::{CityGraphBuilder, NodeKind};
///
/// let mut b = CityGraphBuilder::new();
/// let west = b.add_node(BBox::new(0, 3, 0, 3), NodeKind::RoadEnd, None).unwrap();
/// let east = b.add_node(BBox::new(5, 3, 5, 3), NodeKind::RoadEnd, None).unwrap();
/// b.add_edge(west, east, 1, Some(BBox::new(1, 3, 4, 3)));
/// let g = b.build().unwrap();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 1);
/// ```
#[derive(Default)]
pub struct CityGraphBuilder {
    nodes:   Vec<Node>,
    edges:   Vec<Edge>,
    by_box:  Map<BBox, NodeIndex>,
    by_pair: Map<(NodeIndex, NodeIndex), EdgeIndex>,
}

impl CityGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut by_box = Map::default();
        by_box.reserve(nodes);
        let mut by_pair = Map::default();
        by_pair.reserve(edges);
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            by_box,
            by_pair,
        }
    }

    /// Insert a node, or return the existing one with the same box.
    ///
    /// Re-inserting an identical record is a no-op.  The same box with a
    /// different kind or building id is an [`GraphError::OverlappingRegion`].
    pub fn add_node(
        &mut self,
        bbox:     BBox,
        kind:     NodeKind,
        building: Option<BuildingId>,
    ) -> GraphResult<NodeIndex> {
        if let Some(&existing) = self.by_box.get(&bbox) {
            let prev = self.nodes[existing.index()];
            if prev.kind == kind && prev.building == building {
                return Ok(existing);
            }
            return Err(GraphError::OverlappingRegion {
                a: prev.bbox, a_kind: prev.kind, b: bbox, b_kind: kind,
            });
        }
        let id = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node { bbox, kind, building });
        self.by_box.insert(bbox, id);
        Ok(id)
    }

    /// Add an undirected edge.
    ///
    /// Returns `None` (and adds nothing) for a self-loop or when the two
    /// nodes are already joined; the first edge between a pair wins.
    pub fn add_edge(
        &mut self,
        a:       NodeIndex,
        b:       NodeIndex,
        weight:  u32,
        segment: Option<BBox>,
    ) -> Option<EdgeIndex> {
        if a == b {
            trace!("dropping self-loop on {a}");
            return None;
        }
        let key = (a.min(b), a.max(b));
        if self.by_pair.contains_key(&key) {
            trace!("dropping repeated edge {a} - {b}");
            return None;
        }
        let id = EdgeIndex(self.edges.len() as u32);
        self.edges.push(Edge { a, b, weight, segment });
        self.by_pair.insert(key, id);
        Some(id)
    }

    pub fn node_index(&self, bbox: &BBox) -> Option<NodeIndex> {
        self.by_box.get(bbox).copied()
    }

    #[inline]
    pub fn node(&self, n: NodeIndex) -> &Node {
        &self.nodes[n.index()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Fail on the first pair of distinct node boxes sharing a cell.
    ///
    /// Sweep over boxes sorted by `min_x`: O(N log N + overlapping
    /// candidates).
    pub fn check_overlaps(&self) -> GraphResult<()> {
        let mut order: Vec<usize> = (0..self.nodes.len()).collect();
        order.sort_unstable_by_key(|&i| (self.nodes[i].bbox.min_x, i));

        for (k, &i) in order.iter().enumerate() {
            let a = &self.nodes[i];
            for &j in &order[k + 1..] {
                let b = &self.nodes[j];
                if b.bbox.min_x > a.bbox.max_x {
                    break;
                }
                if a.bbox.intersects(&b.bbox) {
                    return Err(GraphError::OverlappingRegion {
                        a: a.bbox, a_kind: a.kind, b: b.bbox, b_kind: b.kind,
                    });
                }
            }
        }
        Ok(())
    }

    /// Consume the builder and produce a [`CityGraph`].
    ///
    /// Fails with [`GraphError::OverlappingRegion`] if any two node boxes
    /// overlap; no partial graph is returned.
    pub fn build(self) -> GraphResult<CityGraph> {
        self.check_overlaps()?;

        let node_count = self.nodes.len();

        // CSR row pointer: count both endpoints, prefix-sum, then fill.
        let mut incident_start = vec![0u32; node_count + 1];
        for e in &self.edges {
            incident_start[e.a.index() + 1] += 1;
            incident_start[e.b.index() + 1] += 1;
        }
        for i in 1..=node_count {
            incident_start[i] += incident_start[i - 1];
        }
        let mut cursor: Vec<u32> = incident_start[..node_count].to_vec();
        let mut incident = vec![EdgeIndex::INVALID; self.edges.len() * 2];
        for (i, e) in self.edges.iter().enumerate() {
            for end in [e.a, e.b] {
                incident[cursor[end.index()] as usize] = EdgeIndex(i as u32);
                cursor[end.index()] += 1;
            }
        }

        let spatial_idx = BoxIndex::build(
            self.nodes
                .iter()
                .enumerate()
                .map(|(i, n)| (NodeIndex(i as u32), n.bbox)),
        );

        Ok(CityGraph {
            nodes: self.nodes,
            edges: self.edges,
            by_box: self.by_box,
            incident_start,
            incident,
            spatial_idx,
        })
    }
}
