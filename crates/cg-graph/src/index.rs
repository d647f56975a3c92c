//! R-tree over node bounding boxes.
//!
//! Answers "which node box contains this cell?" during road tracing and for
//! [`CityGraph::nodes_at`](crate::CityGraph::nodes_at).  Boxes are stored as
//! integer envelopes; the point distance to a box is zero inside it, so the
//! containing boxes are exactly the leading zero-distance neighbours.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use cg_core::{BBox, NodeIndex, Pos};

/// Entry stored in the R-tree: one node box and its arena index.
#[derive(Clone, Debug)]
struct BoxEntry {
    bbox: BBox,
    node: NodeIndex,
}

impl RTreeObject for BoxEntry {
    type Envelope = AABB<[i32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bbox.min_x, self.bbox.min_y],
            [self.bbox.max_x, self.bbox.max_y],
        )
    }
}

impl PointDistance for BoxEntry {
    /// Squared distance from `point` to the nearest cell of the box; zero for
    /// cells inside it.
    fn distance_2(&self, point: &[i32; 2]) -> i32 {
        let b = &self.bbox;
        let dx = (b.min_x - point[0]).max(0).max(point[0] - b.max_x);
        let dy = (b.min_y - point[1]).max(0).max(point[1] - b.max_y);
        dx * dx + dy * dy
    }
}

/// Read-only spatial index over a set of node boxes.
#[derive(Clone, Debug)]
pub struct BoxIndex {
    tree: RTree<BoxEntry>,
}

impl BoxIndex {
    /// Bulk-load the index (O(N log N), faster than N inserts).
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (NodeIndex, BBox)>,
    {
        let entries: Vec<BoxEntry> = entries
            .into_iter()
            .map(|(node, bbox)| BoxEntry { bbox, node })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Nodes whose box contains `p`, with their boxes.
    pub fn at(&self, p: Pos) -> impl Iterator<Item = (NodeIndex, BBox)> + '_ {
        let point = [p.x, p.y];
        self.tree
            .nearest_neighbor_iter(&point)
            .take_while(move |e| e.distance_2(&point) == 0)
            .map(|e| (e.node, e.bbox))
    }
}
