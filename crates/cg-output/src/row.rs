//! Flat row types written by output backends.
//!
//! Boxes are spread over four integer columns so that every backend sees
//! plain scalars.  Optional columns are empty in CSV.

use serde::Deserialize;

use cg_core::BBox;
use cg_graph::{CityGraph, Edge, Node};

/// One node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeRow {
    pub min_x:       i32,
    pub min_y:       i32,
    pub max_x:       i32,
    pub max_y:       i32,
    /// [`NodeKind::as_str`](cg_graph::NodeKind::as_str) of the node.
    pub kind:        String,
    /// Set for buildings and warehouses.
    pub building_id: Option<u32>,
}

impl NodeRow {
    pub const HEADER: [&'static str; 6] = ["min_x", "min_y", "max_x", "max_y", "kind", "building_id"];

    pub fn from_node(n: &Node) -> Self {
        let b = n.bbox;
        Self {
            min_x:       b.min_x,
            min_y:       b.min_y,
            max_x:       b.max_x,
            max_y:       b.max_y,
            kind:        n.kind.as_str().to_owned(),
            building_id: n.building.map(|id| id.0),
        }
    }

    pub fn bbox(&self) -> BBox {
        BBox::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    pub fn record(&self) -> [String; 6] {
        [
            self.min_x.to_string(),
            self.min_y.to_string(),
            self.max_x.to_string(),
            self.max_y.to_string(),
            self.kind.clone(),
            opt(self.building_id),
        ]
    }
}

/// One edge, endpoints given by their boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EdgeRow {
    pub a_min_x:   i32,
    pub a_min_y:   i32,
    pub a_max_x:   i32,
    pub a_max_y:   i32,
    pub b_min_x:   i32,
    pub b_min_y:   i32,
    pub b_max_x:   i32,
    pub b_max_y:   i32,
    pub weight:    u32,
    /// Road strip between the endpoints; all four empty when there is none.
    pub seg_min_x: Option<i32>,
    pub seg_min_y: Option<i32>,
    pub seg_max_x: Option<i32>,
    pub seg_max_y: Option<i32>,
}

impl EdgeRow {
    pub const HEADER: [&'static str; 13] = [
        "a_min_x", "a_min_y", "a_max_x", "a_max_y",
        "b_min_x", "b_min_y", "b_max_x", "b_max_y",
        "weight",
        "seg_min_x", "seg_min_y", "seg_max_x", "seg_max_y",
    ];

    pub fn from_edge(graph: &CityGraph, e: &Edge) -> Self {
        let a = graph.node(e.a).bbox;
        let b = graph.node(e.b).bbox;
        let seg = e.segment;
        Self {
            a_min_x:   a.min_x,
            a_min_y:   a.min_y,
            a_max_x:   a.max_x,
            a_max_y:   a.max_y,
            b_min_x:   b.min_x,
            b_min_y:   b.min_y,
            b_max_x:   b.max_x,
            b_max_y:   b.max_y,
            weight:    e.weight,
            seg_min_x: seg.map(|s| s.min_x),
            seg_min_y: seg.map(|s| s.min_y),
            seg_max_x: seg.map(|s| s.max_x),
            seg_max_y: seg.map(|s| s.max_y),
        }
    }

    pub fn a(&self) -> BBox {
        BBox::new(self.a_min_x, self.a_min_y, self.a_max_x, self.a_max_y)
    }

    pub fn b(&self) -> BBox {
        BBox::new(self.b_min_x, self.b_min_y, self.b_max_x, self.b_max_y)
    }

    /// `None` unless all four segment columns are set.
    pub fn segment(&self) -> Option<BBox> {
        Some(BBox::new(self.seg_min_x?, self.seg_min_y?, self.seg_max_x?, self.seg_max_y?))
    }

    pub fn record(&self) -> [String; 13] {
        [
            self.a_min_x.to_string(),
            self.a_min_y.to_string(),
            self.a_max_x.to_string(),
            self.a_max_y.to_string(),
            self.b_min_x.to_string(),
            self.b_min_y.to_string(),
            self.b_max_x.to_string(),
            self.b_max_y.to_string(),
            self.weight.to_string(),
            opt(self.seg_min_x),
            opt(self.seg_min_y),
            opt(self.seg_max_x),
            opt(self.seg_max_y),
        ]
    }
}

/// All node rows of `graph`, in arena order.
pub fn node_rows(graph: &CityGraph) -> Vec<NodeRow> {
    graph.node_records().iter().map(NodeRow::from_node).collect()
}

/// All edge rows of `graph`, in insertion order.
pub fn edge_rows(graph: &CityGraph) -> Vec<EdgeRow> {
    graph.edge_records().iter().map(|e| EdgeRow::from_edge(graph, e)).collect()
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}
