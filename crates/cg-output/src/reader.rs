//! CSV graph loader: the inverse of [`CsvWriter`](crate::CsvWriter).
//!
//! Nodes are re-inserted in file order and edges in file order, so a graph
//! written and read back has the same arena indices and edge order.

use std::io::Read;
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;

use cg_core::BuildingId;
use cg_graph::{CityGraph, CityGraphBuilder, NodeKind};

use crate::csv::{EDGES_FILE, NODES_FILE};
use crate::{EdgeRow, NodeRow, OutputError, OutputResult};

/// Load `nodes.csv` and `edges.csv` from `dir`.
pub fn read_graph_csv(dir: &Path) -> OutputResult<CityGraph> {
    let nodes = std::fs::File::open(dir.join(NODES_FILE))?;
    let edges = std::fs::File::open(dir.join(EDGES_FILE))?;
    read_graph_reader(nodes, edges)
}

/// Like [`read_graph_csv`] but accepts any `Read` sources.
pub fn read_graph_reader<N: Read, E: Read>(nodes: N, edges: E) -> OutputResult<CityGraph> {
    let node_rows: Vec<NodeRow> = rows(nodes)?;
    let edge_rows: Vec<EdgeRow> = rows(edges)?;

    let mut graph = CityGraphBuilder::with_capacity(node_rows.len(), edge_rows.len());
    for row in &node_rows {
        let kind = NodeKind::parse(&row.kind)
            .ok_or_else(|| OutputError::Parse(format!("unknown node kind {:?}", row.kind)))?;
        graph.add_node(row.bbox(), kind, row.building_id.map(BuildingId))?;
    }

    for row in &edge_rows {
        let a = graph.node_index(&row.a()).ok_or(OutputError::UnknownNode(row.a()))?;
        let b = graph.node_index(&row.b()).ok_or(OutputError::UnknownNode(row.b()))?;
        graph.add_edge(a, b, row.weight, row.segment());
    }

    debug!("read graph: {} nodes, {} edges", graph.node_count(), graph.edge_count());
    Ok(graph.build()?)
}

fn rows<T: DeserializeOwned, R: Read>(reader: R) -> OutputResult<Vec<T>> {
    csv::Reader::from_reader(reader)
        .deserialize::<T>()
        .map(|r| r.map_err(|e| OutputError::Parse(e.to_string())))
        .collect()
}
