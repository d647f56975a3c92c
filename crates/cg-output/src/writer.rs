//! The `GraphWriter` trait implemented by all backend writers.

use cg_graph::CityGraph;

use crate::row::{edge_rows, node_rows};
use crate::{EdgeRow, NodeRow, OutputResult};

/// Trait implemented by the CSV and DOT writers.
///
/// Backends that refer to nodes from edge statements expect every node to be
/// written before the first edge.
pub trait GraphWriter {
    /// Write a batch of node rows.
    fn write_nodes(&mut self, rows: &[NodeRow]) -> OutputResult<()>;

    /// Write a batch of edge rows.
    fn write_edges(&mut self, rows: &[EdgeRow]) -> OutputResult<()>;

    /// Flush and close all underlying outputs.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;

    /// Write every node, then every edge, then finish.
    fn write_graph(&mut self, graph: &CityGraph) -> OutputResult<()> {
        self.write_nodes(&node_rows(graph))?;
        self.write_edges(&edge_rows(graph))?;
        self.finish()
    }
}
