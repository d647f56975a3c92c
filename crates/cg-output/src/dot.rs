//! Graphviz DOT output backend.
//!
//! Writes one undirected `graph` with one node statement per node and one
//! edge statement per edge.  Nodes are named after their boxes, so edge rows
//! need no lookup.
//!
//! | Kind           | Shape   | Fill colour |
//! |----------------|---------|-------------|
//! | `building`     | `box`   | lightblue   |
//! | `warehouse`    | `box3d` | orange      |
//! | `intersection` | `circle`| grey        |
//! | `road_end`     | `point` | black       |
//!
//! Edges are labelled with their weight.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::warn;

use cg_core::BBox;
use cg_graph::NodeKind;

use crate::writer::GraphWriter;
use crate::{EdgeRow, NodeRow, OutputResult};

pub const DOT_FILE: &str = "graph.dot";

/// `(shape, fillcolor)` for one node kind.
pub fn node_style(kind: NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Building     => ("box", "lightblue"),
        NodeKind::Warehouse    => ("box3d", "orange"),
        NodeKind::Intersection => ("circle", "grey"),
        NodeKind::RoadEnd      => ("point", "black"),
    }
}

/// Stable DOT identifier of the node with box `b`.
pub fn node_name(b: BBox) -> String {
    format!("n_{}_{}_{}_{}", b.min_x, b.min_y, b.max_x, b.max_y).replace('-', "m")
}

/// Writes a city graph as Graphviz DOT.
pub struct DotWriter<W: Write> {
    out:      W,
    finished: bool,
}

impl DotWriter<BufWriter<File>> {
    /// Create `graph.dot` in `dir`.
    pub fn create(dir: &Path) -> OutputResult<Self> {
        let file = File::create(dir.join(DOT_FILE))?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> DotWriter<W> {
    /// Start a graph on `out`; the opening line is written immediately.
    pub fn new(mut out: W) -> OutputResult<Self> {
        writeln!(out, "graph city {{")?;
        writeln!(out, "  node [style=filled];")?;
        Ok(Self { out, finished: false })
    }

    /// Unwrap the inner writer.  Call [`finish`](GraphWriter::finish) first.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> GraphWriter for DotWriter<W> {
    fn write_nodes(&mut self, rows: &[NodeRow]) -> OutputResult<()> {
        for row in rows {
            let bbox = row.bbox();
            let Some(kind) = NodeKind::parse(&row.kind) else {
                warn!("skipping node {bbox} with unknown kind {:?}", row.kind);
                continue;
            };
            let (shape, color) = node_style(kind);
            let label = match row.building_id {
                Some(id) => format!("{kind} {id}"),
                None     => kind.to_string(),
            };
            writeln!(
                self.out,
                "  {} [shape={shape}, fillcolor={color}, label=\"{label}\\n{bbox}\"];",
                node_name(bbox),
            )?;
        }
        Ok(())
    }

    fn write_edges(&mut self, rows: &[EdgeRow]) -> OutputResult<()> {
        for row in rows {
            writeln!(
                self.out,
                "  {} -- {} [label=\"{}\"];",
                node_name(row.a()),
                node_name(row.b()),
                row.weight,
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        writeln!(self.out, "}}")?;
        self.out.flush()?;
        Ok(())
    }
}
