//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `nodes.csv`
//! - `edges.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::GraphWriter;
use crate::{EdgeRow, NodeRow, OutputResult};

pub const NODES_FILE: &str = "nodes.csv";
pub const EDGES_FILE: &str = "edges.csv";

/// Writes a city graph to two CSV files.
pub struct CsvWriter {
    nodes:    Writer<File>,
    edges:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut nodes = Writer::from_path(dir.join(NODES_FILE))?;
        nodes.write_record(NodeRow::HEADER)?;

        let mut edges = Writer::from_path(dir.join(EDGES_FILE))?;
        edges.write_record(EdgeRow::HEADER)?;

        Ok(Self { nodes, edges, finished: false })
    }
}

impl GraphWriter for CsvWriter {
    fn write_nodes(&mut self, rows: &[NodeRow]) -> OutputResult<()> {
        for row in rows {
            self.nodes.write_record(&row.record())?;
        }
        Ok(())
    }

    fn write_edges(&mut self, rows: &[EdgeRow]) -> OutputResult<()> {
        for row in rows {
            self.edges.write_record(&row.record())?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.nodes.flush()?;
        self.edges.flush()?;
        Ok(())
    }
}
