//! `cg-output` — city graph writers and the CSV reader.
//!
//! | Backend  | Files created               | Read back                      |
//! |----------|-----------------------------|--------------------------------|
//! | CSV      | `nodes.csv`, `edges.csv`    | [`read_graph_csv`]             |
//! | DOT      | `graph.dot`                 | no                             |
//!
//! Both writers implement [`GraphWriter`]; [`GraphWriter::write_graph`]
//! dumps a whole [`CityGraph`](cg_graph::CityGraph).
//!
//! # Usage
//!
//! ```rust,ignore
//! use cg_output::{CsvWriter, GraphWriter, read_graph_csv};
//!
//! let mut w = CsvWriter::new(Path::new("./output"))?;
//! w.write_graph(&graph)?;
//! let restored = read_graph_csv(Path::new("./output"))?;
//! ```

pub mod csv;
pub mod dot;
pub mod error;
pub mod reader;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use dot::DotWriter;
pub use error::{OutputError, OutputResult};
pub use reader::{read_graph_csv, read_graph_reader};
pub use row::{EdgeRow, NodeRow};
pub use writer::GraphWriter;
