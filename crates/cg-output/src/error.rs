//! Error types for cg-output.

use thiserror::Error;

use cg_core::BBox;
use cg_graph::GraphError;

/// Errors that can occur when writing or reading a city graph.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("edge endpoint {0} is not a node")]
    UnknownNode(BBox),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
