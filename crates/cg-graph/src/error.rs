//! Graph-extraction error type.
//!
//! Every variant describes an inconsistent input grid.  Extraction is
//! deterministic, so retrying on the same grid reproduces the same error.

use thiserror::Error;

use cg_core::{BBox, BuildingId};

use crate::NodeKind;

/// Errors produced by `cg-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidGridDimensions { width: u32, height: u32 },

    #[error("inconsistent building id {id}: {reason}")]
    InconsistentBuildingId { id: BuildingId, reason: &'static str },

    #[error("{a_kind:?} region {a} overlaps {b_kind:?} region {b}")]
    OverlappingRegion {
        a:      BBox,
        a_kind: NodeKind,
        b:      BBox,
        b_kind: NodeKind,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;
