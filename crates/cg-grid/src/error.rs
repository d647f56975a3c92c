//! Grid-subsystem error type.

use thiserror::Error;

use cg_core::{BuildingId, CoreError, Pos};

/// Errors produced by `cg-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("cell {0} is outside the grid")]
    OutOfBounds(Pos),

    #[error("{got} cells supplied for a {width}x{height} grid")]
    CellCountMismatch { width: u32, height: u32, got: usize },

    #[error("warehouse {id} was never placed (next id is {next})")]
    UnknownBuilding { id: BuildingId, next: BuildingId },
}

pub type GridResult<T> = Result<T, GridError>;
