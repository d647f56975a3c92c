//! `cg-grid` — the city cell grid and its random layout generator.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`cell`]     | `Cell` (`Empty` / `Road` / `Building(id)`)               |
//! | [`grid`]     | `CellGrid` read contract, dense `Grid` storage           |
//! | [`generate`] | `LayoutGenerator` (roads, buildings, warehouses)         |
//! | [`error`]    | `GridError`, `GridResult<T>`                             |
//!
//! Graph extraction (`cg-graph`) only ever reads a grid through
//! [`CellGrid`]; everything that writes cells lives here.

pub mod cell;
pub mod error;
pub mod generate;
pub mod grid;


pub use cell::Cell;
pub use error::{GridError, GridResult};
pub use generate::LayoutGenerator;
pub use grid::{CellGrid, Grid};
