//! `cg-graph` — road-topology extraction from a city grid.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`classify`] | `Classification`, `CellProbe`, `RoadClass`                |
//! | [`merge`]    | corner clustering into intersection / dead-end boxes      |
//! | [`trace`]    | `DeadEndPair`, dead-end pairing, strip tracing            |
//! | [`extract`]  | `extract_graph`, `building_footprints`                    |
//! | [`graph`]    | `CityGraph` (arena + CSR + R-tree), `CityGraphBuilder`    |
//! | [`index`]    | `BoxIndex` R-tree over node boxes                         |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Classify grid rows on the Rayon pool.                     |
//! | `fx-hash`  | FxHash for the box and edge-pair maps.                    |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod classify;
pub mod error;
pub mod extract;
pub mod graph;
pub mod index;
pub mod merge;
pub mod trace;

#[cfg(test)]
mod tests;

pub use classify::{CellProbe, Classification, NeighborSum, RoadClass};
pub use error::{GraphError, GraphResult};
pub use extract::{Footprint, building_footprints, extract_graph};
pub use graph::{CityGraph, CityGraphBuilder, Edge, Node, NodeKind};
pub use index::BoxIndex;
pub use trace::DeadEndPair;
