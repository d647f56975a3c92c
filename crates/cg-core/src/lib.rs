//! `cg-core` — foundational types for the `rust_city` toolkit.
//!
//! This crate is a dependency of every other `cg-*` crate.  It has no `cg-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `BuildingId`, `NodeIndex`, `EdgeIndex`                 |
//! | [`geom`]   | `Pos`, `BBox`, `Axis`, neighbourhood offsets           |
//! | [`config`] | `LayoutConfig`                                         |
//! | [`rng`]    | `CityRng`                                              |
//! | [`error`]  | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::LayoutConfig;
pub use error::{CoreError, CoreResult};
pub use geom::{Axis, BBox, DIAGONAL, ORTHOGONAL, Pos};
pub use ids::{BuildingId, EdgeIndex, NodeIndex};
pub use rng::CityRng;
