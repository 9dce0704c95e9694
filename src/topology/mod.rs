//! Block-mesh topology stores.
//!
//! - [`hex`]: local corner, edge and face numbering of a hexahedral block
//! - [`point`], [`edge`], [`block`], [`patch`]: the authoritative stores
//! - [`membership`] and [`adjacency`]: derived indices kept up to date by
//!   the builder
//! - [`validation`]: recomputes the derived indices and compares

pub mod adjacency;
pub mod block;
pub mod edge;
pub mod hex;
pub mod membership;
pub mod patch;
pub mod point;
pub mod validation;

pub use adjacency::{Neighbour, NeighbourTable};
pub use block::{Block, BlockCorners, BlockIndex, Grading, UNIFORM_GRADING};
pub use edge::{BlockEdge, CurveKind, CurveShape, EdgeIndex};
pub use patch::{Patch, PatchFace, PatchIndex, PatchType};
pub use point::{Point, PointIndex};
