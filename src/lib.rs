//! # blockmesh-topology
//!
//! Incremental construction of the block topology behind a multi-block
//! hexahedral mesh: hexahedral blocks over a shared point store, edge
//! definitions, face neighbours, open edges and boundary patches.
//!
//! ## Features
//! - [`builder::BlockMeshBuilder`] as the single mutation point; failed calls
//!   leave it untouched
//! - Face-neighbour discovery through a point-membership index, with cell
//!   count and grading checks across shared faces
//! - Block extrusion from an existing face and neighbour-chain walks
//! - Curved edge definitions (`polyLine`, `spline`, `arc`, `projected`)
//! - A serialisable [`description::BlockMeshDescription`] for external
//!   writers
//!
//! ## Invariants
//! With `debug_assertions` or the `strict-invariants` / `check-invariants`
//! features, every committed block re-validates membership, adjacency
//! symmetry and open-edge status. [`DebugInvariants::validate_invariants`]
//! runs the same check on demand.

pub mod algs;
pub mod builder;
pub mod debug_invariants;
pub mod description;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// The most-used types.
pub mod prelude {
    pub use crate::algs::consistency::ConsistencyHandling;
    pub use crate::algs::lattice::{LatticeSpec, block_lattice};
    pub use crate::builder::{BlockMeshBuilder, BuilderOptions, FaceCorner, RunContext};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::description::BlockMeshDescription;
    pub use crate::mesh_error::BlockMeshError;
    pub use crate::topology::block::{Block, BlockCorners, BlockIndex, Grading, UNIFORM_GRADING};
    pub use crate::topology::edge::{CurveKind, CurveShape, EdgeIndex};
    pub use crate::topology::patch::{PatchFace, PatchIndex, PatchType};
    pub use crate::topology::point::{Point, PointIndex};
}
