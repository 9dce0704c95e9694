//! Algorithms over the block topology.

pub mod consistency;
pub mod lattice;
pub mod neighbours;

pub use consistency::ConsistencyHandling;
pub use lattice::{LatticeSpec, block_lattice};
pub use neighbours::{FaceLink, neighbour_block_chain};
