//! Topology validation helpers.
//!
//! Recomputes every derived structure of a [`BlockMeshBuilder`] from the
//! authoritative point and block stores and compares it with what the
//! builder maintained incrementally.

use std::collections::BTreeSet;

use crate::builder::BlockMeshBuilder;
use crate::debug_invariants::ensure;
use crate::mesh_error::BlockMeshError;
use crate::topology::hex::{N_EDGES, N_FACES};

/// Validate all derived state of `builder`.
pub fn validate_topology(builder: &BlockMeshBuilder) -> Result<(), BlockMeshError> {
    validate_corners(builder)?;
    validate_membership(builder)?;
    validate_open_edges(builder)?;
    validate_neighbours(builder)?;
    validate_patches(builder)
}

fn validate_corners(builder: &BlockMeshBuilder) -> Result<(), BlockMeshError> {
    let n = builder.points().len();
    for (b, block) in builder.blocks().iter().enumerate() {
        for &p in &block.corners {
            ensure(p < n, || format!("block {b} uses point {p} of {n}"))?;
        }
    }
    Ok(())
}

fn validate_membership(builder: &BlockMeshBuilder) -> Result<(), BlockMeshError> {
    let membership = builder.membership();
    let mut point_pairs = 0;
    let mut edge_pairs = BTreeSet::new();
    for (b, block) in builder.blocks().iter().enumerate() {
        for p in block.distinct_points() {
            ensure(membership.blocks_of_point(p).contains(&b), || {
                format!("point {p} does not list block {b}")
            })?;
            point_pairs += 1;
        }
        for e in 0..N_EDGES {
            let (start, end) = block.edge_points(e);
            let slot = builder.edges().find(start, end).ok_or_else(|| {
                BlockMeshError::InvariantViolation(format!(
                    "edge ({start}, {end}) of block {b} is not registered"
                ))
            })?;
            ensure(membership.blocks_of_edge(slot).contains(&b), || {
                format!("edge slot {slot} does not list block {b}")
            })?;
            edge_pairs.insert((slot, b));
        }
    }
    let stored_points: usize = membership.point_blocks().iter().map(|s| s.len()).sum();
    ensure(stored_points == point_pairs, || {
        format!("point membership holds {stored_points} entries, expected {point_pairs}")
    })?;
    let stored_edges: usize = membership.edge_blocks().iter().map(|s| s.len()).sum();
    ensure(stored_edges == edge_pairs.len(), || {
        format!(
            "edge membership holds {stored_edges} entries, expected {}",
            edge_pairs.len()
        )
    })
}

fn validate_open_edges(builder: &BlockMeshBuilder) -> Result<(), BlockMeshError> {
    let membership = builder.membership();
    let threshold = membership.threshold();
    for slot in 0..builder.edges().len() {
        let count = membership.blocks_of_edge(slot).len();
        let open = membership.is_open(slot);
        ensure(open == (count < threshold), || {
            format!("edge slot {slot} has {count} block(s) but open = {open}")
        })?;
    }
    Ok(())
}

fn validate_neighbours(builder: &BlockMeshBuilder) -> Result<(), BlockMeshError> {
    let table = builder.block_blocks();
    let blocks = builder.blocks();
    ensure(table.len() == blocks.len(), || {
        format!("{} neighbour rows for {} blocks", table.len(), blocks.len())
    })?;
    for (b, block) in blocks.iter().enumerate() {
        for f in 0..N_FACES {
            let Some(n) = table.get(b, f) else {
                continue;
            };
            ensure(n.block != b && n.block < blocks.len(), || {
                format!("block {b} face {f} links to block {}", n.block)
            })?;
            let back = table.get(n.block, n.face);
            ensure(back.is_some_and(|m| m.block == b && m.face == f), || {
                format!("link {b}.{f} -> {}.{} is not symmetric", n.block, n.face)
            })?;
            ensure(block.face_key(f) == blocks[n.block].face_key(n.face), || {
                format!("linked faces {b}.{f} and {}.{} differ", n.block, n.face)
            })?;
        }
    }
    Ok(())
}

fn validate_patches(builder: &BlockMeshBuilder) -> Result<(), BlockMeshError> {
    let n = builder.blocks().len();
    for patch in builder.patches() {
        for pf in &patch.faces {
            ensure(pf.block < n && pf.face < N_FACES, || {
                format!(
                    "patch `{}` references block {} face {}",
                    patch.name, pf.block, pf.face
                )
            })?;
        }
    }
    Ok(())
}
