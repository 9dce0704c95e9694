//! Compatibility checks between a new block and the blocks it touches.
//!
//! Two blocks sharing a face must subdivide it the same way: equal cell
//! counts along both in-plane directions, and equal grading once the
//! direction of each block's local axis is taken into account (a factor
//! `g` seen from the other end of an edge is `1 / g`).

use crate::algs::neighbours::FaceLink;
use crate::mesh_error::BlockMeshError;
use crate::topology::block::{Block, BlockIndex, BlockStore};
use crate::topology::edge::EdgeTable;
use crate::topology::hex::{self, FACE_CORNERS, N_EDGES};

/// What to do when a new block disagrees with a face neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsistencyHandling {
    /// Skip the check.
    Ignore,
    /// Log a warning and accept the block.
    Warn,
    /// Reject the block.
    #[default]
    Error,
}

/// Local axis and grading of an in-plane face edge, as seen by one block.
#[derive(Debug, Clone, Copy)]
struct EdgeView {
    axis: usize,
    cells: usize,
    /// Grading oriented along the global `from -> to` direction.
    grading: f64,
}

fn view(block: &Block, local_from: usize, local_to: usize) -> Option<EdgeView> {
    let (axis, ascending) = hex::corner_axis(local_from, local_to)?;
    let g = block.grading[axis];
    Some(EdgeView {
        axis,
        cells: block.cells[axis],
        grading: if ascending { g } else { 1.0 / g },
    })
}

/// Local corners on `face` of `block` holding `from` and `to` next to each other.
fn face_edge(block: &Block, face: usize, from: usize, to: usize) -> Option<(usize, usize)> {
    let corners = FACE_CORNERS[face];
    (0..4).find_map(|k| {
        let a = corners[k];
        [corners[(k + 1) % 4], corners[(k + 3) % 4]]
            .into_iter()
            .find(|&b| block.corners[a] == from && block.corners[b] == to)
            .map(|b| (a, b))
    })
}

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
}

/// Compare `block` (at `index`) against one face neighbour.
pub fn check_face(
    index: BlockIndex,
    block: &Block,
    link: &FaceLink,
    neighbour: &Block,
    tolerance: f64,
) -> Result<(), BlockMeshError> {
    let corners = FACE_CORNERS[link.face];
    let mismatch = |detail: String| BlockMeshError::InconsistentGrading {
        block: index,
        neighbour: link.neighbour,
        face: link.face,
        detail,
    };

    // All four edges, so a collapsed edge cannot hide an in-plane direction.
    for k in 0..4 {
        let (la, lb) = (corners[k], corners[(k + 1) % 4]);
        let (pa, pb) = (block.corners[la], block.corners[lb]);
        if pa == pb {
            continue;
        }
        let Some(mine) = view(block, la, lb) else {
            continue;
        };
        let Some((na, nb)) = face_edge(neighbour, link.neighbour_face, pa, pb) else {
            return Err(mismatch(format!(
                "edge ({pa}, {pb}) is not an edge of the neighbour face"
            )));
        };
        let Some(theirs) = view(neighbour, na, nb) else {
            continue;
        };
        if mine.cells != theirs.cells {
            return Err(mismatch(format!(
                "{} vs {} cells along edge ({pa}, {pb}) (axes {} and {})",
                mine.cells, theirs.cells, mine.axis, theirs.axis
            )));
        }
        if !close(mine.grading, theirs.grading, tolerance) {
            return Err(mismatch(format!(
                "grading {} vs {} along edge ({pa}, {pb})",
                mine.grading, theirs.grading
            )));
        }
    }
    Ok(())
}

/// Check every face link of a new block, honouring `handling`.
pub fn check_block(
    index: BlockIndex,
    block: &Block,
    links: &[FaceLink],
    blocks: &BlockStore,
    handling: ConsistencyHandling,
    tolerance: f64,
) -> Result<(), BlockMeshError> {
    if handling == ConsistencyHandling::Ignore {
        return Ok(());
    }
    for link in links {
        let neighbour = blocks.get(link.neighbour)?;
        match check_face(index, block, link, neighbour, tolerance) {
            Ok(()) => {}
            Err(e) if handling == ConsistencyHandling::Warn => {
                log::warn!("accepting inconsistent block: {e}");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Every already-registered edge of `block` must keep its cell count.
/// `handling` applies as in [`check_block`].
pub fn check_edge_steps(
    index: BlockIndex,
    block: &Block,
    edges: &EdgeTable,
    handling: ConsistencyHandling,
) -> Result<(), BlockMeshError> {
    if handling == ConsistencyHandling::Ignore {
        return Ok(());
    }
    for e in 0..N_EDGES {
        let (start, end) = block.edge_points(e);
        let Some(slot) = edges.find(start, end) else {
            continue;
        };
        let existing = edges.get(slot)?.cells;
        let requested = block.edge_cells(e);
        if existing == requested {
            continue;
        }
        let err = BlockMeshError::InconsistentEdgeSteps {
            block: index,
            start,
            end,
            existing,
            requested,
        };
        if handling == ConsistencyHandling::Warn {
            log::warn!("accepting block with differing edge steps: {err}");
        } else {
            return Err(err);
        }
    }
    Ok(())
}
