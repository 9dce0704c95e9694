//! Face-neighbour discovery and neighbour-chain traversal.
//!
//! A face of a new block is shared with an existing block when that block
//! uses all four face points *and* has a face made of exactly those points.
//! Candidates come from intersecting the point-membership sets of the face
//! corners, so the cost is proportional to the local valence, not the mesh.

use hashbrown::HashSet;

use crate::mesh_error::BlockMeshError;
use crate::topology::adjacency::NeighbourTable;
use crate::topology::block::{Block, BlockIndex, BlockStore};
use crate::topology::hex::{self, N_FACES};
use crate::topology::membership::MembershipIndex;

/// A face of a new block matched against a face of an existing block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceLink {
    pub face: usize,
    pub neighbour: BlockIndex,
    pub neighbour_face: usize,
}

/// Resolve the neighbours of `block` (about to be stored at `index`)
/// against the committed blocks. Read-only.
///
/// Fails with [`BlockMeshError::DegenerateTopology`] if a face would be
/// shared by more than two blocks.
pub fn find_neighbours(
    index: BlockIndex,
    block: &Block,
    blocks: &BlockStore,
    membership: &MembershipIndex,
    table: &NeighbourTable,
) -> Result<Vec<FaceLink>, BlockMeshError> {
    let mut links: Vec<FaceLink> = Vec::new();
    for face in 0..N_FACES {
        let key = block.face_key(face);
        let matches: Vec<(BlockIndex, usize)> = membership
            .blocks_with_all(&key)
            .into_iter()
            .filter(|&c| c != index)
            .filter_map(|c| blocks.get(c).ok()?.find_face(&key).map(|f| (c, f)))
            .collect();

        let (neighbour, neighbour_face) = match matches.as_slice() {
            [] => continue,
            [single] => *single,
            _ => {
                return Err(BlockMeshError::DegenerateTopology {
                    block: index,
                    face,
                    candidates: matches.iter().map(|&(c, _)| c).collect(),
                });
            }
        };

        // The existing face is already taken, or the new block would claim
        // it twice through two of its own faces.
        let taken = table.get(neighbour, neighbour_face);
        let claimed = links
            .iter()
            .any(|l| l.neighbour == neighbour && l.neighbour_face == neighbour_face);
        if taken.is_some() || claimed {
            let mut candidates = vec![neighbour];
            if let Some(other) = taken {
                candidates.insert(0, other.block);
            }
            return Err(BlockMeshError::DegenerateTopology {
                block: index,
                face,
                candidates,
            });
        }

        log::trace!(
            "block {index} face {} touches block {neighbour} face {}",
            hex::FACE_NAMES[face],
            hex::FACE_NAMES[neighbour_face]
        );
        links.push(FaceLink {
            face,
            neighbour,
            neighbour_face,
        });
    }
    Ok(links)
}

/// Walk from `start` across `face`, then straight through every block
/// reached (leaving through the face opposite the one entered).
///
/// The result starts with `start`. At most `count` hops are taken; with
/// `count == 0` the walk continues until a face has no neighbour. A chain
/// that closes on itself stops before revisiting a block. Running out of
/// neighbours early is not an error.
pub fn neighbour_block_chain(
    blocks: &BlockStore,
    table: &NeighbourTable,
    start: BlockIndex,
    face: usize,
    count: usize,
) -> Result<Vec<BlockIndex>, BlockMeshError> {
    blocks.get(start)?;
    hex::check_face_id(face)?;

    let mut chain = vec![start];
    let mut seen: HashSet<BlockIndex> = HashSet::from_iter([start]);
    let (mut current, mut exit) = (start, face);
    while count == 0 || chain.len() <= count {
        let Some(next) = table.get(current, exit) else {
            break;
        };
        if !seen.insert(next.block) {
            break;
        }
        chain.push(next.block);
        current = next.block;
        exit = hex::opposite_face(next.face);
    }
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::block::UNIFORM_GRADING;
    use crate::topology::hex::N_EDGES;

    fn block(corners: [usize; 8]) -> Block {
        Block::new(corners, [1, 1, 1], UNIFORM_GRADING, None).unwrap()
    }

    /// Commit blocks without any checks, linking faces as they are found.
    fn commit(blocks: &[Block]) -> (BlockStore, MembershipIndex, NeighbourTable) {
        let mut store = BlockStore::new();
        let mut m = MembershipIndex::default();
        let mut t = NeighbourTable::new();
        for b in blocks {
            let idx = store.len();
            let links = find_neighbours(idx, b, &store, &m, &t).unwrap();
            m.insert_block(idx, b, &[0; N_EDGES]);
            t.push_row();
            for l in links {
                t.link(idx, l.face, l.neighbour, l.neighbour_face);
            }
            store.push(b.clone());
        }
        (store, m, t)
    }

    // Blocks stacked along x; block i uses x-planes i and i+1.
    fn row(n: usize) -> Vec<Block> {
        (0..n)
            .map(|i| {
                let (a, b) = (4 * i, 4 * (i + 1));
                block([a, b, b + 1, a + 1, a + 2, b + 2, b + 3, a + 3])
            })
            .collect()
    }

    #[test]
    fn row_blocks_link_x_faces() {
        let (_, _, t) = commit(&row(3));
        assert_eq!(t.neighbours(0), [None, Some(1), None, None, None, None]);
        assert_eq!(t.neighbours(1), [Some(0), Some(2), None, None, None, None]);
    }

    #[test]
    fn chain_walks_straight_and_stops() {
        let (s, _, t) = commit(&row(5));
        assert_eq!(neighbour_block_chain(&s, &t, 0, 1, 3).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(neighbour_block_chain(&s, &t, 0, 1, 0).unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(neighbour_block_chain(&s, &t, 4, 0, 2).unwrap(), vec![4, 3, 2]);
        assert_eq!(neighbour_block_chain(&s, &t, 2, 2, 0).unwrap(), vec![2]);
        assert!(neighbour_block_chain(&s, &t, 9, 0, 0).is_err());
        assert!(neighbour_block_chain(&s, &t, 0, 6, 0).is_err());
    }

    #[test]
    fn third_block_on_a_face_is_degenerate() {
        let rows = row(2);
        let (s, m, t) = commit(&rows);
        // A second copy of block 1 would share its x-min face with block 0
        // and both of its x faces with block 1.
        let err = find_neighbours(2, &rows[1], &s, &m, &t).unwrap_err();
        assert!(matches!(err, BlockMeshError::DegenerateTopology { block: 2, .. }));
    }

    #[test]
    fn shared_points_without_shared_face_do_not_link() {
        // Second block shares only the edge (1, 5) with the first.
        let b0 = block([0, 1, 2, 3, 4, 5, 6, 7]);
        let b1 = block([1, 8, 9, 10, 5, 11, 12, 13]);
        let (_, _, t) = commit(&[b0, b1]);
        assert_eq!(t.neighbours(0), [None; N_FACES]);
        assert_eq!(t.neighbours(1), [None; N_FACES]);
    }
}
