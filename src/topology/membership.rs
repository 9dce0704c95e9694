//! Point → blocks and edge → blocks membership, plus the open-edge set.
//!
//! Both maps are arenas indexed by point / edge slot. They are extended as
//! blocks are committed and only rebuilt from scratch on a full reset.

use std::collections::BTreeSet;

use crate::topology::block::{Block, BlockIndex};
use crate::topology::edge::EdgeIndex;
use crate::topology::hex::N_EDGES;
use crate::topology::point::PointIndex;

/// Edges with fewer incident blocks than this lie on the boundary of a
/// conforming hexahedral topology.
pub const DEFAULT_OPEN_EDGE_THRESHOLD: usize = 4;

static NO_BLOCKS: BTreeSet<BlockIndex> = BTreeSet::new();

#[derive(Clone, Debug)]
pub struct MembershipIndex {
    point_blocks: Vec<BTreeSet<BlockIndex>>,
    edge_blocks: Vec<BTreeSet<BlockIndex>>,
    open_edges: BTreeSet<EdgeIndex>,
    threshold: usize,
}

impl Default for MembershipIndex {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_OPEN_EDGE_THRESHOLD)
    }
}

impl MembershipIndex {
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            point_blocks: Vec::new(),
            edge_blocks: Vec::new(),
            open_edges: BTreeSet::new(),
            threshold,
        }
    }

    /// Record `block` under its corners and its edge slots.
    pub(crate) fn insert_block(
        &mut self,
        index: BlockIndex,
        block: &Block,
        edges: &[EdgeIndex; N_EDGES],
    ) {
        for &p in &block.corners {
            if p >= self.point_blocks.len() {
                self.point_blocks.resize_with(p + 1, BTreeSet::new);
            }
            self.point_blocks[p].insert(index);
        }
        for &e in edges {
            if e >= self.edge_blocks.len() {
                self.edge_blocks.resize_with(e + 1, BTreeSet::new);
            }
            let members = &mut self.edge_blocks[e];
            members.insert(index);
            if members.len() < self.threshold {
                self.open_edges.insert(e);
            } else if self.open_edges.remove(&e) {
                log::trace!("edge {e} closed by block {index}");
            }
        }
    }

    /// Blocks using point `p`.
    #[inline]
    pub fn blocks_of_point(&self, p: PointIndex) -> &BTreeSet<BlockIndex> {
        self.point_blocks.get(p).unwrap_or(&NO_BLOCKS)
    }

    /// Blocks having edge slot `e` among their 12 edges.
    #[inline]
    pub fn blocks_of_edge(&self, e: EdgeIndex) -> &BTreeSet<BlockIndex> {
        self.edge_blocks.get(e).unwrap_or(&NO_BLOCKS)
    }

    /// Blocks using every one of `points`, ascending.
    pub fn blocks_with_all(&self, points: &[PointIndex]) -> Vec<BlockIndex> {
        let Some((&first, rest)) = points.split_first() else {
            return Vec::new();
        };
        self.blocks_of_point(first)
            .iter()
            .copied()
            .filter(|b| rest.iter().all(|&p| self.blocks_of_point(p).contains(b)))
            .collect()
    }

    #[inline]
    pub fn point_blocks(&self) -> &[BTreeSet<BlockIndex>] {
        &self.point_blocks
    }

    #[inline]
    pub fn edge_blocks(&self) -> &[BTreeSet<BlockIndex>] {
        &self.edge_blocks
    }

    #[inline]
    pub fn open_edges(&self) -> &BTreeSet<EdgeIndex> {
        &self.open_edges
    }

    #[inline]
    pub fn is_open(&self, e: EdgeIndex) -> bool {
        self.open_edges.contains(&e)
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn clear(&mut self) {
        self.point_blocks.clear();
        self.edge_blocks.clear();
        self.open_edges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::block::UNIFORM_GRADING;

    fn block(corners: [PointIndex; 8]) -> Block {
        Block::new(corners, [1, 1, 1], UNIFORM_GRADING, None).unwrap()
    }

    #[test]
    fn intersection_finds_shared_blocks() {
        let mut m = MembershipIndex::default();
        let b0 = block([0, 1, 2, 3, 4, 5, 6, 7]);
        let b1 = block([1, 8, 9, 2, 5, 10, 11, 6]);
        m.insert_block(0, &b0, &[0; N_EDGES]);
        m.insert_block(1, &b1, &[1; N_EDGES]);
        assert_eq!(m.blocks_with_all(&[1, 2, 5, 6]), vec![0, 1]);
        assert_eq!(m.blocks_with_all(&[0, 1]), vec![0]);
        assert!(m.blocks_with_all(&[0, 8]).is_empty());
        assert!(m.blocks_with_all(&[]).is_empty());
        assert!(m.blocks_of_point(99).is_empty());
    }

    #[test]
    fn edges_close_at_threshold() {
        let mut m = MembershipIndex::with_threshold(2);
        let b = block([0, 1, 2, 3, 4, 5, 6, 7]);
        let mut slots = [0; N_EDGES];
        slots[1] = 1;
        m.insert_block(0, &b, &slots);
        assert!(m.is_open(0) && m.is_open(1));
        m.insert_block(1, &b, &[0; N_EDGES]);
        assert!(!m.is_open(0));
        assert!(m.is_open(1));
        assert_eq!(m.blocks_of_edge(0).len(), 2);
    }
}
