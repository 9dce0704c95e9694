//! Block-to-block adjacency across faces.
//!
//! One row per block, one slot per local face. A slot holds the neighbour
//! block and the neighbour's local face, so links can be walked in both
//! directions without searching.

use serde::Serialize;

use crate::topology::block::BlockIndex;
use crate::topology::hex::N_FACES;

/// The block on the other side of a face, and its face id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Neighbour {
    pub block: BlockIndex,
    pub face: usize,
}

/// Per-block, per-face neighbour table. Always symmetric.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NeighbourTable {
    rows: Vec<[Option<Neighbour>; N_FACES]>,
}

impl NeighbourTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_row(&mut self) -> BlockIndex {
        self.rows.push([None; N_FACES]);
        self.rows.len() - 1
    }

    /// Link `a.fa <-> b.fb` in both directions.
    pub(crate) fn link(&mut self, a: BlockIndex, fa: usize, b: BlockIndex, fb: usize) {
        self.rows[a][fa] = Some(Neighbour { block: b, face: fb });
        self.rows[b][fb] = Some(Neighbour { block: a, face: fa });
    }

    /// Neighbour across `face` of `block`, if any. Out-of-range input yields `None`.
    #[inline]
    pub fn get(&self, block: BlockIndex, face: usize) -> Option<Neighbour> {
        self.rows.get(block).and_then(|r| r.get(face).copied().flatten())
    }

    /// Neighbour block per face of `block`, in face order.
    pub fn neighbours(&self, block: BlockIndex) -> [Option<BlockIndex>; N_FACES] {
        match self.rows.get(block) {
            Some(row) => row.map(|n| n.map(|n| n.block)),
            None => [None; N_FACES],
        }
    }

    /// Faces of `block` without a neighbour.
    pub fn free_faces(&self, block: BlockIndex) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .get(block)
            .into_iter()
            .flat_map(|row| row.iter().enumerate())
            .filter_map(|(f, n)| n.is_none().then_some(f))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

impl std::ops::Index<BlockIndex> for NeighbourTable {
    type Output = [Option<Neighbour>; N_FACES];

    fn index(&self, block: BlockIndex) -> &Self::Output {
        &self.rows[block]
    }
}
