//! Hexahedral blocks and the block store.

use itertools::Itertools;
use serde::Serialize;

use crate::mesh_error::BlockMeshError;
use crate::topology::hex::{self, EDGE_CORNERS, FACE_CORNERS, N_CORNERS};
use crate::topology::point::PointIndex;

/// Index of a block in the [`BlockStore`].
pub type BlockIndex = usize;

/// Per-axis grading factors. `1.0` is uniform spacing.
pub type Grading = [f64; 3];

/// Uniform grading along all three axes.
pub const UNIFORM_GRADING: Grading = [1.0, 1.0, 1.0];

/// A hexahedral block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Block {
    /// Corner point indices, in local corner order.
    pub corners: [PointIndex; N_CORNERS],
    /// Cells along the local x, y and z axes.
    pub cells: [usize; 3],
    pub grading: Grading,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl Block {
    /// Build a block, rejecting zero cell counts and non-positive grading.
    pub fn new(
        corners: [PointIndex; N_CORNERS],
        cells: [usize; 3],
        grading: Grading,
        zone: Option<String>,
    ) -> Result<Self, BlockMeshError> {
        for (axis, &count) in cells.iter().enumerate() {
            if count == 0 {
                return Err(BlockMeshError::InvalidCellCount { axis, count });
            }
        }
        for (axis, &factor) in grading.iter().enumerate() {
            if !(factor.is_finite() && factor > 0.0) {
                return Err(BlockMeshError::InvalidGrading { axis, factor });
            }
        }
        Ok(Self {
            corners,
            cells,
            grading,
            zone: zone.filter(|z| !z.is_empty()),
        })
    }

    /// Global point indices of a local face, in face order.
    #[inline]
    pub(crate) fn face_points(&self, face: usize) -> [PointIndex; 4] {
        FACE_CORNERS[face].map(|c| self.corners[c])
    }

    /// Sorted face points; two faces are the same face iff their keys match.
    pub(crate) fn face_key(&self, face: usize) -> [PointIndex; 4] {
        let mut key = self.face_points(face);
        key.sort_unstable();
        key
    }

    /// Local face whose point set equals `key`, if any.
    pub fn find_face(&self, key: &[PointIndex; 4]) -> Option<usize> {
        (0..hex::N_FACES).find(|&f| &self.face_key(f) == key)
    }

    /// Global `(start, end)` of a local edge.
    #[inline]
    pub(crate) fn edge_points(&self, edge: usize) -> (PointIndex, PointIndex) {
        let [s, e] = EDGE_CORNERS[edge];
        (self.corners[s], self.corners[e])
    }

    /// Cells along a local edge.
    #[inline]
    pub(crate) fn edge_cells(&self, edge: usize) -> usize {
        self.cells[hex::edge_axis(edge)]
    }

    /// Distinct global points of the block, ascending.
    pub fn distinct_points(&self) -> Vec<PointIndex> {
        self.corners.iter().copied().sorted_unstable().dedup().collect()
    }
}

/// Corner indices by compass role: west/east along x, south/north along y,
/// low/high along z.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockCorners {
    pub south_west_low: PointIndex,
    pub south_west_high: PointIndex,
    pub north_west_low: PointIndex,
    pub north_west_high: PointIndex,
    pub south_east_low: PointIndex,
    pub south_east_high: PointIndex,
    pub north_east_low: PointIndex,
    pub north_east_high: PointIndex,
}

impl From<BlockCorners> for [PointIndex; N_CORNERS] {
    fn from(c: BlockCorners) -> Self {
        [
            c.south_west_low,
            c.south_east_low,
            c.north_east_low,
            c.north_west_low,
            c.south_west_high,
            c.south_east_high,
            c.north_east_high,
            c.north_west_high,
        ]
    }
}

/// Ordered list of blocks.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BlockStore {
    blocks: Vec<Block>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, block: Block) -> BlockIndex {
        self.blocks.push(block);
        self.blocks.len() - 1
    }

    pub fn get(&self, index: BlockIndex) -> Result<&Block, BlockMeshError> {
        self.blocks.get(index).ok_or(BlockMeshError::InvalidBlockIndex {
            index,
            len: self.blocks.len(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}

impl std::ops::Index<BlockIndex> for BlockStore {
    type Output = Block;

    fn index(&self, index: BlockIndex) -> &Block {
        &self.blocks[index]
    }
}
