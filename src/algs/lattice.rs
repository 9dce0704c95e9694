//! Structured block lattices.
//!
//! [`block_lattice`] fills an axis-aligned box with `nx × ny × nz` blocks,
//! appending the `(nx+1)(ny+1)(nz+1)` lattice points first and then the
//! blocks with `i` varying fastest, so block `(i, j, k)` lands at
//! `first + i + nx * (j + ny * k)`.

use crate::builder::BlockMeshBuilder;
use crate::mesh_error::BlockMeshError;
use crate::topology::block::{Block, BlockIndex, Grading, UNIFORM_GRADING};
use crate::topology::hex::N_CORNERS;
use crate::topology::point::Point;

/// Shape of a block lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeSpec {
    /// Blocks along x, y, z.
    pub blocks: [usize; 3],
    pub min: Point,
    pub max: Point,
    /// Cells per block along each local axis.
    pub cells: [usize; 3],
    pub grading: Grading,
}

impl LatticeSpec {
    /// Unit-sized blocks starting at the origin, uniform grading.
    pub fn unit(blocks: [usize; 3], cells: [usize; 3]) -> Self {
        Self {
            blocks,
            min: [0.0; 3],
            max: blocks.map(|n| n as f64),
            cells,
            grading: UNIFORM_GRADING,
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.iter().product()
    }
}

/// Append the lattice described by `spec` to `builder`.
///
/// Returns the indices of the new blocks. Counts and grading are checked
/// before anything is added.
pub fn block_lattice(
    builder: &mut BlockMeshBuilder,
    spec: &LatticeSpec,
) -> Result<Vec<BlockIndex>, BlockMeshError> {
    for (axis, &count) in spec.blocks.iter().enumerate() {
        if count == 0 {
            return Err(BlockMeshError::InvalidCellCount { axis, count });
        }
    }
    Block::new([0; N_CORNERS], spec.cells, spec.grading, None)?;

    let [nx, ny, nz] = spec.blocks;
    let step: [f64; 3] = std::array::from_fn(|a| (spec.max[a] - spec.min[a]) / spec.blocks[a] as f64);
    let base = builder.points().len();
    for k in 0..=nz {
        let z = spec.min[2] + step[2] * k as f64;
        for j in 0..=ny {
            let y = spec.min[1] + step[1] * j as f64;
            builder.add_points((0..=nx).map(|i| [spec.min[0] + step[0] * i as f64, y, z]));
        }
    }

    let row = nx + 1;
    let slab = row * (ny + 1);
    let mut out = Vec::with_capacity(spec.block_count());
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let p0 = base + k * slab + j * row + i;
                let p3 = p0 + row;
                let p4 = p0 + slab;
                let p7 = p4 + row;
                let corners = [p0, p0 + 1, p3 + 1, p3, p4, p4 + 1, p7 + 1, p7];
                out.push(builder.add_block(corners, spec.cells, spec.grading, None)?);
            }
        }
    }
    log::debug!(
        "lattice {nx}x{ny}x{nz}: blocks {:?}",
        out.first().zip(out.last())
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RunContext;

    #[test]
    fn lattice_counts_and_links() {
        let mut b = BlockMeshBuilder::new(RunContext::default());
        let blocks = block_lattice(&mut b, &LatticeSpec::unit([3, 2, 1], [2, 2, 2])).unwrap();
        assert_eq!(blocks, (0..6).collect::<Vec<_>>());
        assert_eq!(b.points().len(), 4 * 3 * 2);
        // Block (1, 0, 0) sits between (0, 0, 0) and (2, 0, 0), below (1, 1, 0).
        assert_eq!(
            b.block_blocks().neighbours(1),
            [Some(0), Some(2), None, Some(4), None, None]
        );
        assert_eq!(b.points()[b[4].corners[6]], [2.0, 2.0, 1.0]);
    }

    #[test]
    fn zero_blocks_are_rejected_before_any_point_is_added() {
        let mut b = BlockMeshBuilder::new(RunContext::default());
        let err = block_lattice(&mut b, &LatticeSpec::unit([2, 0, 1], [1, 1, 1])).unwrap_err();
        assert_eq!(err, BlockMeshError::InvalidCellCount { axis: 1, count: 0 });
        let err = block_lattice(&mut b, &LatticeSpec::unit([1, 1, 1], [1, 0, 1])).unwrap_err();
        assert_eq!(err, BlockMeshError::InvalidCellCount { axis: 1, count: 0 });
        assert!(b.points().is_empty());
    }

    #[test]
    fn second_lattice_is_offset() {
        let mut b = BlockMeshBuilder::new(RunContext::default());
        block_lattice(&mut b, &LatticeSpec::unit([1, 1, 1], [1, 1, 1])).unwrap();
        let mut shifted = LatticeSpec::unit([1, 1, 1], [1, 1, 1]);
        shifted.min = [5.0, 0.0, 0.0];
        shifted.max = [6.0, 1.0, 1.0];
        let second = block_lattice(&mut b, &shifted).unwrap();
        assert_eq!(second, vec![1]);
        assert_eq!(b[1].corners[0], 8);
        assert_eq!(b.block_blocks().neighbours(1), [None; 6]);
    }
}
