//! `BlockMeshBuilder`: incremental construction of a block-mesh topology.
//!
//! The builder owns the point, edge, block and patch stores together with
//! the derived membership index, neighbour table and open-edge set. Every
//! mutation goes through a method on this type, which validates first and
//! commits second: a failing call leaves the builder exactly as it was.
//!
//! # Example
//! ```rust
//! # fn try_main() -> Result<(), blockmesh_topology::mesh_error::BlockMeshError> {
//! use blockmesh_topology::builder::{BlockMeshBuilder, RunContext};
//! use blockmesh_topology::topology::block::UNIFORM_GRADING;
//!
//! let mut b = BlockMeshBuilder::new(RunContext::default());
//! b.add_points([
//!     [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0],
//! ]);
//! let block = b.add_block([0, 1, 2, 3, 4, 5, 6, 7], [2, 2, 2], UNIFORM_GRADING, None)?;
//! assert_eq!(block, 0);
//! assert_eq!(b.block_blocks().neighbours(0), [None; 6]);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;

use hashbrown::HashMap;
use serde::Serialize;

use crate::algs::consistency::{self, ConsistencyHandling};
use crate::algs::neighbours::{self, FaceLink};
use crate::debug_invariants::DebugInvariants;
use crate::description::BlockMeshDescription;
use crate::mesh_error::BlockMeshError;
use crate::topology::adjacency::NeighbourTable;
use crate::topology::block::{Block, BlockCorners, BlockIndex, BlockStore, Grading};
use crate::topology::edge::{CurveKind, CurveShape, EdgeIndex, EdgeTable};
use crate::topology::hex::{self, FACE_CORNERS, N_CORNERS, N_EDGES};
use crate::topology::membership::{DEFAULT_OPEN_EDGE_THRESHOLD, MembershipIndex};
use crate::topology::patch::{Patch, PatchFace, PatchIndex, PatchRegistry, PatchType};
use crate::topology::point::{Point, PointIndex, PointStore};
use crate::topology::validation;

/// Opaque run identity carried into emitted descriptions. Never read by
/// any topology algorithm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunContext {
    pub case: String,
    pub time: String,
}

impl RunContext {
    pub fn new(case: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            case: case.into(),
            time: time.into(),
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new("", "0")
    }
}

/// Builder configuration.
#[derive(Debug, Clone, Copy)]
pub struct BuilderOptions {
    /// How to treat face neighbours with different subdivision, and
    /// shared edges with different cell counts.
    pub consistency: ConsistencyHandling,
    /// Relative tolerance for comparing grading factors.
    pub grading_tolerance: f64,
    /// Edges with fewer incident blocks are open.
    pub open_edge_threshold: usize,
    /// Compare the cell count of every shared edge, not only face edges.
    pub check_edge_steps: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            consistency: ConsistencyHandling::Error,
            grading_tolerance: 1e-9,
            open_edge_threshold: DEFAULT_OPEN_EDGE_THRESHOLD,
            check_edge_steps: true,
        }
    }
}

/// A far corner of an extruded block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FaceCorner {
    /// Reuse a stored point.
    Existing(PointIndex),
    /// Append a new point when the block is committed.
    New(Point),
}

impl From<PointIndex> for FaceCorner {
    fn from(p: PointIndex) -> Self {
        FaceCorner::Existing(p)
    }
}

impl From<Point> for FaceCorner {
    fn from(p: Point) -> Self {
        FaceCorner::New(p)
    }
}

#[derive(Clone, Debug)]
pub struct BlockMeshBuilder {
    context: RunContext,
    options: BuilderOptions,
    points: PointStore,
    edges: EdgeTable,
    blocks: BlockStore,
    patches: PatchRegistry,
    membership: MembershipIndex,
    neighbours: NeighbourTable,
}

impl BlockMeshBuilder {
    pub fn new(context: RunContext) -> Self {
        Self::with_options(context, BuilderOptions::default())
    }

    pub fn with_options(context: RunContext, options: BuilderOptions) -> Self {
        Self {
            context,
            options,
            points: PointStore::new(),
            edges: EdgeTable::new(),
            blocks: BlockStore::new(),
            patches: PatchRegistry::new(),
            membership: MembershipIndex::with_threshold(options.open_edge_threshold),
            neighbours: NeighbourTable::new(),
        }
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    pub fn points(&self) -> &[Point] {
        self.points.as_slice()
    }

    pub fn point(&self, index: PointIndex) -> Result<&Point, BlockMeshError> {
        self.points.get(index)
    }

    /// Move a point. Topology is unaffected.
    pub fn point_mut(&mut self, index: PointIndex) -> Result<&mut Point, BlockMeshError> {
        self.points.get_mut(index)
    }

    pub fn set_point(&mut self, index: PointIndex, p: Point) -> Result<(), BlockMeshError> {
        *self.points.get_mut(index)? = p;
        Ok(())
    }

    pub fn edges(&self) -> &EdgeTable {
        &self.edges
    }

    pub fn blocks(&self) -> &[Block] {
        self.blocks.as_slice()
    }

    pub fn block(&self, index: BlockIndex) -> Result<&Block, BlockMeshError> {
        self.blocks.get(index)
    }

    /// Global point at local `corner` of `block`.
    pub fn block_vertex(&self, block: BlockIndex, corner: usize) -> Result<PointIndex, BlockMeshError> {
        let b = self.blocks.get(block)?;
        b.corners
            .get(corner)
            .copied()
            .ok_or(BlockMeshError::InvalidPointIndex {
                index: corner,
                len: N_CORNERS,
            })
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Point index → blocks using it.
    pub fn point_blocks(&self) -> &[BTreeSet<BlockIndex>] {
        self.membership.point_blocks()
    }

    /// Edge slot → blocks using it.
    pub fn edge_blocks(&self) -> &[BTreeSet<BlockIndex>] {
        self.membership.edge_blocks()
    }

    /// Neighbours per block, in face order.
    pub fn block_blocks(&self) -> &NeighbourTable {
        &self.neighbours
    }

    /// Edge slots touched by fewer blocks than the open-edge threshold.
    pub fn open_edges(&self) -> &BTreeSet<EdgeIndex> {
        self.membership.open_edges()
    }

    /// `(block, face)` pairs without a neighbour.
    pub fn open_faces(&self) -> Vec<PatchFace> {
        (0..self.blocks.len())
            .flat_map(|block| {
                self.neighbours
                    .free_faces(block)
                    .map(move |face| PatchFace { block, face })
            })
            .collect()
    }

    /// Cells along every registered edge, by slot.
    pub fn edge_steps(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.cells).collect()
    }

    pub fn patches(&self) -> &[Patch] {
        self.patches.as_slice()
    }

    pub fn patch_index(&self, name: &str) -> Option<PatchIndex> {
        self.patches.index_of(name)
    }

    pub fn patch_indices(&self) -> &HashMap<String, PatchIndex> {
        self.patches.names()
    }

    pub(crate) fn membership(&self) -> &MembershipIndex {
        &self.membership
    }

    /// Blocks reached from `start` across `face`, then straight through.
    pub fn neighbour_block_chain(
        &self,
        start: BlockIndex,
        face: usize,
        count: usize,
    ) -> Result<Vec<BlockIndex>, BlockMeshError> {
        neighbours::neighbour_block_chain(&self.blocks, &self.neighbours, start, face, count)
    }

    /// Snapshot of every output table, for external writers.
    pub fn description(&self) -> BlockMeshDescription<'_> {
        BlockMeshDescription::new(self)
    }

    // ------------------------------------------------------------------
    // Points
    // ------------------------------------------------------------------

    pub fn add_point(&mut self, p: Point) -> PointIndex {
        self.points.push(p)
    }

    pub fn add_points<I: IntoIterator<Item = Point>>(&mut self, pts: I) {
        self.points.extend(pts);
    }

    /// Drop every point, edge, block and patch.
    pub fn clear_geometry(&mut self) {
        self.points.clear();
        self.edges.clear();
        self.blocks.clear();
        self.patches.clear();
        self.membership.clear();
        self.neighbours.clear();
        log::debug!("cleared block-mesh geometry");
    }

    // ------------------------------------------------------------------
    // Blocks
    // ------------------------------------------------------------------

    /// Add a block from its 8 corners in local corner order.
    pub fn add_block(
        &mut self,
        corners: [PointIndex; N_CORNERS],
        cells: [usize; 3],
        grading: Grading,
        zone: Option<&str>,
    ) -> Result<BlockIndex, BlockMeshError> {
        let block = Block::new(corners, cells, grading, zone.map(str::to_string))?;
        self.commit_block(block, Vec::new())
    }

    /// Add a block from named corners and per-axis cell counts.
    pub fn add_block_named(
        &mut self,
        corners: BlockCorners,
        cells_x: usize,
        cells_y: usize,
        cells_z: usize,
        grading: Grading,
        zone: Option<&str>,
    ) -> Result<BlockIndex, BlockMeshError> {
        self.add_block(corners.into(), [cells_x, cells_y, cells_z], grading, zone)
    }

    /// Add a block on top of `face` of `start`.
    ///
    /// The new block's corners `0..4` are the face points in face order and
    /// corners `4..8` are `far`. Its local z axis points away from `start`
    /// and gets `orthogonal_cells`; x and y inherit the cell counts of the
    /// matching face edges of `start`.
    pub fn extrude_block(
        &mut self,
        start: BlockIndex,
        face: usize,
        far: &[FaceCorner],
        orthogonal_cells: usize,
        grading: Grading,
        zone: Option<&str>,
    ) -> Result<BlockIndex, BlockMeshError> {
        let far: &[FaceCorner; 4] = far.try_into().map_err(|_| {
            BlockMeshError::FaceMismatch(format!("expected 4 far corners, got {}", far.len()))
        })?;
        let base = self.blocks.get(start).map_err(|_| {
            BlockMeshError::FaceMismatch(format!("start block {start} does not exist"))
        })?;
        hex::check_face_id(face)
            .map_err(|_| BlockMeshError::FaceMismatch(format!("face {face} of block {start}")))?;

        let near = base.face_points(face);
        let local = FACE_CORNERS[face];
        let axis_cells = |a: usize, b: usize| {
            hex::corner_axis(a, b)
                .map(|(axis, _)| base.cells[axis])
                .ok_or_else(|| {
                    BlockMeshError::FaceMismatch(format!("corners {a}, {b} share no edge"))
                })
        };
        let cells = [
            axis_cells(local[0], local[1])?,
            axis_cells(local[0], local[3])?,
            orthogonal_cells,
        ];

        let stored = self.points.len();
        let mut new_points = Vec::new();
        let mut corners = [0; N_CORNERS];
        corners[..4].copy_from_slice(&near);
        for (k, corner) in far.iter().enumerate() {
            corners[4 + k] = match *corner {
                // Must not alias a point this call is about to append.
                FaceCorner::Existing(p) if p >= stored => {
                    return Err(BlockMeshError::InvalidPointIndex {
                        index: p,
                        len: stored,
                    });
                }
                FaceCorner::Existing(p) => p,
                FaceCorner::New(p) => {
                    new_points.push(p);
                    stored + new_points.len() - 1
                }
            };
        }

        let block = Block::new(corners, cells, grading, zone.map(str::to_string))?;
        self.commit_block(block, new_points)
    }

    /// Validate `block` against the current state, then commit it along
    /// with `new_points` (which it may reference past the current end).
    fn commit_block(
        &mut self,
        block: Block,
        new_points: Vec<Point>,
    ) -> Result<BlockIndex, BlockMeshError> {
        let index = self.blocks.len();
        let point_count = self.points.len() + new_points.len();
        if let Some(&bad) = block.corners.iter().find(|&&p| p >= point_count) {
            return Err(BlockMeshError::InvalidPointIndex {
                index: bad,
                len: point_count,
            });
        }

        let links: Vec<FaceLink> = neighbours::find_neighbours(
            index,
            &block,
            &self.blocks,
            &self.membership,
            &self.neighbours,
        )?;
        consistency::check_block(
            index,
            &block,
            &links,
            &self.blocks,
            self.options.consistency,
            self.options.grading_tolerance,
        )?;
        if self.options.check_edge_steps {
            consistency::check_edge_steps(index, &block, &self.edges, self.options.consistency)?;
        }

        // Nothing below can fail.
        self.points.extend(new_points);
        let mut slots = [0; N_EDGES];
        for (e, slot) in slots.iter_mut().enumerate() {
            let (start, end) = block.edge_points(e);
            *slot = self.edges.register(start, end, block.edge_cells(e)).0;
        }
        self.membership.insert_block(index, &block, &slots);
        self.neighbours.push_row();
        for l in &links {
            self.neighbours.link(index, l.face, l.neighbour, l.neighbour_face);
        }
        log::debug!(
            "block {index}: corners {:?}, cells {:?}, {} neighbour(s)",
            block.corners,
            block.cells,
            links.len()
        );
        self.blocks.push(block);

        crate::debug_invariants!(self.validate_invariants(), "after committing a block");
        Ok(index)
    }

    // ------------------------------------------------------------------
    // Edges
    // ------------------------------------------------------------------

    /// Resolve local `edge` of `block` to its slot and oriented endpoints.
    fn resolve_edge(
        &self,
        block: BlockIndex,
        edge: usize,
    ) -> Result<(EdgeIndex, PointIndex, PointIndex), BlockMeshError> {
        let b = self.blocks.get(block)?;
        hex::check_edge_id(edge)?;
        let (start, end) = b.edge_points(edge);
        let slot = self.edges.find(start, end).ok_or_else(|| {
            BlockMeshError::InvariantViolation(format!(
                "edge ({start}, {end}) of block {block} is not registered"
            ))
        })?;
        Ok((slot, start, end))
    }

    /// Define the curve of local `edge` of `block`, replacing any previous one.
    /// Interior points run from the edge's start corner to its end corner.
    pub fn set_edge(
        &mut self,
        block: BlockIndex,
        edge: usize,
        kind: CurveKind,
        interior: Vec<Point>,
    ) -> Result<EdgeIndex, BlockMeshError> {
        let (slot, start, end) = self.resolve_edge(block, edge)?;
        let curve = CurveShape::new(kind, interior)?;
        self.edges.define(slot, start, end, curve)?;
        Ok(slot)
    }

    /// [`set_edge`](Self::set_edge) with a polyline through `interior`.
    pub fn set_edge_path(
        &mut self,
        block: BlockIndex,
        edge: usize,
        interior: Vec<Point>,
    ) -> Result<EdgeIndex, BlockMeshError> {
        self.set_edge(block, edge, CurveKind::PolyLine, interior)
    }

    /// Replace the geometry of edge slot `edge`, keeping its identity.
    pub fn reset_edge(
        &mut self,
        edge: EdgeIndex,
        interior: Vec<Point>,
        kind: CurveKind,
    ) -> Result<(), BlockMeshError> {
        self.edges.get(edge)?;
        let curve = CurveShape::new(kind, interior)?;
        self.edges.reset(edge, curve)
    }

    /// Give local `edge` of `block` a straight definition if it has none
    /// (or always, with `overwrite`). Returns whether anything was written.
    pub fn set_dummy_edge(
        &mut self,
        block: BlockIndex,
        edge: usize,
        overwrite: bool,
    ) -> Result<bool, BlockMeshError> {
        let (slot, start, end) = self.resolve_edge(block, edge)?;
        if !overwrite && self.edges.get(slot)?.curve.is_some() {
            return Ok(false);
        }
        self.edges.define(slot, start, end, CurveShape::Line)?;
        Ok(true)
    }

    /// Non-overwriting [`set_dummy_edge`](Self::set_dummy_edge).
    pub fn ensure_edge(&mut self, block: BlockIndex, edge: usize) -> Result<bool, BlockMeshError> {
        self.set_dummy_edge(block, edge, false)
    }

    /// Apply [`set_dummy_edge`](Self::set_dummy_edge) to every edge of every
    /// block. Returns the number of definitions written.
    pub fn set_all_dummy_edges(&mut self, overwrite: bool) -> Result<usize, BlockMeshError> {
        let mut written = 0;
        for block in 0..self.blocks.len() {
            for edge in 0..N_EDGES {
                if self.set_dummy_edge(block, edge, overwrite)? {
                    written += 1;
                }
            }
        }
        log::debug!("wrote {written} straight edge definition(s)");
        Ok(written)
    }

    /// Non-overwriting [`set_all_dummy_edges`](Self::set_all_dummy_edges).
    pub fn ensure_all_edges(&mut self) -> Result<usize, BlockMeshError> {
        self.set_all_dummy_edges(false)
    }

    // ------------------------------------------------------------------
    // Patches
    // ------------------------------------------------------------------

    pub fn add_patch(
        &mut self,
        name: &str,
        kind: impl Into<PatchType>,
    ) -> Result<PatchIndex, BlockMeshError> {
        let kind = kind.into();
        let idx = self.patches.add(name, kind)?;
        log::debug!("patch {idx}: `{name}`");
        Ok(idx)
    }

    /// Append face `face` of `block` to `patch`. Whether the face is on the
    /// boundary is not checked.
    pub fn contribute_to_patch(
        &mut self,
        patch: PatchIndex,
        block: BlockIndex,
        face: usize,
    ) -> Result<(), BlockMeshError> {
        self.patches.get(patch)?;
        self.blocks.get(block)?;
        hex::check_face_id(face)?;
        self.patches.contribute(patch, PatchFace { block, face })
    }
}

impl std::ops::Index<BlockIndex> for BlockMeshBuilder {
    type Output = Block;

    fn index(&self, index: BlockIndex) -> &Block {
        &self.blocks[index]
    }
}

impl DebugInvariants for BlockMeshBuilder {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "BlockMeshBuilder");
    }

    fn validate_invariants(&self) -> Result<(), BlockMeshError> {
        validation::validate_topology(self)
    }
}
