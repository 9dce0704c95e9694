//! Serialisable view of a finished topology.
//!
//! This is the hand-off to whatever writes the block-mesh dictionary or
//! builds a volume mesh: ordered points, ordered blocks, curved-edge
//! definitions, boundary patches, plus the adjacency and open-edge tables
//! for diagnostics. Everything is borrowed from the builder.

use serde::Serialize;

use crate::builder::{BlockMeshBuilder, RunContext};
use crate::topology::adjacency::NeighbourTable;
use crate::topology::block::Block;
use crate::topology::edge::{CurveShape, EdgeIndex};
use crate::topology::patch::Patch;
use crate::topology::point::{Point, PointIndex};

/// A stored edge definition, oriented `start -> end`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeDefinition<'a> {
    pub slot: EdgeIndex,
    pub start: PointIndex,
    pub end: PointIndex,
    pub curve: &'a CurveShape,
}

#[derive(Clone, Debug, Serialize)]
pub struct BlockMeshDescription<'a> {
    pub context: &'a RunContext,
    pub points: &'a [Point],
    pub blocks: &'a [Block],
    pub edges: Vec<EdgeDefinition<'a>>,
    pub patches: &'a [Patch],
    pub neighbours: &'a NeighbourTable,
    /// Open edges as `(start, end)` point pairs.
    pub open_edges: Vec<(PointIndex, PointIndex)>,
}

impl<'a> BlockMeshDescription<'a> {
    pub fn new(builder: &'a BlockMeshBuilder) -> Self {
        let edges = builder
            .edges()
            .defined()
            .filter_map(|(slot, e)| {
                Some(EdgeDefinition {
                    slot,
                    start: e.start,
                    end: e.end,
                    curve: e.curve.as_ref()?,
                })
            })
            .collect();
        let open_edges = builder
            .open_edges()
            .iter()
            .filter_map(|&slot| builder.edges().get(slot).ok())
            .map(|e| (e.start, e.end))
            .collect();
        Self {
            context: builder.context(),
            points: builder.points(),
            blocks: builder.blocks(),
            edges,
            patches: builder.patches(),
            neighbours: builder.block_blocks(),
            open_edges,
        }
    }

    /// Only the edges that are not straight.
    pub fn curved_edges(&self) -> impl Iterator<Item = &EdgeDefinition<'a>> {
        self.edges.iter().filter(|e| !e.curve.is_straight())
    }
}
