//! BlockMeshError: unified error type for the block-mesh topology builder.
//!
//! Every failure is a local validation failure raised by the call that
//! violates an invariant. The builder never repairs input and never commits
//! a partially constructed block, edge or patch.

use thiserror::Error;

/// Unified error type for block-mesh topology operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BlockMeshError {
    /// A point index does not refer to a stored point.
    #[error("invalid point index {index} (point count {len})")]
    InvalidPointIndex { index: usize, len: usize },
    /// A block index does not refer to a stored block.
    #[error("invalid block index {index} (block count {len})")]
    InvalidBlockIndex { index: usize, len: usize },
    /// A local edge id outside `0..12`.
    #[error("invalid local edge id {0} (expected 0..12)")]
    InvalidEdgeId(usize),
    /// A local face id outside `0..6`.
    #[error("invalid local face id {0} (expected 0..6)")]
    InvalidFaceId(usize),
    /// An edge slot that was never created or carries no curve definition.
    #[error("unknown edge {0}")]
    UnknownEdge(usize),
    /// Interior points do not fit the requested curve kind.
    #[error("invalid {kind} curve: {detail}")]
    InvalidCurve { kind: &'static str, detail: String },
    /// A patch index that was never created.
    #[error("unknown patch {index} (patch count {len})")]
    UnknownPatch { index: usize, len: usize },
    /// Extrusion input does not describe a valid face.
    #[error("face mismatch: {0}")]
    FaceMismatch(String),
    /// A face would be shared by more than two blocks.
    #[error(
        "degenerate topology: face {face} of new block {block} is shared with blocks {candidates:?}"
    )]
    DegenerateTopology {
        block: usize,
        face: usize,
        candidates: Vec<usize>,
    },
    /// Two face neighbours disagree on subdivision or grading.
    #[error("inconsistent grading between block {block} (face {face}) and block {neighbour}: {detail}")]
    InconsistentGrading {
        block: usize,
        neighbour: usize,
        face: usize,
        detail: String,
    },
    /// Two blocks sharing an edge disagree on the number of cells along it.
    #[error(
        "inconsistent cells along edge ({start}, {end}): block {block} wants {requested}, existing blocks use {existing}"
    )]
    InconsistentEdgeSteps {
        block: usize,
        start: usize,
        end: usize,
        existing: usize,
        requested: usize,
    },
    /// A patch name is already registered.
    #[error("duplicate patch name `{0}`")]
    DuplicateName(String),
    /// Cell counts must be positive.
    #[error("invalid cell count {count} along axis {axis}")]
    InvalidCellCount { axis: usize, count: usize },
    /// Grading factors must be finite and positive.
    #[error("invalid grading factor {factor} along axis {axis}")]
    InvalidGrading { axis: usize, factor: f64 },
    /// Derived state disagrees with the authoritative stores.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
