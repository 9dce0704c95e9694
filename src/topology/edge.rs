//! Edge table: every block edge in the mesh, with optional curve data.
//!
//! An edge is registered (and receives a stable slot index) the first time a
//! block using it is committed. A registered edge without a curve is an
//! implicit straight line. Curves are stored per endpoint pair, so two blocks
//! sharing an edge see the same definition.

use hashbrown::HashMap;
use serde::Serialize;

use crate::mesh_error::BlockMeshError;
use crate::topology::point::{Point, PointIndex};

/// Index of an edge slot in the [`EdgeTable`].
pub type EdgeIndex = usize;

/// Curve kinds understood by downstream writers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveKind {
    /// Straight segment, no interior points.
    Line,
    /// Piecewise-linear path through the interior points.
    PolyLine,
    /// Spline through the interior points.
    Spline,
    /// Circular arc through exactly one interior point.
    Arc,
    /// Path projected onto the named geometry.
    Projected(String),
}

impl CurveKind {
    pub fn name(&self) -> &'static str {
        match self {
            CurveKind::Line => "line",
            CurveKind::PolyLine => "polyLine",
            CurveKind::Spline => "spline",
            CurveKind::Arc => "arc",
            CurveKind::Projected(_) => "projected",
        }
    }
}

/// A curve definition together with its control-point payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CurveShape {
    Line,
    PolyLine { points: Vec<Point> },
    Spline { points: Vec<Point> },
    Arc { through: Point },
    Projected { geometry: String, points: Vec<Point> },
}

impl CurveShape {
    /// Build a shape from a kind tag and interior points, checking arity.
    pub fn new(kind: CurveKind, points: Vec<Point>) -> Result<Self, BlockMeshError> {
        let name = kind.name();
        let invalid = |detail: String| BlockMeshError::InvalidCurve { kind: name, detail };
        match kind {
            CurveKind::Line if points.is_empty() => Ok(CurveShape::Line),
            CurveKind::Line => Err(invalid(format!(
                "expected no interior points, got {}",
                points.len()
            ))),
            CurveKind::Arc => match points.as_slice() {
                [p] => Ok(CurveShape::Arc { through: *p }),
                _ => Err(invalid(format!(
                    "expected exactly one interior point, got {}",
                    points.len()
                ))),
            },
            CurveKind::PolyLine => Ok(CurveShape::PolyLine { points }),
            CurveKind::Spline => Ok(CurveShape::Spline { points }),
            CurveKind::Projected(geometry) => Ok(CurveShape::Projected { geometry, points }),
        }
    }

    pub fn kind(&self) -> CurveKind {
        match self {
            CurveShape::Line => CurveKind::Line,
            CurveShape::PolyLine { .. } => CurveKind::PolyLine,
            CurveShape::Spline { .. } => CurveKind::Spline,
            CurveShape::Arc { .. } => CurveKind::Arc,
            CurveShape::Projected { geometry, .. } => CurveKind::Projected(geometry.clone()),
        }
    }

    /// Interior control points, in start-to-end order.
    pub fn interior_points(&self) -> &[Point] {
        match self {
            CurveShape::Line => &[],
            CurveShape::Arc { through } => std::slice::from_ref(through),
            CurveShape::PolyLine { points }
            | CurveShape::Spline { points }
            | CurveShape::Projected { points, .. } => points,
        }
    }

    #[inline]
    pub fn is_straight(&self) -> bool {
        matches!(self, CurveShape::Line)
    }

    /// The same curve traversed end-to-start.
    pub fn reversed(&self) -> Self {
        let mut out = self.clone();
        match &mut out {
            CurveShape::PolyLine { points }
            | CurveShape::Spline { points }
            | CurveShape::Projected { points, .. } => points.reverse(),
            CurveShape::Line | CurveShape::Arc { .. } => {}
        }
        out
    }

    /// Control polygon from `start` through the interior points to `end`.
    pub fn control_polygon(&self, start: Point, end: Point) -> Vec<Point> {
        let interior = self.interior_points();
        let mut out = Vec::with_capacity(interior.len() + 2);
        out.push(start);
        out.extend_from_slice(interior);
        out.push(end);
        out
    }
}

/// One registered edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlockEdge {
    pub start: PointIndex,
    pub end: PointIndex,
    /// Cells along the edge, taken from the first block that registered it.
    pub cells: usize,
    /// `None` for an implicit straight edge.
    pub curve: Option<CurveShape>,
}

impl BlockEdge {
    #[inline]
    pub fn key(&self) -> (PointIndex, PointIndex) {
        edge_key(self.start, self.end)
    }

    /// The curve as seen when walking `from -> to`, if `from` is an endpoint.
    pub fn curve_from(&self, from: PointIndex) -> Option<CurveShape> {
        let curve = self.curve.as_ref()?;
        if from == self.start {
            Some(curve.clone())
        } else if from == self.end {
            Some(curve.reversed())
        } else {
            None
        }
    }
}

/// Unordered identity of an edge.
#[inline]
pub fn edge_key(a: PointIndex, b: PointIndex) -> (PointIndex, PointIndex) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Ordered collection of edges keyed by endpoint pair.
#[derive(Clone, Debug, Default)]
pub struct EdgeTable {
    edges: Vec<BlockEdge>,
    by_key: HashMap<(PointIndex, PointIndex), EdgeIndex>,
}

impl EdgeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot of the edge joining `a` and `b`, in either direction.
    #[inline]
    pub fn find(&self, a: PointIndex, b: PointIndex) -> Option<EdgeIndex> {
        self.by_key.get(&edge_key(a, b)).copied()
    }

    /// Register `start -> end` if unknown. Returns the slot and whether it is new.
    pub(crate) fn register(
        &mut self,
        start: PointIndex,
        end: PointIndex,
        cells: usize,
    ) -> (EdgeIndex, bool) {
        if let Some(idx) = self.find(start, end) {
            return (idx, false);
        }
        let idx = self.edges.len();
        self.edges.push(BlockEdge {
            start,
            end,
            cells,
            curve: None,
        });
        self.by_key.insert(edge_key(start, end), idx);
        (idx, true)
    }

    /// Store `curve` for the edge, oriented `start -> end`.
    pub(crate) fn define(
        &mut self,
        idx: EdgeIndex,
        start: PointIndex,
        end: PointIndex,
        curve: CurveShape,
    ) -> Result<(), BlockMeshError> {
        let edge = self
            .edges
            .get_mut(idx)
            .ok_or(BlockMeshError::UnknownEdge(idx))?;
        if edge.key() != edge_key(start, end) {
            return Err(BlockMeshError::UnknownEdge(idx));
        }
        edge.start = start;
        edge.end = end;
        edge.curve = Some(curve);
        Ok(())
    }

    /// Replace the geometry of an existing slot, keeping its orientation.
    pub(crate) fn reset(&mut self, idx: EdgeIndex, curve: CurveShape) -> Result<(), BlockMeshError> {
        let edge = self
            .edges
            .get_mut(idx)
            .ok_or(BlockMeshError::UnknownEdge(idx))?;
        edge.curve = Some(curve);
        Ok(())
    }

    pub fn get(&self, idx: EdgeIndex) -> Result<&BlockEdge, BlockMeshError> {
        self.edges.get(idx).ok_or(BlockMeshError::UnknownEdge(idx))
    }

    /// Number of registered edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockEdge> {
        self.edges.iter()
    }

    /// Edges with a stored curve definition, with their slots.
    pub fn defined(&self) -> impl Iterator<Item = (EdgeIndex, &BlockEdge)> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.curve.is_some())
    }

    /// Edges carrying a non-straight curve.
    pub fn curved(&self) -> impl Iterator<Item = (EdgeIndex, &BlockEdge)> {
        self.defined()
            .filter(|(_, e)| e.curve.as_ref().is_some_and(|c| !c.is_straight()))
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.by_key.clear();
    }
}
