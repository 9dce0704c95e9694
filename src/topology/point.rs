//! `PointStore`: the append-only list of block corner coordinates.
//!
//! A point's identity is its position in the store. Indices are stable once
//! assigned and never reused; the only way to drop points is a full reset
//! of the builder.

use serde::Serialize;

use crate::mesh_error::BlockMeshError;

/// A 3D coordinate.
pub type Point = [f64; 3];

/// Index of a point in the [`PointStore`].
pub type PointIndex = usize;

/// Ordered, append-only sequence of points.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point and return its index.
    #[inline]
    pub fn push(&mut self, p: Point) -> PointIndex {
        self.points.push(p);
        self.points.len() - 1
    }

    /// Append points in order.
    pub fn extend<I: IntoIterator<Item = Point>>(&mut self, pts: I) {
        self.points.extend(pts);
    }

    /// Bounds-checked lookup.
    pub fn get(&self, index: PointIndex) -> Result<&Point, BlockMeshError> {
        self.points
            .get(index)
            .ok_or(BlockMeshError::InvalidPointIndex {
                index,
                len: self.points.len(),
            })
    }

    /// Bounds-checked mutable lookup. Moving a point never changes topology.
    pub fn get_mut(&mut self, index: PointIndex) -> Result<&mut Point, BlockMeshError> {
        let len = self.points.len();
        self.points
            .get_mut(index)
            .ok_or(BlockMeshError::InvalidPointIndex { index, len })
    }

    /// Fails with `InvalidPointIndex` unless `index` refers to a stored point.
    #[inline]
    pub fn check(&self, index: PointIndex) -> Result<(), BlockMeshError> {
        self.get(index).map(|_| ())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
