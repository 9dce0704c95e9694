#![allow(dead_code)]
use blockmesh_topology::{
    builder::{BlockMeshBuilder, BuilderOptions, RunContext},
    topology::point::{Point, PointIndex},
};

pub const UNIT_CUBE: [Point; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

pub fn builder() -> BlockMeshBuilder {
    BlockMeshBuilder::new(RunContext::new("test", "0"))
}

pub fn builder_with(options: BuilderOptions) -> BlockMeshBuilder {
    BlockMeshBuilder::with_options(RunContext::new("test", "0"), options)
}

/// Append the points of an `n[0] × n[1] × n[2]` unit grid of blocks
/// (i fastest) and return the index of the first one.
pub fn grid_points(b: &mut BlockMeshBuilder, n: [usize; 3]) -> PointIndex {
    let base = b.points().len();
    for k in 0..=n[2] {
        for j in 0..=n[1] {
            for i in 0..=n[0] {
                b.add_point([i as f64, j as f64, k as f64]);
            }
        }
    }
    base
}

/// Point index of grid vertex `(i, j, k)`.
pub fn grid_point(n: [usize; 3], i: usize, j: usize, k: usize) -> PointIndex {
    i + (n[0] + 1) * (j + (n[1] + 1) * k)
}

/// Corners of grid cell `(i, j, k)` in local corner order.
pub fn grid_corners(n: [usize; 3], i: usize, j: usize, k: usize) -> [PointIndex; 8] {
    let p = |di, dj, dk| grid_point(n, i + di, j + dj, k + dk);
    [
        p(0, 0, 0),
        p(1, 0, 0),
        p(1, 1, 0),
        p(0, 1, 0),
        p(0, 0, 1),
        p(1, 0, 1),
        p(1, 1, 1),
        p(0, 1, 1),
    ]
}

/// Serialised description, for before/after comparisons.
pub fn snapshot(b: &BlockMeshBuilder) -> serde_json::Value {
    serde_json::to_value(b.description()).unwrap()
}
