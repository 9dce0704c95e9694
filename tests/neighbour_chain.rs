mod util;

use blockmesh_topology::prelude::*;
use util::*;

fn row(n: usize) -> BlockMeshBuilder {
    let mut b = builder();
    block_lattice(&mut b, &LatticeSpec::unit([n, 1, 1], [2, 2, 2])).unwrap();
    b
}

#[test]
fn chain_of_three_hops_returns_four_blocks() {
    let b = row(5);
    assert_eq!(b.neighbour_block_chain(0, 1, 3).unwrap(), vec![0, 1, 2, 3]);
    assert_eq!(b.neighbour_block_chain(1, 1, 3).unwrap(), vec![1, 2, 3, 4]);
}

#[test]
fn short_chain_is_not_an_error() {
    let b = row(2);
    assert_eq!(b.neighbour_block_chain(0, 1, 3).unwrap(), vec![0, 1]);
    assert_eq!(b.neighbour_block_chain(0, 0, 3).unwrap(), vec![0]);
}

#[test]
fn unlimited_chain_walks_to_the_end() {
    let b = row(6);
    assert_eq!(b.neighbour_block_chain(5, 0, 0).unwrap(), vec![5, 4, 3, 2, 1, 0]);
}

#[test]
fn chain_rejects_bad_arguments() {
    let b = row(2);
    assert!(matches!(
        b.neighbour_block_chain(7, 1, 1),
        Err(BlockMeshError::InvalidBlockIndex { index: 7, .. })
    ));
    assert_eq!(
        b.neighbour_block_chain(0, 9, 1),
        Err(BlockMeshError::InvalidFaceId(9))
    );
}

#[test]
fn chain_follows_extruded_blocks_through_rotated_faces() {
    let mut b = builder();
    b.add_points(UNIT_CUBE);
    b.add_block([0, 1, 2, 3, 4, 5, 6, 7], [2, 3, 4], UNIFORM_GRADING, None)
        .unwrap();
    let mut start = 0;
    let mut face = 1;
    for step in 1..=3 {
        let x = 1.0 + step as f64;
        let far = [
            FaceCorner::New([x, 0.0, 0.0]),
            FaceCorner::New([x, 1.0, 0.0]),
            FaceCorner::New([x, 1.0, 1.0]),
            FaceCorner::New([x, 0.0, 1.0]),
        ];
        start = b.extrude_block(start, face, &far, 1, UNIFORM_GRADING, None).unwrap();
        // Extruded blocks grow along their local z, so the far face is z-max.
        face = 5;
    }
    assert_eq!(start, 3);
    assert_eq!(b.neighbour_block_chain(0, 1, 0).unwrap(), vec![0, 1, 2, 3]);
    assert_eq!(b.neighbour_block_chain(3, 4, 2).unwrap(), vec![3, 2, 1]);
    // Every extruded block inherits the cube's y and z counts on its face.
    for i in 1..=3 {
        assert_eq!(b[i].cells, [3, 4, 1]);
    }
    assert!(b.validate_invariants().is_ok());
}

#[test]
fn extrusion_can_close_onto_existing_points() {
    let n = [2, 1, 1];
    let mut b = builder();
    grid_points(&mut b, n);
    b.add_block(grid_corners(n, 0, 0, 0), [1, 1, 1], UNIFORM_GRADING, None)
        .unwrap();
    let far = [
        grid_point(n, 2, 0, 0),
        grid_point(n, 2, 1, 0),
        grid_point(n, 2, 1, 1),
        grid_point(n, 2, 0, 1),
    ]
    .map(FaceCorner::from);
    let points = b.points().len();
    let idx = b.extrude_block(0, 1, &far, 2, UNIFORM_GRADING, None).unwrap();
    assert_eq!(b.points().len(), points);
    assert_eq!(b.block_blocks().neighbours(idx)[4], Some(0));
    assert_eq!(b[idx].cells, [1, 1, 2]);
}
