mod util;

use blockmesh_topology::prelude::*;
use util::*;

const N: [usize; 3] = [2, 1, 1];

fn first_block() -> BlockMeshBuilder {
    let mut b = builder();
    grid_points(&mut b, N);
    b.add_block(grid_corners(N, 0, 0, 0), [4, 2, 3], UNIFORM_GRADING, None)
        .unwrap();
    b
}

#[test]
fn cell_mismatch_fails_without_side_effects() {
    let mut b = first_block();
    let before = snapshot(&b);
    let point_blocks = b.point_blocks().to_vec();

    let err = b
        .add_block(grid_corners(N, 1, 0, 0), [4, 5, 3], UNIFORM_GRADING, None)
        .unwrap_err();
    assert!(matches!(
        err,
        BlockMeshError::InconsistentGrading {
            block: 1,
            neighbour: 0,
            face: 0,
            ..
        }
    ));
    assert_eq!(b.len(), 1);
    assert_eq!(b.block_blocks().len(), 1);
    assert_eq!(b.edges().len(), 12);
    assert_eq!(b.point_blocks(), point_blocks.as_slice());
    assert_eq!(snapshot(&b), before);
}

#[test]
fn grading_mismatch_is_inconsistent() {
    let mut b = first_block();
    let err = b
        .add_block(grid_corners(N, 1, 0, 0), [4, 2, 3], [1.0, 2.0, 1.0], None)
        .unwrap_err();
    assert!(matches!(err, BlockMeshError::InconsistentGrading { .. }));
    // Grading along the face normal is free.
    b.add_block(grid_corners(N, 1, 0, 0), [7, 2, 3], [3.0, 1.0, 1.0], None)
        .unwrap();
}

#[test]
fn relaxed_policies_accept_mismatched_neighbour() {
    for consistency in [ConsistencyHandling::Warn, ConsistencyHandling::Ignore] {
        let mut b = builder_with(BuilderOptions {
            consistency,
            ..BuilderOptions::default()
        });
        grid_points(&mut b, N);
        b.add_block(grid_corners(N, 0, 0, 0), [4, 2, 3], UNIFORM_GRADING, None)
            .unwrap();
        let idx = b
            .add_block(grid_corners(N, 1, 0, 0), [4, 5, 3], UNIFORM_GRADING, None)
            .unwrap();
        assert_eq!(b.block_blocks().neighbours(idx)[0], Some(0), "{consistency:?}");
        // The shared edges keep the cell count of the block that created them.
        let shared = b
            .edges()
            .find(grid_point(N, 1, 0, 0), grid_point(N, 1, 1, 0))
            .unwrap();
        assert_eq!(b.edge_steps()[shared], 2);
    }
}

#[test]
fn edge_steps_can_be_switched_off() {
    let mut b = builder_with(BuilderOptions {
        check_edge_steps: false,
        ..BuilderOptions::default()
    });
    b.add_points(UNIT_CUBE);
    b.add_block([0, 1, 2, 3, 4, 5, 6, 7], [2, 2, 2], UNIFORM_GRADING, None)
        .unwrap();
    let far = b.points().len();
    b.add_points([
        [2.0, 0.0, 0.0],
        [2.0, -1.0, 0.0],
        [1.0, -1.0, 0.0],
        [2.0, 0.0, 1.0],
        [2.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
    ]);
    let corners = [far + 2, far + 1, far, 1, far + 5, far + 4, far + 3, 5];
    assert!(b.add_block(corners, [2, 2, 3], UNIFORM_GRADING, None).is_ok());
}

#[test]
fn edge_steps_catch_edge_only_contact() {
    // Blocks meeting along a single edge have no face to compare.
    let mut b = builder();
    b.add_points(UNIT_CUBE);
    b.add_block([0, 1, 2, 3, 4, 5, 6, 7], [2, 2, 2], UNIFORM_GRADING, None)
        .unwrap();
    let far = b.points().len();
    b.add_points([
        [2.0, 0.0, 0.0],
        [2.0, -1.0, 0.0],
        [1.0, -1.0, 0.0],
        [2.0, 0.0, 1.0],
        [2.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
    ]);
    // Shares the vertical edge (1, 5) with the cube.
    let corners = [far + 2, far + 1, far, 1, far + 5, far + 4, far + 3, 5];
    let err = b
        .add_block(corners, [2, 2, 3], UNIFORM_GRADING, None)
        .unwrap_err();
    assert_eq!(
        err,
        BlockMeshError::InconsistentEdgeSteps {
            block: 1,
            start: 1,
            end: 5,
            existing: 2,
            requested: 3,
        }
    );
    b.add_block(corners, [2, 2, 2], UNIFORM_GRADING, None).unwrap();
    assert_eq!(b.block_blocks().neighbours(1), [None; 6]);
}

#[test]
fn third_block_on_a_face_is_degenerate() {
    let mut b = first_block();
    b.add_block(grid_corners(N, 1, 0, 0), [4, 2, 3], UNIFORM_GRADING, None)
        .unwrap();
    let before = snapshot(&b);
    let err = b
        .add_block(grid_corners(N, 1, 0, 0), [4, 2, 3], UNIFORM_GRADING, None)
        .unwrap_err();
    assert!(matches!(err, BlockMeshError::DegenerateTopology { block: 2, .. }));
    assert_eq!(snapshot(&b), before);
}
