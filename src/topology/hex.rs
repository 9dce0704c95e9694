//! Local numbering conventions of a hexahedral block.
//!
//! Corners are numbered by their position along the block's local
//! `(x, y, z)` axes:
//!
//! ```text
//!        7 ---------- 6
//!       /|           /|
//!      4 ---------- 5 |        z
//!      | |          | |        |  y
//!      | 3 ---------|-2        | /
//!      |/           |/         |/
//!      0 ---------- 1          +---- x
//! ```
//!
//! Edges are grouped by direction (`0..4` along x, `4..8` along y, `8..12`
//! along z) and always run from the low to the high corner. Faces come in
//! opposite pairs (`x-min, x-max, y-min, y-max, z-min, z-max`), so the face
//! opposite to `f` is `f ^ 1`. Face corners are ordered so that the
//! right-hand normal points out of the block.

use crate::mesh_error::BlockMeshError;

/// Number of corners of a block.
pub const N_CORNERS: usize = 8;
/// Number of local edges of a block.
pub const N_EDGES: usize = 12;
/// Number of local faces of a block.
pub const N_FACES: usize = 6;

/// Local `(x, y, z)` position of each corner.
pub const CORNER_COORDS: [[u8; 3]; N_CORNERS] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// `(start, end)` corners of each local edge.
pub const EDGE_CORNERS: [[usize; 2]; N_EDGES] = [
    [0, 1],
    [3, 2],
    [7, 6],
    [4, 5],
    [0, 3],
    [1, 2],
    [5, 6],
    [4, 7],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Corners of each local face, outward-oriented.
pub const FACE_CORNERS: [[usize; 4]; N_FACES] = [
    [0, 4, 7, 3],
    [1, 2, 6, 5],
    [0, 1, 5, 4],
    [3, 7, 6, 2],
    [0, 3, 2, 1],
    [4, 5, 6, 7],
];

/// Face names, handy for log and error messages.
pub const FACE_NAMES: [&str; N_FACES] = ["x-min", "x-max", "y-min", "y-max", "z-min", "z-max"];

/// The face on the other side of the block.
#[inline]
pub const fn opposite_face(face: usize) -> usize {
    face ^ 1
}

/// Local axis a face is normal to.
#[inline]
pub const fn face_normal_axis(face: usize) -> usize {
    face / 2
}

/// Local axis an edge runs along.
#[inline]
pub const fn edge_axis(edge: usize) -> usize {
    edge / 4
}

/// Local axis connecting two corners and whether `a -> b` runs in the
/// positive direction. `None` if the corners are not joined by an edge.
pub fn corner_axis(a: usize, b: usize) -> Option<(usize, bool)> {
    if a >= N_CORNERS || b >= N_CORNERS {
        return None;
    }
    let (ca, cb) = (CORNER_COORDS[a], CORNER_COORDS[b]);
    let mut axis = None;
    for k in 0..3 {
        if ca[k] != cb[k] {
            if axis.is_some() {
                return None;
            }
            axis = Some((k, cb[k] > ca[k]));
        }
    }
    axis
}

/// Local edge joining two corners, in either order.
pub fn edge_between(a: usize, b: usize) -> Option<usize> {
    EDGE_CORNERS
        .iter()
        .position(|&[s, e]| (s == a && e == b) || (s == b && e == a))
}

pub(crate) fn check_edge_id(edge: usize) -> Result<(), BlockMeshError> {
    if edge < N_EDGES {
        Ok(())
    } else {
        Err(BlockMeshError::InvalidEdgeId(edge))
    }
}

pub(crate) fn check_face_id(face: usize) -> Result<(), BlockMeshError> {
    if face < N_FACES {
        Ok(())
    } else {
        Err(BlockMeshError::InvalidFaceId(face))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(c: usize) -> [i32; 3] {
        CORNER_COORDS[c].map(i32::from)
    }

    fn sub(a: [i32; 3], b: [i32; 3]) -> [i32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [i32; 3], b: [i32; 3]) -> [i32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    #[test]
    fn edges_run_low_to_high_along_their_axis() {
        for (edge, &[s, e]) in EDGE_CORNERS.iter().enumerate() {
            assert_eq!(corner_axis(s, e), Some((edge_axis(edge), true)), "edge {edge}");
        }
    }

    #[test]
    fn faces_point_outward() {
        for (face, corners) in FACE_CORNERS.iter().enumerate() {
            let o = coords(corners[0]);
            let n = cross(sub(coords(corners[1]), o), sub(coords(corners[3]), o));
            let axis = face_normal_axis(face);
            let mut expected = [0; 3];
            expected[axis] = if face % 2 == 0 { -1 } else { 1 };
            assert_eq!(n, expected, "face {}", FACE_NAMES[face]);
        }
    }

    #[test]
    fn opposite_faces_are_disjoint_and_cover_all_corners() {
        for face in (0..N_FACES).step_by(2) {
            let mut all: Vec<usize> = FACE_CORNERS[face]
                .iter()
                .chain(FACE_CORNERS[opposite_face(face)].iter())
                .copied()
                .collect();
            all.sort_unstable();
            assert_eq!(all, (0..N_CORNERS).collect::<Vec<_>>());
        }
    }

    #[test]
    fn face_edges_are_block_edges() {
        for corners in FACE_CORNERS {
            for k in 0..4 {
                assert!(edge_between(corners[k], corners[(k + 1) % 4]).is_some());
            }
        }
    }

    #[test]
    fn diagonal_corners_have_no_axis() {
        assert_eq!(corner_axis(0, 2), None);
        assert_eq!(corner_axis(0, 6), None);
        assert_eq!(corner_axis(2, 1), Some((1, false)));
    }

    #[test]
    fn id_checks() {
        assert!(check_edge_id(11).is_ok());
        assert_eq!(check_edge_id(12), Err(BlockMeshError::InvalidEdgeId(12)));
        assert!(check_face_id(5).is_ok());
        assert_eq!(check_face_id(6), Err(BlockMeshError::InvalidFaceId(6)));
    }
}
