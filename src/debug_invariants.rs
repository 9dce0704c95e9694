//! Consistency checks run after every committed block.
//!
//! For a [`BlockMeshBuilder`](crate::builder::BlockMeshBuilder) they cover:
//! every block corner names a stored point; point and edge membership
//! matches a rebuild from the block list; an edge is open exactly while
//! fewer blocks than the threshold use it; neighbour links are mutual and
//! join faces with equal point sets; patch faces reference real blocks.
//! The checks live in [`validate_topology`](crate::topology::validation::validate_topology).

use crate::mesh_error::BlockMeshError;

/// Self-check for a structure with incrementally maintained indices.
pub trait DebugInvariants {
    /// Panic on the first violation when `debug_invariants!` is compiled in.
    fn debug_assert_invariants(&self);
    /// Return the first violation as [`BlockMeshError::InvariantViolation`].
    fn validate_invariants(&self) -> Result<(), BlockMeshError>;
}

/// Turn a failed condition into [`BlockMeshError::InvariantViolation`].
#[inline]
pub(crate) fn ensure(cond: bool, message: impl FnOnce() -> String) -> Result<(), BlockMeshError> {
    if cond {
        Ok(())
    } else {
        Err(BlockMeshError::InvariantViolation(message()))
    }
}

/// Run a fallible validation and panic with context when invariant checking
/// is compiled in (debug builds, `strict-invariants`, `check-invariants`).
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[blockmesh invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_reports_the_message_only_on_failure() {
        assert!(ensure(true, || unreachable!()).is_ok());
        assert_eq!(
            ensure(false, || "edge 3 used by 5 blocks".to_string()),
            Err(BlockMeshError::InvariantViolation("edge 3 used by 5 blocks".into()))
        );
    }
}
