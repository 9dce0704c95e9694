//! Named boundary patches built from block faces.

use hashbrown::HashMap;
use serde::Serialize;

use crate::mesh_error::BlockMeshError;
use crate::topology::block::BlockIndex;

/// Index of a patch in the [`PatchRegistry`].
pub type PatchIndex = usize;

/// Boundary type tag written alongside a patch.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum PatchType {
    Patch,
    Wall,
    SymmetryPlane,
    Empty,
    Cyclic,
    Other(String),
}

impl PatchType {
    pub fn as_str(&self) -> &str {
        match self {
            PatchType::Patch => "patch",
            PatchType::Wall => "wall",
            PatchType::SymmetryPlane => "symmetryPlane",
            PatchType::Empty => "empty",
            PatchType::Cyclic => "cyclic",
            PatchType::Other(s) => s,
        }
    }
}

impl From<&str> for PatchType {
    fn from(s: &str) -> Self {
        match s {
            "patch" => PatchType::Patch,
            "wall" => PatchType::Wall,
            "symmetryPlane" => PatchType::SymmetryPlane,
            "empty" => PatchType::Empty,
            "cyclic" => PatchType::Cyclic,
            other => PatchType::Other(other.to_string()),
        }
    }
}

impl From<PatchType> for String {
    fn from(t: PatchType) -> Self {
        t.as_str().to_string()
    }
}

/// A face of a block contributed to a patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PatchFace {
    pub block: BlockIndex,
    pub face: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Patch {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PatchType,
    pub faces: Vec<PatchFace>,
}

/// Ordered patches with a name index.
#[derive(Clone, Debug, Default)]
pub struct PatchRegistry {
    patches: Vec<Patch>,
    by_name: HashMap<String, PatchIndex>,
}

impl PatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty patch. Names are unique.
    pub fn add(&mut self, name: &str, kind: PatchType) -> Result<PatchIndex, BlockMeshError> {
        if self.by_name.contains_key(name) {
            return Err(BlockMeshError::DuplicateName(name.to_string()));
        }
        let idx = self.patches.len();
        self.patches.push(Patch {
            name: name.to_string(),
            kind,
            faces: Vec::new(),
        });
        self.by_name.insert(name.to_string(), idx);
        Ok(idx)
    }

    /// Append a face to an existing patch. Block and face must already be validated.
    pub(crate) fn contribute(
        &mut self,
        patch: PatchIndex,
        face: PatchFace,
    ) -> Result<(), BlockMeshError> {
        let len = self.patches.len();
        let p = self
            .patches
            .get_mut(patch)
            .ok_or(BlockMeshError::UnknownPatch { index: patch, len })?;
        p.faces.push(face);
        Ok(())
    }

    pub fn get(&self, patch: PatchIndex) -> Result<&Patch, BlockMeshError> {
        self.patches.get(patch).ok_or(BlockMeshError::UnknownPatch {
            index: patch,
            len: self.patches.len(),
        })
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<PatchIndex> {
        self.by_name.get(name).copied()
    }

    pub fn names(&self) -> &HashMap<String, PatchIndex> {
        &self.by_name
    }

    #[inline]
    pub fn as_slice(&self) -> &[Patch] {
        &self.patches
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn clear(&mut self) {
        self.patches.clear();
        self.by_name.clear();
    }
}
