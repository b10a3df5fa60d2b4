use std::fmt;

use naia_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{
    wire::{bit_length_option, de_option, ser_option},
    ObjectId, PeerId, PrefabHash,
};

/// Sibling-index path from the scene root to an object placed in a scene
/// asset. Assigned when the scene is built, so two isomorphic hierarchies in
/// one scene still get distinct, deterministic identities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraversalPath(Vec<u16>);

impl TraversalPath {
    pub fn new(indices: Vec<u16>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[u16] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: u16) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }
}

impl From<&[u16]> for TraversalPath {
    fn from(indices: &[u16]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for TraversalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

impl Serde for TraversalPath {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let depth = u8::try_from(self.0.len()).unwrap_or(u8::MAX);
        depth.ser(writer);
        for index in self.0.iter().take(depth as usize) {
            index.ser(writer);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let depth = u8::de(reader)?;
        let mut indices = Vec::with_capacity(depth as usize);
        for _ in 0..depth {
            indices.push(u16::de(reader)?);
        }
        Ok(Self(indices))
    }

    fn bit_length(&self) -> u32 {
        let depth = self.0.len().min(u8::MAX as usize) as u32;
        8 + depth * 16
    }
}

/// An object found in a freshly loaded scene asset, as reported by the
/// local engine before any network identity is attached to it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneObjectTemplate {
    pub prefab_hash: PrefabHash,
    pub path: TraversalPath,
    pub active: bool,
}

impl SceneObjectTemplate {
    pub fn new(prefab_hash: PrefabHash, path: TraversalPath) -> Self {
        Self {
            prefab_hash,
            path,
            active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// The authority's registration of one scene object, shipped inside `Load`
/// and `Synchronize` records so peers can attach the authority's id to
/// their own instance of the same scene object
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneObjectEntry {
    pub object_id: ObjectId,
    pub prefab_hash: PrefabHash,
    pub path: TraversalPath,
    pub owner: Option<PeerId>,
    pub active: bool,
}

impl Serde for SceneObjectEntry {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.object_id.ser(writer);
        self.prefab_hash.ser(writer);
        self.path.ser(writer);
        ser_option(&self.owner, writer);
        self.active.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            object_id: ObjectId::de(reader)?,
            prefab_hash: PrefabHash::de(reader)?,
            path: TraversalPath::de(reader)?,
            owner: de_option(reader)?,
            active: bool::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.object_id.bit_length()
            + self.prefab_hash.bit_length()
            + self.path.bit_length()
            + bit_length_option(&self.owner)
            + self.active.bit_length()
    }
}
