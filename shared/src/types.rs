use std::fmt;

use naia_serde::{BitReader, BitWrite, Serde, SerdeErr};

/// Identifies a participant of the session. The authority always answers to
/// [`PeerId::AUTHORITY`].
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct PeerId(u64);

impl PeerId {
    pub const AUTHORITY: PeerId = PeerId(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub fn is_authority(&self) -> bool {
        *self == Self::AUTHORITY
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_authority() {
            write!(f, "authority")
        } else {
            write!(f, "peer#{}", self.0)
        }
    }
}

impl Serde for PeerId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u64::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        self.0.bit_length()
    }
}

/// Globally unique id of a replicated object, assigned by the authority at
/// spawn time.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

impl Serde for ObjectId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u64::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        self.0.bit_length()
    }
}

/// Correlates the authority's and the peers' instances of one loaded scene.
/// Zero is reserved for "no scene" in wire headers.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct SceneHandle(u32);

impl SceneHandle {
    pub(crate) const NONE_ON_WIRE: u32 = 0;

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn to_u32(&self) -> u32 {
        self.0
    }

    pub(crate) fn from_wire(value: u32) -> Option<Self> {
        if value == Self::NONE_ON_WIRE {
            None
        } else {
            Some(Self(value))
        }
    }
}

impl fmt::Display for SceneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

impl Serde for SceneHandle {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let value = u32::de(reader)?;
        Self::from_wire(value).ok_or(SerdeErr)
    }

    fn bit_length(&self) -> u32 {
        self.0.bit_length()
    }
}

/// Identifies the template an object was instantiated from, stable across
/// processes with different local asset indices.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct PrefabHash(u32);

impl PrefabHash {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn to_u32(&self) -> u32 {
        self.0
    }
}

impl Serde for PrefabHash {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u32::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        self.0.bit_length()
    }
}

/// FNV-1a hash of a scene name. Scene names travel as hashes and are resolved
/// through the local [`SceneCatalog`](crate::SceneCatalog).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SceneNameHash(u32);

impl SceneNameHash {
    const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
    const FNV_PRIME: u32 = 0x0100_0193;

    pub fn of(name: &str) -> Self {
        let mut hash = Self::FNV_OFFSET_BASIS;
        for byte in name.as_bytes() {
            hash ^= *byte as u32;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
        }
        Self(hash)
    }

    pub(crate) const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    pub fn to_u32(&self) -> u32 {
        self.0
    }
}

impl Serde for SceneNameHash {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u32::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        self.0.bit_length()
    }
}
