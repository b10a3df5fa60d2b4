use naia_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{
    object::error::ObjectMessageError,
    wire::{bit_length_option, de_option, ser_option, RecordWriter},
    ObjectId, PeerId, PrefabHash, SceneHandle,
};

/// Everything a peer needs to instantiate a dynamic object
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectSnapshot {
    pub object_id: ObjectId,
    pub prefab_hash: PrefabHash,
    pub owner: Option<PeerId>,
    /// `None` when the object currently sits in the holding area
    pub scene_handle: Option<SceneHandle>,
    pub active: bool,
    pub destroy_with_scene: bool,
}

impl Serde for ObjectSnapshot {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.object_id.ser(writer);
        self.prefab_hash.ser(writer);
        ser_option(&self.owner, writer);
        ser_option(&self.scene_handle, writer);
        self.active.ser(writer);
        self.destroy_with_scene.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            object_id: ObjectId::de(reader)?,
            prefab_hash: PrefabHash::de(reader)?,
            owner: de_option(reader)?,
            scene_handle: de_option(reader)?,
            active: bool::de(reader)?,
            destroy_with_scene: bool::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.object_id.bit_length()
            + self.prefab_hash.bit_length()
            + bit_length_option(&self.owner)
            + bit_length_option(&self.scene_handle)
            + self.active.bit_length()
            + self.destroy_with_scene.bit_length()
    }
}

/// Creation/destroy traffic on the object channel
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectMessage {
    Create(ObjectSnapshot),
    Destroy(ObjectId),
}

impl ObjectMessage {
    const CREATE_TAG: u8 = 0;
    const DESTROY_TAG: u8 = 1;

    pub fn object_id(&self) -> ObjectId {
        match self {
            ObjectMessage::Create(snapshot) => snapshot.object_id,
            ObjectMessage::Destroy(object_id) => *object_id,
        }
    }

    /// The scene this message cannot be applied before, if any
    pub fn required_scene(&self) -> Option<SceneHandle> {
        match self {
            ObjectMessage::Create(snapshot) => snapshot.scene_handle,
            ObjectMessage::Destroy(_) => None,
        }
    }

    pub fn to_bytes(&self) -> Box<[u8]> {
        let mut writer = RecordWriter::sized(self.bit_length());
        self.ser(&mut writer);
        writer.finish()
    }

    pub fn from_bytes(payload: &[u8]) -> Result<Self, ObjectMessageError> {
        let mut reader = BitReader::new(payload);
        Self::de(&mut reader).map_err(|_| ObjectMessageError::Malformed {
            payload_size: payload.len(),
        })
    }
}

impl Serde for ObjectMessage {
    fn ser(&self, writer: &mut dyn BitWrite) {
        match self {
            ObjectMessage::Create(snapshot) => {
                Self::CREATE_TAG.ser(writer);
                snapshot.ser(writer);
            }
            ObjectMessage::Destroy(object_id) => {
                Self::DESTROY_TAG.ser(writer);
                object_id.ser(writer);
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match u8::de(reader)? {
            Self::CREATE_TAG => Ok(ObjectMessage::Create(ObjectSnapshot::de(reader)?)),
            Self::DESTROY_TAG => Ok(ObjectMessage::Destroy(ObjectId::de(reader)?)),
            _ => Err(SerdeErr),
        }
    }

    fn bit_length(&self) -> u32 {
        let body = match self {
            ObjectMessage::Create(snapshot) => snapshot.bit_length(),
            ObjectMessage::Destroy(object_id) => object_id.bit_length(),
        };
        Self::CREATE_TAG.bit_length() + body
    }
}
