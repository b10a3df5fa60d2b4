use naia_serde::{BitReader, BitWrite, Serde, SerdeErr};

/// How a scene load relates to the scenes already loaded
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LoadMode {
    /// Replaces every loaded scene; persistent objects are carried over
    Single,
    /// Loads alongside the scenes already present
    Additive,
}

impl LoadMode {
    fn to_u8(self) -> u8 {
        match self {
            LoadMode::Single => 0,
            LoadMode::Additive => 1,
        }
    }

    fn from_u8(value: u8) -> Result<Self, SerdeErr> {
        match value {
            0 => Ok(LoadMode::Single),
            1 => Ok(LoadMode::Additive),
            _ => Err(SerdeErr),
        }
    }
}

impl Serde for LoadMode {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.to_u8().ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Self::from_u8(u8::de(reader)?)
    }

    fn bit_length(&self) -> u32 {
        self.to_u8().bit_length()
    }
}

/// Discriminant of a [`SceneEvent`](crate::SceneEvent), as written in the
/// first byte of every scene channel payload
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SceneEventKind {
    Load,
    Unload,
    LoadComplete,
    UnloadComplete,
    LoadEventCompleted,
    UnloadEventCompleted,
    Synchronize,
    SynchronizeComplete,
}

impl SceneEventKind {
    pub fn to_u8(self) -> u8 {
        match self {
            SceneEventKind::Load => 0,
            SceneEventKind::Unload => 1,
            SceneEventKind::LoadComplete => 2,
            SceneEventKind::UnloadComplete => 3,
            SceneEventKind::LoadEventCompleted => 4,
            SceneEventKind::UnloadEventCompleted => 5,
            SceneEventKind::Synchronize => 6,
            SceneEventKind::SynchronizeComplete => 7,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SceneEventKind::Load),
            1 => Some(SceneEventKind::Unload),
            2 => Some(SceneEventKind::LoadComplete),
            3 => Some(SceneEventKind::UnloadComplete),
            4 => Some(SceneEventKind::LoadEventCompleted),
            5 => Some(SceneEventKind::UnloadEventCompleted),
            6 => Some(SceneEventKind::Synchronize),
            7 => Some(SceneEventKind::SynchronizeComplete),
            _ => None,
        }
    }

    /// Kinds only the authority may originate
    pub fn is_authority_originated(&self) -> bool {
        matches!(
            self,
            SceneEventKind::Load
                | SceneEventKind::Unload
                | SceneEventKind::LoadEventCompleted
                | SceneEventKind::UnloadEventCompleted
                | SceneEventKind::Synchronize
        )
    }
}

impl Serde for SceneEventKind {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.to_u8().ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Self::from_u8(u8::de(reader)?).ok_or(SerdeErr)
    }

    fn bit_length(&self) -> u32 {
        self.to_u8().bit_length()
    }
}
