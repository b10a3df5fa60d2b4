//! # Scene event records
//!
//! One [`SceneEvent`] describes a single phase of a scene operation. Each
//! kind is its own variant carrying only the fields that are legal for it,
//! so e.g. a `Load` can never carry a timed-out peer list.
//!
//! ## Wire layout
//!
//! | Field | Encoding |
//! |-------|----------|
//! | kind | `u8` |
//! | scene name | `u32` FNV-1a hash, resolved through the [`SceneCatalog`] |
//! | load mode | `u8` |
//! | scene handle | `u32`, `0` when the kind has no scene |
//! | payload | per kind, see below |
//!
//! * `Load`: `u32` count of scene-object entries, then the entries
//! * `LoadComplete` / `UnloadComplete` / `SynchronizeComplete`: originator `u64`
//! * `*EventCompleted`: `u16` count + peer ids completed, then the same for
//!   timed out
//! * `Synchronize`: `u16` count of scenes (hash, mode, handle, entries), then a
//!   `u32` count of dynamic object snapshots

use naia_serde::{BitReader, BitWrite, Serde};

use crate::{
    scene::error::SceneEventError,
    wire::{
        bit_length_list_u16, bit_length_list_u32, de_list_u16, de_list_u32, ser_list_u16,
        ser_list_u32, RecordWriter,
    },
    LoadMode, ObjectSnapshot, PeerId, SceneCatalog, SceneEventKind, SceneHandle, SceneNameHash,
    SceneObjectEntry,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneLoad {
    pub scene_name: String,
    pub load_mode: LoadMode,
    pub scene_handle: SceneHandle,
    /// The authority's scene objects, for correlation on the peer
    pub scene_objects: Vec<SceneObjectEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneUnload {
    pub scene_name: String,
    pub load_mode: LoadMode,
    pub scene_handle: SceneHandle,
}

/// A single participant reporting that its part of a phase is done
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenePhaseComplete {
    pub originator: PeerId,
    pub scene_name: String,
    pub load_mode: LoadMode,
    pub scene_handle: SceneHandle,
}

/// Aggregate outcome of a top-level load or unload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneEventCompleted {
    pub scene_name: String,
    pub load_mode: LoadMode,
    pub scene_handle: SceneHandle,
    pub clients_completed: Vec<PeerId>,
    pub clients_timed_out: Vec<PeerId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynchronizedScene {
    pub scene_name: String,
    pub load_mode: LoadMode,
    pub scene_handle: SceneHandle,
    pub scene_objects: Vec<SceneObjectEntry>,
}

/// Everything a joining peer needs: loaded scenes in load order, then every
/// dynamic object
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneSynchronize {
    pub scenes: Vec<SynchronizedScene>,
    pub objects: Vec<ObjectSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynchronizeComplete {
    pub originator: PeerId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    Load(SceneLoad),
    Unload(SceneUnload),
    LoadComplete(ScenePhaseComplete),
    UnloadComplete(ScenePhaseComplete),
    LoadEventCompleted(SceneEventCompleted),
    UnloadEventCompleted(SceneEventCompleted),
    Synchronize(SceneSynchronize),
    SynchronizeComplete(SynchronizeComplete),
}

struct SceneHeader {
    kind: SceneEventKind,
    name_hash: SceneNameHash,
    load_mode: LoadMode,
    scene_handle: Option<SceneHandle>,
}

impl SceneEvent {
    pub fn kind(&self) -> SceneEventKind {
        match self {
            SceneEvent::Load(_) => SceneEventKind::Load,
            SceneEvent::Unload(_) => SceneEventKind::Unload,
            SceneEvent::LoadComplete(_) => SceneEventKind::LoadComplete,
            SceneEvent::UnloadComplete(_) => SceneEventKind::UnloadComplete,
            SceneEvent::LoadEventCompleted(_) => SceneEventKind::LoadEventCompleted,
            SceneEvent::UnloadEventCompleted(_) => SceneEventKind::UnloadEventCompleted,
            SceneEvent::Synchronize(_) => SceneEventKind::Synchronize,
            SceneEvent::SynchronizeComplete(_) => SceneEventKind::SynchronizeComplete,
        }
    }

    pub fn scene_name(&self) -> Option<&str> {
        match self {
            SceneEvent::Load(load) => Some(&load.scene_name),
            SceneEvent::Unload(unload) => Some(&unload.scene_name),
            SceneEvent::LoadComplete(phase) | SceneEvent::UnloadComplete(phase) => {
                Some(&phase.scene_name)
            }
            SceneEvent::LoadEventCompleted(completed)
            | SceneEvent::UnloadEventCompleted(completed) => Some(&completed.scene_name),
            SceneEvent::Synchronize(_) | SceneEvent::SynchronizeComplete(_) => None,
        }
    }

    pub fn load_mode(&self) -> Option<LoadMode> {
        match self {
            SceneEvent::Load(load) => Some(load.load_mode),
            SceneEvent::Unload(unload) => Some(unload.load_mode),
            SceneEvent::LoadComplete(phase) | SceneEvent::UnloadComplete(phase) => {
                Some(phase.load_mode)
            }
            SceneEvent::LoadEventCompleted(completed)
            | SceneEvent::UnloadEventCompleted(completed) => Some(completed.load_mode),
            SceneEvent::Synchronize(_) | SceneEvent::SynchronizeComplete(_) => None,
        }
    }

    pub fn scene_handle(&self) -> Option<SceneHandle> {
        match self {
            SceneEvent::Load(load) => Some(load.scene_handle),
            SceneEvent::Unload(unload) => Some(unload.scene_handle),
            SceneEvent::LoadComplete(phase) | SceneEvent::UnloadComplete(phase) => {
                Some(phase.scene_handle)
            }
            SceneEvent::LoadEventCompleted(completed)
            | SceneEvent::UnloadEventCompleted(completed) => Some(completed.scene_handle),
            SceneEvent::Synchronize(_) | SceneEvent::SynchronizeComplete(_) => None,
        }
    }

    /// Whose phase completion this record reports. Records the authority
    /// issues report the authority.
    pub fn originator(&self) -> PeerId {
        match self {
            SceneEvent::LoadComplete(phase) | SceneEvent::UnloadComplete(phase) => {
                phase.originator
            }
            SceneEvent::SynchronizeComplete(complete) => complete.originator,
            _ => PeerId::AUTHORITY,
        }
    }

    fn header(&self) -> SceneHeader {
        SceneHeader {
            kind: self.kind(),
            name_hash: self
                .scene_name()
                .map_or(SceneNameHash::from_u32(0), SceneNameHash::of),
            load_mode: self.load_mode().unwrap_or(LoadMode::Single),
            scene_handle: self.scene_handle(),
        }
    }

    pub fn write(&self, writer: &mut dyn BitWrite) {
        let header = self.header();
        header.kind.ser(writer);
        header.name_hash.ser(writer);
        header.load_mode.ser(writer);
        header
            .scene_handle
            .map_or(SceneHandle::NONE_ON_WIRE, |handle| handle.to_u32())
            .ser(writer);

        match self {
            SceneEvent::Load(load) => {
                ser_list_u32(&load.scene_objects, writer);
            }
            SceneEvent::Unload(_) => {}
            SceneEvent::LoadComplete(phase) | SceneEvent::UnloadComplete(phase) => {
                phase.originator.ser(writer);
            }
            SceneEvent::LoadEventCompleted(completed)
            | SceneEvent::UnloadEventCompleted(completed) => {
                ser_list_u16(&completed.clients_completed, writer);
                ser_list_u16(&completed.clients_timed_out, writer);
            }
            SceneEvent::Synchronize(synchronize) => {
                let count = u16::try_from(synchronize.scenes.len()).unwrap_or(u16::MAX);
                count.ser(writer);
                for scene in synchronize.scenes.iter().take(count as usize) {
                    SceneNameHash::of(&scene.scene_name).ser(writer);
                    scene.load_mode.ser(writer);
                    scene.scene_handle.ser(writer);
                    ser_list_u32(&scene.scene_objects, writer);
                }
                ser_list_u32(&synchronize.objects, writer);
            }
            SceneEvent::SynchronizeComplete(complete) => {
                complete.originator.ser(writer);
            }
        }
    }

    pub fn bit_length(&self) -> u32 {
        // kind + name hash + load mode + scene handle
        let header: u32 = 8 + 32 + 8 + 32;
        let payload = match self {
            SceneEvent::Load(load) => bit_length_list_u32(&load.scene_objects),
            SceneEvent::Unload(_) => 0,
            SceneEvent::LoadComplete(phase) | SceneEvent::UnloadComplete(phase) => {
                phase.originator.bit_length()
            }
            SceneEvent::LoadEventCompleted(completed)
            | SceneEvent::UnloadEventCompleted(completed) => {
                bit_length_list_u16(&completed.clients_completed)
                    + bit_length_list_u16(&completed.clients_timed_out)
            }
            SceneEvent::Synchronize(synchronize) => {
                let count = synchronize.scenes.len().min(u16::MAX as usize);
                let scenes: u32 = synchronize.scenes[..count]
                    .iter()
                    .map(|scene| {
                        SceneNameHash::of(&scene.scene_name).bit_length()
                            + scene.load_mode.bit_length()
                            + scene.scene_handle.bit_length()
                            + bit_length_list_u32(&scene.scene_objects)
                    })
                    .sum();
                0u16.bit_length() + scenes + bit_length_list_u32(&synchronize.objects)
            }
            SceneEvent::SynchronizeComplete(complete) => complete.originator.bit_length(),
        };
        header + payload
    }

    /// Serialized size in whole bytes
    pub fn byte_length(&self) -> usize {
        (self.bit_length() as usize + 7) / 8
    }

    pub fn to_bytes(&self) -> Box<[u8]> {
        let mut writer = RecordWriter::sized(self.bit_length());
        self.write(&mut writer);
        writer.finish()
    }

    pub fn from_bytes(payload: &[u8], catalog: &SceneCatalog) -> Result<Self, SceneEventError> {
        let mut reader = BitReader::new(payload);
        Self::read(&mut reader, catalog, payload.len())
    }

    fn read(
        reader: &mut BitReader,
        catalog: &SceneCatalog,
        payload_size: usize,
    ) -> Result<Self, SceneEventError> {
        let malformed = |_| SceneEventError::Malformed { payload_size };

        let kind_value = u8::de(reader).map_err(malformed)?;
        let kind = SceneEventKind::from_u8(kind_value)
            .ok_or(SceneEventError::UnknownKind { value: kind_value })?;
        let header = SceneHeader {
            kind,
            name_hash: SceneNameHash::de(reader).map_err(malformed)?,
            load_mode: LoadMode::de(reader).map_err(malformed)?,
            scene_handle: SceneHandle::from_wire(u32::de(reader).map_err(malformed)?),
        };

        let event = match kind {
            SceneEventKind::Load => {
                let (scene_name, scene_handle) = header.resolve(catalog)?;
                SceneEvent::Load(SceneLoad {
                    scene_name,
                    load_mode: header.load_mode,
                    scene_handle,
                    scene_objects: de_list_u32(reader).map_err(malformed)?,
                })
            }
            SceneEventKind::Unload => {
                let (scene_name, scene_handle) = header.resolve(catalog)?;
                SceneEvent::Unload(SceneUnload {
                    scene_name,
                    load_mode: header.load_mode,
                    scene_handle,
                })
            }
            SceneEventKind::LoadComplete | SceneEventKind::UnloadComplete => {
                let (scene_name, scene_handle) = header.resolve(catalog)?;
                let phase = ScenePhaseComplete {
                    originator: PeerId::de(reader).map_err(malformed)?,
                    scene_name,
                    load_mode: header.load_mode,
                    scene_handle,
                };
                if kind == SceneEventKind::LoadComplete {
                    SceneEvent::LoadComplete(phase)
                } else {
                    SceneEvent::UnloadComplete(phase)
                }
            }
            SceneEventKind::LoadEventCompleted | SceneEventKind::UnloadEventCompleted => {
                let (scene_name, scene_handle) = header.resolve(catalog)?;
                let completed = SceneEventCompleted {
                    scene_name,
                    load_mode: header.load_mode,
                    scene_handle,
                    clients_completed: de_list_u16(reader).map_err(malformed)?,
                    clients_timed_out: de_list_u16(reader).map_err(malformed)?,
                };
                if kind == SceneEventKind::LoadEventCompleted {
                    SceneEvent::LoadEventCompleted(completed)
                } else {
                    SceneEvent::UnloadEventCompleted(completed)
                }
            }
            SceneEventKind::Synchronize => {
                let count = u16::de(reader).map_err(malformed)?;
                let mut scenes = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    let name_hash = SceneNameHash::de(reader).map_err(malformed)?;
                    let scene_name = catalog
                        .name_of(&name_hash)
                        .ok_or(SceneEventError::UnknownSceneHash {
                            hash: name_hash.to_u32(),
                        })?
                        .to_string();
                    scenes.push(SynchronizedScene {
                        scene_name,
                        load_mode: LoadMode::de(reader).map_err(malformed)?,
                        scene_handle: SceneHandle::de(reader).map_err(malformed)?,
                        scene_objects: de_list_u32(reader).map_err(malformed)?,
                    });
                }
                SceneEvent::Synchronize(SceneSynchronize {
                    scenes,
                    objects: de_list_u32(reader).map_err(malformed)?,
                })
            }
            SceneEventKind::SynchronizeComplete => {
                SceneEvent::SynchronizeComplete(SynchronizeComplete {
                    originator: PeerId::de(reader).map_err(malformed)?,
                })
            }
        };

        Ok(event)
    }
}

impl SceneHeader {
    fn resolve(&self, catalog: &SceneCatalog) -> Result<(String, SceneHandle), SceneEventError> {
        let scene_name = catalog
            .name_of(&self.name_hash)
            .ok_or(SceneEventError::UnknownSceneHash {
                hash: self.name_hash.to_u32(),
            })?
            .to_string();
        let scene_handle = self
            .scene_handle
            .ok_or(SceneEventError::MissingSceneHandle { kind: self.kind })?;
        Ok((scene_name, scene_handle))
    }
}
