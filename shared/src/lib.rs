//! # Scenery Shared
//! Common functionality shared between scenery-server & scenery-client crates:
//! identifiers, the scene and object wire records, the object registry, scene
//! transitions and the queues peers use to hold back racing messages.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use naia_serde::{BitReader, BitWrite, Serde, SerdeErr};

mod config;
mod object;
mod scene;
mod transport;
mod types;
mod wire;

pub use config::SceneConfig;
pub use object::{
    ddol_migrator::{DdolMigrator, MigrationReport},
    deferred_message_queue::DeferredMessageQueue,
    error::{ObjectMessageError, RegistryError},
    object_message::{ObjectMessage, ObjectSnapshot},
    object_registry::ObjectRegistry,
    replicated_object::ReplicatedObject,
    scene_waitlist::{SceneWaitlist, WaitlistHandle},
};
pub use scene::{
    error::{LoadedScenesError, PoolError, SceneCatalogError, SceneEventError},
    loaded_scenes::{LoadedScene, LoadedScenes},
    retired_scenes::{RetiredScenes, SceneFate},
    scene_catalog::SceneCatalog,
    scene_event::{
        SceneEvent, SceneEventCompleted, SceneLoad, ScenePhaseComplete, SceneSynchronize,
        SceneUnload, SynchronizeComplete, SynchronizedScene,
    },
    scene_event_kind::{LoadMode, SceneEventKind},
    scene_event_pool::{SceneEventKey, SceneEventPool},
    scene_object::{SceneObjectEntry, SceneObjectTemplate, TraversalPath},
    scene_object_correlator::{correlate_scene_objects, SceneObjectCorrelation},
    scene_space::{SceneSpace, UnloadReport},
    scene_world::SceneWorld,
};
pub use transport::{ChannelKind, Transport};
pub use types::{ObjectId, PeerId, PrefabHash, SceneHandle, SceneNameHash};
pub use wire::RecordWriter;
