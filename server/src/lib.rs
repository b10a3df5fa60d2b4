//! # Scenery Server
//! The authority of a scene-partitioned replication session: loads and
//! unloads scenes on every peer with completion tracking, synchronizes peers
//! joining mid-session, and spawns the objects peers replicate.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use scenery_shared::{
        ChannelKind, LoadMode, ObjectId, PeerId, PrefabHash, SceneCatalog, SceneConfig,
        SceneEvent, SceneHandle, SceneObjectTemplate, SceneWorld, Transport, TraversalPath,
    };
}

mod error;
mod events;
mod scene;
mod server;

pub use error::{ConnectError, DespawnError, SceneError, ServerError, SpawnError};
pub use events::{
    ConnectEvent, DespawnObjectEvent, DisconnectEvent, ErrorEvent, Event, Events,
    LoadCompleteEvent, LoadEvent, LoadEventCompletedEvent, SceneEventNotification,
    SpawnObjectEvent, SynchronizeCompleteEvent, SynchronizeEvent, UnloadCompleteEvent,
    UnloadEvent, UnloadEventCompletedEvent,
};
pub use scene::{
    scene_commands::{SceneCommand, SceneCommands, SceneEventListener},
    synchronization_session::SynchronizationPhase,
};
pub use server::{EventStarted, Server, ServerConfig, SpawnParams};
