//! # Scenery Client
//! A peer of a scene-partitioned replication session: applies the scene
//! events the authority issues, defers object messages that race its
//! synchronization, and reports completion back.

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

mod client;
mod error;
mod events;

pub use client::{Client, ClientConfig};
pub use error::ClientError;
pub use events::{
    DespawnObjectEvent, ErrorEvent, Event, Events, LoadCompleteEvent, LoadEvent,
    LoadEventCompletedEvent, ParkedCreateExpiredEvent, SceneEventNotification, SceneVetoedEvent,
    SpawnObjectEvent, SynchronizeCompleteEvent, SynchronizeEvent, UnloadCompleteEvent,
    UnloadEvent, UnloadEventCompletedEvent,
};
