use thiserror::Error;

use scenery_shared::{
    ChannelKind, ObjectId, PeerId, RegistryError, SceneEventError, SceneEventKind, SceneHandle,
};

/// Misuse of the scene operations, returned synchronously to the caller and
/// never sent over the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// Only one top-level load or unload may be in flight at a time
    #[error("A {kind:?} event for {scene_handle} is still in progress")]
    SceneEventInProgress {
        kind: SceneEventKind,
        scene_handle: SceneHandle,
    },

    #[error("Scene '{scene_name}' is not in the scene catalog")]
    InvalidSceneName { scene_name: String },

    /// The handle was never loaded, or was unloaded already
    #[error("{scene_handle} is not loaded")]
    SceneNotLoaded { scene_handle: SceneHandle },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("No scene is loaded to spawn into")]
    NoActiveScene,

    #[error("Cannot spawn into {scene_handle}, it is not loaded")]
    SceneNotLoaded { scene_handle: SceneHandle },

    #[error("Owner {owner} is not connected")]
    UnknownOwner { owner: PeerId },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DespawnError {
    #[error("{object_id} does not exist")]
    NotFound { object_id: ObjectId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// The authority's own id cannot be handed to a peer
    #[error("{peer} is reserved")]
    ReservedPeerId { peer: PeerId },

    #[error("{peer} is already connected")]
    AlreadyConnected { peer: PeerId },

    #[error("{peer} is not connected")]
    NotConnected { peer: PeerId },
}

/// Problems with inbound traffic or deferred work, reported through
/// [`ErrorEvent`](crate::ErrorEvent)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    #[error("Received data from {peer}, which is not connected")]
    UnknownPeer { peer: PeerId },

    #[error("{peer} sent on the {channel:?} channel, which only the authority writes to")]
    UnexpectedChannel { peer: PeerId, channel: ChannelKind },

    #[error("Could not decode scene event from {peer}: {error}")]
    Decode {
        peer: PeerId,
        #[source]
        error: SceneEventError,
    },

    /// Peers only ever report completions
    #[error("{peer} sent a {kind:?} event, which only the authority issues")]
    UnexpectedEvent { peer: PeerId, kind: SceneEventKind },

    #[error("{peer} sent an event claiming to originate from {originator}")]
    OriginatorMismatch { peer: PeerId, originator: PeerId },

    /// A load or unload queued by a listener failed when it was started
    #[error("Queued scene command failed: {0}")]
    QueuedCommand(#[from] SceneError),
}
