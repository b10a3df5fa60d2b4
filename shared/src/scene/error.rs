use thiserror::Error;

use crate::{SceneEventKind, SceneHandle};

/// Errors raised while building a [`SceneCatalog`](crate::SceneCatalog)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneCatalogError {
    /// Scene names must be non-empty
    #[error("Scene names must not be empty")]
    EmptySceneName,

    /// Two scene names share a wire hash and cannot be told apart by peers
    #[error("Scene '{incoming}' collides with '{existing}' on name hash {hash:#010x}")]
    HashCollision {
        existing: String,
        incoming: String,
        hash: u32,
    },
}

/// Errors that can occur while decoding a scene channel payload
///
/// Every variant describes malformed or unexpected data from the network;
/// they are reported, never panicked on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneEventError {
    /// The payload ended early or contained an invalid discriminant
    #[error("Malformed scene event payload ({payload_size} bytes)")]
    Malformed { payload_size: usize },

    /// The first byte did not name a known scene event kind
    #[error("Unknown scene event kind {value}")]
    UnknownKind { value: u8 },

    /// The scene name hash is not part of the local scene catalog
    #[error("Scene name hash {hash:#010x} is not in the scene catalog")]
    UnknownSceneHash { hash: u32 },

    /// A kind that requires a scene handle arrived with the reserved zero handle
    #[error("{kind:?} event is missing its scene handle")]
    MissingSceneHandle { kind: SceneEventKind },
}

/// Errors returned by the [`SceneEventPool`](crate::SceneEventPool)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The key was released already, or never belonged to this pool
    #[error("Scene event record key is stale or foreign")]
    StaleKey,
}

/// Errors returned by [`LoadedScenes`](crate::LoadedScenes)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadedScenesError {
    #[error("{handle} is already loaded")]
    AlreadyLoaded { handle: SceneHandle },

    #[error("{handle} is not loaded")]
    NotLoaded { handle: SceneHandle },
}
