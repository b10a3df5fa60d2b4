use thiserror::Error;

use crate::ObjectId;

/// Errors returned by the [`ObjectRegistry`](crate::ObjectRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// An object with this id is already registered
    #[error("{object_id} already exists in the object registry")]
    AlreadyExists { object_id: ObjectId },

    /// The object was never registered, or has been destroyed since
    #[error("{object_id} not found in the object registry")]
    NotFound { object_id: ObjectId },
}

/// Errors that can occur while decoding an object channel payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectMessageError {
    #[error("Malformed object message payload ({payload_size} bytes)")]
    Malformed { payload_size: usize },
}
