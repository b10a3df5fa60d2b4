use thiserror::Error;

use scenery_shared::{ObjectMessageError, SceneEventError, SceneEventKind};

/// Problems with traffic from the authority, reported through
/// [`ErrorEvent`](crate::ErrorEvent)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Could not decode scene event: {0}")]
    Decode(#[source] SceneEventError),

    #[error("Could not decode object message: {0}")]
    ObjectDecode(#[source] ObjectMessageError),

    /// Peers never receive the completions other peers report
    #[error("Received a {kind:?} event, which only peers send")]
    UnexpectedEvent { kind: SceneEventKind },

    #[error("Received a second synchronize payload")]
    DuplicateSynchronize,
}
