use std::{default::Default, time::Duration};

/// Contains Config properties which govern scene event processing on both
/// the authority and the peers
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// How long the authority waits for peers to acknowledge a load or
    /// unload before moving them to the timed-out set
    pub load_event_timeout: Duration,
    /// How long a peer keeps an object message parked while waiting for the
    /// scene it references to finish loading
    pub deferred_message_ttl: Duration,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            load_event_timeout: Duration::from_secs(10),
            deferred_message_ttl: Duration::from_secs(60),
        }
    }
}
