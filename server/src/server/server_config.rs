use std::default::Default;

use scenery_shared::SceneConfig;

/// Contains Config properties which will be used by the Server
#[derive(Clone)]
pub struct ServerConfig {
    /// Timeouts governing scene events and parked messages
    pub scene: SceneConfig,
    /// Determines whether a peer is sent the synchronize payload as soon as it
    /// connects. When disabled, call `Server::synchronize_peer` yourself.
    pub synchronize_on_connect: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            synchronize_on_connect: true,
        }
    }
}
