use scenery_shared::SceneConfig;

/// Contains Config properties which will be used by a Client
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Timeouts governing scene events and parked messages
    pub scene: SceneConfig,
}
