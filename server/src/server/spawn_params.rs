use scenery_shared::{PeerId, PrefabHash, SceneHandle};

/// Describes a dynamic object to spawn
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnParams {
    pub prefab_hash: PrefabHash,
    /// `None` keeps the object authority-owned
    pub owner: Option<PeerId>,
    /// Scene to place the object in, the active scene when `None`
    pub scene: Option<SceneHandle>,
    /// Whether unloading the scene destroys the object. Otherwise it
    /// survives in the holding area and follows single-mode loads.
    pub destroy_with_scene: bool,
    pub active: bool,
}

impl SpawnParams {
    pub fn new(prefab_hash: PrefabHash) -> Self {
        Self {
            prefab_hash,
            owner: None,
            scene: None,
            destroy_with_scene: false,
            active: true,
        }
    }

    pub fn owned_by(mut self, owner: &PeerId) -> Self {
        self.owner = Some(*owner);
        self
    }

    pub fn in_scene(mut self, scene_handle: &SceneHandle) -> Self {
        self.scene = Some(*scene_handle);
        self
    }

    pub fn destroy_with_scene(mut self) -> Self {
        self.destroy_with_scene = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}
