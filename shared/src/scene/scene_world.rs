use crate::{ObjectId, ReplicatedObject, SceneHandle, SceneObjectTemplate};

/// The engine side of a scene: instantiates scene assets and hears about
/// replicated objects coming and going.
///
/// Both the authority and the peers drive one of these.
pub trait SceneWorld {
    /// Instantiates the named scene under `scene_handle` and returns the
    /// placed objects it contains. Traversal paths must be assigned the same
    /// way on every process.
    fn load_scene(&mut self, scene_name: &str, scene_handle: &SceneHandle)
        -> Vec<SceneObjectTemplate>;

    /// Tears the scene instance down
    fn unload_scene(&mut self, scene_handle: &SceneHandle);

    /// A placed object of `scene_handle` that the authority has no entry
    /// for. The world should remove its local instance.
    fn discard_scene_object(&mut self, _scene_handle: &SceneHandle, _template: &SceneObjectTemplate) {}

    fn on_object_spawned(&mut self, _object: &ReplicatedObject) {}

    fn on_object_despawned(&mut self, _object_id: &ObjectId) {}
}
