/// Scene world for tests: scenes are named lists of placed objects, and
/// every call the replication layer makes is recorded for assertions

use std::collections::{BTreeMap, HashMap, HashSet};

use scenery_shared::{
    ObjectId, ReplicatedObject, SceneHandle, SceneObjectTemplate, SceneWorld, TraversalPath,
};

#[derive(Default)]
pub struct TestWorld {
    layouts: HashMap<String, Vec<SceneObjectTemplate>>,
    /// Scene instances currently loaded
    pub instances: BTreeMap<SceneHandle, String>,
    /// Objects the replication layer announced, minus those it despawned
    pub live_objects: HashSet<ObjectId>,
    pub load_calls: Vec<String>,
    pub unload_calls: Vec<SceneHandle>,
    pub discarded: Vec<(SceneHandle, TraversalPath)>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `templates` in every instance of `scene_name`
    pub fn with_scene(mut self, scene_name: &str, templates: Vec<SceneObjectTemplate>) -> Self {
        self.layouts.insert(scene_name.to_string(), templates);
        self
    }

    pub fn is_loaded(&self, scene_handle: &SceneHandle) -> bool {
        self.instances.contains_key(scene_handle)
    }
}

impl SceneWorld for TestWorld {
    fn load_scene(
        &mut self,
        scene_name: &str,
        scene_handle: &SceneHandle,
    ) -> Vec<SceneObjectTemplate> {
        self.load_calls.push(scene_name.to_string());
        self.instances.insert(*scene_handle, scene_name.to_string());
        self.layouts.get(scene_name).cloned().unwrap_or_default()
    }

    fn unload_scene(&mut self, scene_handle: &SceneHandle) {
        self.unload_calls.push(*scene_handle);
        self.instances.remove(scene_handle);
    }

    fn discard_scene_object(&mut self, scene_handle: &SceneHandle, template: &SceneObjectTemplate) {
        self.discarded.push((*scene_handle, template.path.clone()));
    }

    fn on_object_spawned(&mut self, object: &ReplicatedObject) {
        self.live_objects.insert(object.id());
    }

    fn on_object_despawned(&mut self, object_id: &ObjectId) {
        self.live_objects.remove(object_id);
    }
}
