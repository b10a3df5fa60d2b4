use log::{debug, warn};

use crate::{
    object::error::RegistryError, scene::error::LoadedScenesError, DdolMigrator, LoadMode,
    LoadedScenes, ObjectId, ObjectRegistry, ReplicatedObject, SceneHandle, SceneObjectTemplate,
    SceneWorld,
};

/// What a scene unload did to the objects that lived in it
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UnloadReport {
    pub destroyed: Vec<ObjectId>,
    pub held: Vec<ObjectId>,
}

impl UnloadReport {
    fn merge(&mut self, other: UnloadReport) {
        self.destroyed.extend(other.destroyed);
        self.held.extend(other.held);
    }
}

/// A process's loaded scenes together with the objects living in them.
///
/// The authority and every peer run scene transitions through this type so
/// all of them destroy, hold and restore the same objects:
///
/// * unloading a scene destroys its scene objects and the dynamic objects
///   spawned to die with it, everything else moves to the holding area
/// * a single-mode load holds every persistent object, unloads every scene,
///   then loads the new one and restores the held objects into it
/// * an additive load only loads
///
/// Transition-driven destruction happens on every process independently and
/// is never announced with destroy messages.
#[derive(Debug, Default)]
pub struct SceneSpace {
    registry: ObjectRegistry,
    migrator: DdolMigrator,
    scenes: LoadedScenes,
}

impl SceneSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    pub fn migrator(&self) -> &DdolMigrator {
        &self.migrator
    }

    pub fn scenes(&self) -> &LoadedScenes {
        &self.scenes
    }

    pub fn is_loaded(&self, scene_handle: &SceneHandle) -> bool {
        self.scenes.contains(scene_handle)
    }

    // Objects

    /// Registers an object and tells the world about it. Objects arriving
    /// without a scene go straight to the holding area.
    pub fn insert_object<W: SceneWorld + ?Sized>(
        &mut self,
        world: &mut W,
        object: ReplicatedObject,
    ) -> Result<(), RegistryError> {
        let object_id = object.id();
        let held_active = object.is_held().then(|| object.is_active());
        self.registry.insert(object)?;
        if let Some(active) = held_active {
            self.migrator.adopt(&object_id, active);
        }
        if let Some(object) = self.registry.get(&object_id) {
            world.on_object_spawned(object);
        }
        Ok(())
    }

    pub fn remove_object<W: SceneWorld + ?Sized>(
        &mut self,
        world: &mut W,
        object_id: &ObjectId,
    ) -> Option<ReplicatedObject> {
        let object = self.registry.remove(object_id)?;
        self.migrator.forget(object_id);
        world.on_object_despawned(object_id);
        Some(object)
    }

    // Transitions

    /// Loads a scene instance and returns the objects placed in it. The
    /// caller registers those, then calls [`SceneSpace::restore_held`] for
    /// single-mode loads.
    pub fn load_scene<W: SceneWorld + ?Sized>(
        &mut self,
        world: &mut W,
        scene_name: &str,
        scene_handle: &SceneHandle,
        load_mode: LoadMode,
    ) -> Result<Vec<SceneObjectTemplate>, LoadedScenesError> {
        self.scenes.insert(*scene_handle, scene_name, load_mode)?;
        debug!("Loaded scene '{}' as {}", scene_name, scene_handle);
        Ok(world.load_scene(scene_name, scene_handle))
    }

    pub fn unload_scene<W: SceneWorld + ?Sized>(
        &mut self,
        world: &mut W,
        scene_handle: &SceneHandle,
    ) -> Result<UnloadReport, LoadedScenesError> {
        let scene = self.scenes.remove(scene_handle)?;

        let mut report = UnloadReport::default();
        let mut survivors = Vec::new();
        for object_id in self.registry.objects_in_scene(scene_handle) {
            let Some(object) = self.registry.get(&object_id) else {
                continue;
            };
            if object.is_scene_object() || object.destroy_with_scene() {
                self.remove_object(world, &object_id);
                report.destroyed.push(object_id);
            } else {
                survivors.push(object_id);
            }
        }
        report.held = self
            .migrator
            .migrate_to_holding_area(&mut self.registry, &survivors)
            .migrated;

        world.unload_scene(scene_handle);
        debug!(
            "Unloaded scene '{}' ({}): {} destroyed, {} held",
            scene.name,
            scene_handle,
            report.destroyed.len(),
            report.held.len()
        );
        Ok(report)
    }

    /// First half of a single-mode load: every persistent object moves to the
    /// holding area and every loaded scene is unloaded.
    pub fn prepare_single_load<W: SceneWorld + ?Sized>(&mut self, world: &mut W) -> UnloadReport {
        let persistent: Vec<ObjectId> = self
            .registry
            .dynamic_objects()
            .filter(|object| !object.destroy_with_scene() && !object.is_held())
            .map(ReplicatedObject::id)
            .collect();

        let mut report = UnloadReport {
            destroyed: Vec::new(),
            held: self
                .migrator
                .migrate_to_holding_area(&mut self.registry, &persistent)
                .migrated,
        };

        for scene_handle in self.scenes.handles() {
            match self.unload_scene(world, &scene_handle) {
                Ok(unloaded) => report.merge(unloaded),
                Err(error) => warn!("Single load could not unload scene: {}", error),
            }
        }

        report
    }

    /// Moves every held object into `scene_handle`
    pub fn restore_held(&mut self, scene_handle: &SceneHandle) -> Vec<ObjectId> {
        self.migrator
            .restore_from_holding_area(&mut self.registry, scene_handle)
    }

    /// Destroys every object and unloads every scene
    pub fn clear<W: SceneWorld + ?Sized>(&mut self, world: &mut W) -> Vec<ObjectId> {
        let destroyed = self.registry.clear();
        for object_id in &destroyed {
            world.on_object_despawned(object_id);
        }
        self.migrator.clear();
        for scene in self.scenes.clear() {
            world.unload_scene(&scene.handle);
        }
        destroyed
    }
}
