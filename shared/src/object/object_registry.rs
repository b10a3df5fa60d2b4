use std::collections::BTreeMap;

use crate::{object::error::RegistryError, ObjectId, PeerId, ReplicatedObject, SceneHandle};

/// Per-process map from object id to replicated object state.
///
/// Iteration follows id order, which on the authority is spawn order.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: BTreeMap<ObjectId, ReplicatedObject>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: ReplicatedObject) -> Result<(), RegistryError> {
        let object_id = object.id();
        if self.objects.contains_key(&object_id) {
            return Err(RegistryError::AlreadyExists { object_id });
        }
        self.objects.insert(object_id, object);
        Ok(())
    }

    pub fn remove(&mut self, object_id: &ObjectId) -> Option<ReplicatedObject> {
        self.objects.remove(object_id)
    }

    pub fn get(&self, object_id: &ObjectId) -> Option<&ReplicatedObject> {
        self.objects.get(object_id)
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.objects.contains_key(object_id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReplicatedObject> {
        self.objects.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.objects.keys()
    }

    /// Dynamically spawned objects, in id order
    pub fn dynamic_objects(&self) -> impl Iterator<Item = &ReplicatedObject> {
        self.objects.values().filter(|object| !object.is_scene_object())
    }

    pub fn objects_in_scene(&self, scene_handle: &SceneHandle) -> Vec<ObjectId> {
        self.objects
            .values()
            .filter(|object| object.scene_handle() == Some(*scene_handle))
            .map(ReplicatedObject::id)
            .collect()
    }

    /// Scene objects belonging to `scene_handle`, in traversal order
    pub fn scene_objects_in(&self, scene_handle: &SceneHandle) -> Vec<&ReplicatedObject> {
        let mut objects: Vec<&ReplicatedObject> = self
            .objects
            .values()
            .filter(|object| {
                object.is_scene_object() && object.scene_handle() == Some(*scene_handle)
            })
            .collect();
        objects.sort_by(|a, b| a.traversal_path().cmp(&b.traversal_path()));
        objects
    }

    /// Objects currently in the holding area
    pub fn held_objects(&self) -> Vec<ObjectId> {
        self.objects
            .values()
            .filter(|object| object.is_held())
            .map(ReplicatedObject::id)
            .collect()
    }

    pub fn set_active(&mut self, object_id: &ObjectId, active: bool) -> Result<(), RegistryError> {
        self.get_mut(object_id)?.set_active(active);
        Ok(())
    }

    pub fn add_observer(&mut self, object_id: &ObjectId, peer: &PeerId) -> Result<(), RegistryError> {
        self.get_mut(object_id)?.observers_mut().insert(*peer);
        Ok(())
    }

    pub fn remove_observer(
        &mut self,
        object_id: &ObjectId,
        peer: &PeerId,
    ) -> Result<bool, RegistryError> {
        Ok(self.get_mut(object_id)?.observers_mut().remove(peer))
    }

    /// Makes `peer` an observer of every registered object
    pub fn add_observer_to_all(&mut self, peer: &PeerId) {
        for object in self.objects.values_mut() {
            object.observers_mut().insert(*peer);
        }
    }

    pub fn remove_observer_from_all(&mut self, peer: &PeerId) {
        for object in self.objects.values_mut() {
            object.observers_mut().remove(peer);
        }
    }

    /// Removes every object, returning their ids in id order
    pub fn clear(&mut self) -> Vec<ObjectId> {
        let ids = self.objects.keys().copied().collect();
        self.objects.clear();
        ids
    }

    pub(crate) fn get_mut(&mut self, object_id: &ObjectId) -> Result<&mut ReplicatedObject, RegistryError> {
        self.objects
            .get_mut(object_id)
            .ok_or(RegistryError::NotFound { object_id: *object_id })
    }
}
