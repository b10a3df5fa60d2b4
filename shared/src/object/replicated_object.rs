use std::collections::HashSet;

use crate::{
    ObjectId, ObjectSnapshot, PeerId, PrefabHash, SceneHandle, SceneObjectEntry, TraversalPath,
};

/// Per-process state of one replicated object.
///
/// `scene_handle` always names a scene loaded on this process, except while
/// the object sits in the holding area, where it is `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplicatedObject {
    id: ObjectId,
    prefab_hash: PrefabHash,
    owner: Option<PeerId>,
    scene_handle: Option<SceneHandle>,
    observers: HashSet<PeerId>,
    is_scene_object: bool,
    traversal_path: Option<TraversalPath>,
    active: bool,
    destroy_with_scene: bool,
}

impl ReplicatedObject {
    /// An object created by an explicit spawn call
    pub fn dynamic(id: ObjectId, prefab_hash: PrefabHash, scene_handle: SceneHandle) -> Self {
        Self {
            id,
            prefab_hash,
            owner: None,
            scene_handle: Some(scene_handle),
            observers: HashSet::new(),
            is_scene_object: false,
            traversal_path: None,
            active: true,
            destroy_with_scene: true,
        }
    }

    /// An object placed in a scene asset, identified by the authority's entry
    pub fn scene_object(entry: &SceneObjectEntry, scene_handle: SceneHandle) -> Self {
        Self {
            id: entry.object_id,
            prefab_hash: entry.prefab_hash,
            owner: entry.owner,
            scene_handle: Some(scene_handle),
            observers: HashSet::new(),
            is_scene_object: true,
            traversal_path: Some(entry.path.clone()),
            active: entry.active,
            // scene objects never outlive their scene
            destroy_with_scene: true,
        }
    }

    /// Rebuilds a dynamic object from its creation message
    pub fn from_snapshot(snapshot: &ObjectSnapshot) -> Self {
        Self {
            id: snapshot.object_id,
            prefab_hash: snapshot.prefab_hash,
            owner: snapshot.owner,
            scene_handle: snapshot.scene_handle,
            observers: HashSet::new(),
            is_scene_object: false,
            traversal_path: None,
            active: snapshot.active,
            destroy_with_scene: snapshot.destroy_with_scene,
        }
    }

    pub fn with_owner(mut self, owner: Option<PeerId>) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_destroy_with_scene(mut self, destroy_with_scene: bool) -> Self {
        self.destroy_with_scene = destroy_with_scene || self.is_scene_object;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn prefab_hash(&self) -> PrefabHash {
        self.prefab_hash
    }

    pub fn owner(&self) -> Option<PeerId> {
        self.owner
    }

    pub fn scene_handle(&self) -> Option<SceneHandle> {
        self.scene_handle
    }

    pub fn observers(&self) -> &HashSet<PeerId> {
        &self.observers
    }

    pub fn is_observed_by(&self, peer: &PeerId) -> bool {
        self.observers.contains(peer)
    }

    pub fn is_scene_object(&self) -> bool {
        self.is_scene_object
    }

    pub fn traversal_path(&self) -> Option<&TraversalPath> {
        self.traversal_path.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn destroy_with_scene(&self) -> bool {
        self.destroy_with_scene
    }

    pub fn is_held(&self) -> bool {
        self.scene_handle.is_none()
    }

    /// The creation message describing this object's current state
    pub fn snapshot(&self) -> ObjectSnapshot {
        ObjectSnapshot {
            object_id: self.id,
            prefab_hash: self.prefab_hash,
            owner: self.owner,
            scene_handle: self.scene_handle,
            active: self.active,
            destroy_with_scene: self.destroy_with_scene,
        }
    }

    /// The entry peers use to correlate this scene object, `None` for
    /// dynamic objects
    pub fn scene_entry(&self) -> Option<SceneObjectEntry> {
        let path = self.traversal_path.as_ref()?;
        Some(SceneObjectEntry {
            object_id: self.id,
            prefab_hash: self.prefab_hash,
            path: path.clone(),
            owner: self.owner,
            active: self.active,
        })
    }

    pub(crate) fn set_scene_handle(&mut self, scene_handle: Option<SceneHandle>) {
        self.scene_handle = scene_handle;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(crate) fn observers_mut(&mut self) -> &mut HashSet<PeerId> {
        &mut self.observers
    }
}
