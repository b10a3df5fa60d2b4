use std::{
    collections::{HashMap, VecDeque},
    time::{Duration, Instant},
};

use log::{info, warn};

use crate::{ObjectId, SceneHandle};

pub type WaitlistHandle = u64;

struct WaitingItem<T> {
    scene_handle: SceneHandle,
    object_id: ObjectId,
    item: T,
}

/// Parks object messages that reference a scene which has not finished
/// loading locally, until that scene loads or the message expires.
///
/// Items waiting on the same scene are released in the order they were
/// queued.
pub struct SceneWaitlist<T> {
    next_handle: WaitlistHandle,
    scene_to_handles: HashMap<SceneHandle, Vec<WaitlistHandle>>,
    object_to_handle: HashMap<ObjectId, WaitlistHandle>,
    items: HashMap<WaitlistHandle, WaitingItem<T>>,
    handle_ttls: VecDeque<(Instant, WaitlistHandle)>,
    handle_ttl: Duration,
}

impl<T> SceneWaitlist<T> {
    pub fn new(handle_ttl: Duration) -> Self {
        Self {
            next_handle: 0,
            scene_to_handles: HashMap::new(),
            object_to_handle: HashMap::new(),
            items: HashMap::new(),
            handle_ttls: VecDeque::new(),
            handle_ttl,
        }
    }

    pub fn queue(
        &mut self,
        scene_handle: &SceneHandle,
        object_id: &ObjectId,
        item: T,
        now: &Instant,
    ) -> WaitlistHandle {
        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1);

        info!("{} waits for {} to load", object_id, scene_handle);

        self.scene_to_handles
            .entry(*scene_handle)
            .or_default()
            .push(handle);
        self.object_to_handle.insert(*object_id, handle);
        self.items.insert(
            handle,
            WaitingItem {
                scene_handle: *scene_handle,
                object_id: *object_id,
                item,
            },
        );
        self.handle_ttls.push_back((*now, handle));

        handle
    }

    /// Releases everything waiting on `scene_handle`, in queue order. Called
    /// when the scene loads and when it turns out to be gone.
    pub fn release_scene(&mut self, scene_handle: &SceneHandle) -> Vec<T> {
        let Some(handles) = self.scene_to_handles.remove(scene_handle) else {
            return Vec::new();
        };
        handles
            .into_iter()
            .filter_map(|handle| self.take(&handle))
            .collect()
    }

    /// Withdraws the item queued for `object_id`, if any
    pub fn cancel_object(&mut self, object_id: &ObjectId) -> Option<T> {
        let handle = *self.object_to_handle.get(object_id)?;
        let item = self.take(&handle)?;
        Some(item)
    }

    pub fn contains_object(&self, object_id: &ObjectId) -> bool {
        self.object_to_handle.contains_key(object_id)
    }

    /// Drops items that waited longer than the ttl, returning them
    pub fn remove_expired(&mut self, now: &Instant) -> Vec<T> {
        let mut expired = Vec::new();
        loop {
            let Some((queued_at, handle)) = self.handle_ttls.front() else {
                break;
            };
            if now.saturating_duration_since(*queued_at) < self.handle_ttl {
                break;
            }
            let handle = *handle;
            self.handle_ttls.pop_front();
            if let Some(item) = self.take(&handle) {
                expired.push(item);
            }
        }
        if !expired.is_empty() {
            warn!(
                "Dropped {} object messages whose scene never loaded",
                expired.len()
            );
        }
        expired
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.scene_to_handles.clear();
        self.object_to_handle.clear();
        self.items.clear();
        self.handle_ttls.clear();
    }

    fn take(&mut self, handle: &WaitlistHandle) -> Option<T> {
        let waiting = self.items.remove(handle)?;

        if self.object_to_handle.get(&waiting.object_id) == Some(handle) {
            self.object_to_handle.remove(&waiting.object_id);
        }

        let mut remove_scene = false;
        if let Some(handles) = self.scene_to_handles.get_mut(&waiting.scene_handle) {
            handles.retain(|queued| queued != handle);
            remove_scene = handles.is_empty();
        }
        if remove_scene {
            self.scene_to_handles.remove(&waiting.scene_handle);
        }

        if let Some(ttl_index) = self
            .handle_ttls
            .iter()
            .position(|(_, ttl_handle)| ttl_handle == handle)
        {
            self.handle_ttls.remove(ttl_index);
        }

        Some(waiting.item)
    }
}
