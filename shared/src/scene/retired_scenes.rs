use std::collections::HashMap;

use crate::SceneHandle;

/// Where the authority put the persistent objects of a scene this peer has
/// seen go away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneFate {
    /// Moved to the holding area by an additive unload
    Held,
    /// Carried into the scene a single-mode load brought in
    RestoredInto(SceneHandle),
}

/// Scene handles that were loaded and have since been unloaded by the
/// authority.
///
/// Object messages and scene events travel on independent channels, so a
/// create can name a scene that is already gone. Each retired handle resolves
/// in one step to the current home of that scene's persistent objects.
#[derive(Debug, Default)]
pub struct RetiredScenes {
    fates: HashMap<SceneHandle, SceneFate>,
}

impl RetiredScenes {
    pub fn new() -> Self {
        Self::default()
    }

    /// An additive unload of `scene_handle`
    pub fn unloaded(&mut self, scene_handle: &SceneHandle) {
        for fate in self.fates.values_mut() {
            if *fate == SceneFate::RestoredInto(*scene_handle) {
                *fate = SceneFate::Held;
            }
        }
        self.fates.insert(*scene_handle, SceneFate::Held);
    }

    /// A single-mode load of `scene_handle` that replaced `replaced`. Held
    /// objects and the objects of every replaced scene all end up in the new
    /// scene.
    pub fn single_loaded(&mut self, scene_handle: &SceneHandle, replaced: &[SceneHandle]) {
        for fate in self.fates.values_mut() {
            *fate = SceneFate::RestoredInto(*scene_handle);
        }
        for handle in replaced {
            self.fates
                .insert(*handle, SceneFate::RestoredInto(*scene_handle));
        }
    }

    pub fn fate(&self, scene_handle: &SceneHandle) -> Option<SceneFate> {
        self.fates.get(scene_handle).copied()
    }

    pub fn contains(&self, scene_handle: &SceneHandle) -> bool {
        self.fates.contains_key(scene_handle)
    }

    pub fn len(&self) -> usize {
        self.fates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fates.is_empty()
    }

    pub fn clear(&mut self) {
        self.fates.clear();
    }
}
