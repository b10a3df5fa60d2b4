use crate::{scene::error::LoadedScenesError, LoadMode, SceneHandle};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedScene {
    pub handle: SceneHandle,
    pub name: String,
    pub load_mode: LoadMode,
}

/// Scenes loaded on this process, in load order.
///
/// The active scene, where spawns land unless told otherwise, is the oldest
/// scene still loaded.
#[derive(Debug, Default)]
pub struct LoadedScenes {
    scenes: Vec<LoadedScene>,
}

impl LoadedScenes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        handle: SceneHandle,
        name: &str,
        load_mode: LoadMode,
    ) -> Result<(), LoadedScenesError> {
        if self.contains(&handle) {
            return Err(LoadedScenesError::AlreadyLoaded { handle });
        }
        self.scenes.push(LoadedScene {
            handle,
            name: name.to_string(),
            load_mode,
        });
        Ok(())
    }

    pub fn remove(&mut self, handle: &SceneHandle) -> Result<LoadedScene, LoadedScenesError> {
        let index = self
            .scenes
            .iter()
            .position(|scene| scene.handle == *handle)
            .ok_or(LoadedScenesError::NotLoaded { handle: *handle })?;
        Ok(self.scenes.remove(index))
    }

    pub fn get(&self, handle: &SceneHandle) -> Option<&LoadedScene> {
        self.scenes.iter().find(|scene| scene.handle == *handle)
    }

    pub fn contains(&self, handle: &SceneHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Handle of the first loaded scene named `name`
    pub fn find_by_name(&self, name: &str) -> Option<SceneHandle> {
        self.scenes
            .iter()
            .find(|scene| scene.name == name)
            .map(|scene| scene.handle)
    }

    pub fn active_scene(&self) -> Option<SceneHandle> {
        self.scenes.first().map(|scene| scene.handle)
    }

    pub fn handles(&self) -> Vec<SceneHandle> {
        self.scenes.iter().map(|scene| scene.handle).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedScene> {
        self.scenes.iter()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn clear(&mut self) -> Vec<LoadedScene> {
        std::mem::take(&mut self.scenes)
    }
}
