use std::collections::HashMap;

use crate::{scene::error::SceneCatalogError, SceneNameHash};

/// The set of scenes known to this build. Both the authority and every peer
/// construct the same catalog; scene names travel as [`SceneNameHash`] and
/// are resolved back through it.
#[derive(Clone, Debug, Default)]
pub struct SceneCatalog {
    names_by_hash: HashMap<SceneNameHash, String>,
}

impl SceneCatalog {
    pub fn new<I, S>(names: I) -> Result<Self, SceneCatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for name in names {
            catalog.register(name)?;
        }
        Ok(catalog)
    }

    /// Adds a scene to the catalog. Registering the same name twice is a
    /// no-op; two different names hashing to the same value is an error the
    /// build has to resolve by renaming one of them.
    pub fn register<S: Into<String>>(&mut self, name: S) -> Result<SceneNameHash, SceneCatalogError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SceneCatalogError::EmptySceneName);
        }
        let hash = SceneNameHash::of(&name);
        if let Some(existing) = self.names_by_hash.get(&hash) {
            if *existing != name {
                return Err(SceneCatalogError::HashCollision {
                    existing: existing.clone(),
                    incoming: name,
                    hash: hash.to_u32(),
                });
            }
            return Ok(hash);
        }
        self.names_by_hash.insert(hash, name);
        Ok(hash)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names_by_hash
            .get(&SceneNameHash::of(name))
            .is_some_and(|known| known == name)
    }

    /// Returns the hash of a known scene
    pub fn hash_of(&self, name: &str) -> Option<SceneNameHash> {
        self.contains(name).then(|| SceneNameHash::of(name))
    }

    pub fn name_of(&self, hash: &SceneNameHash) -> Option<&str> {
        self.names_by_hash.get(hash).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names_by_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names_by_hash.is_empty()
    }
}
