use std::collections::HashMap;

use log::{debug, warn};

use crate::{ObjectId, ObjectRegistry, SceneHandle};

/// Outcome of one [`DdolMigrator::migrate_to_holding_area`] batch
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub migrated: Vec<ObjectId>,
    /// Ids that were stale (already destroyed) or already held
    pub skipped: Vec<ObjectId>,
}

/// Carries objects across scene transitions through a persistent holding
/// area that no scene unload can reach.
///
/// The enabled flag recorded at migration is the source of truth across the
/// transition: whatever happens to the flag while an object is held, restore
/// puts the recorded value back.
#[derive(Debug, Default)]
pub struct DdolMigrator {
    held_order: Vec<ObjectId>,
    recorded_active: HashMap<ObjectId, bool>,
}

impl DdolMigrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detaches each object from its scene and records its enabled flag.
    /// Stale ids are skipped, never fatal: despawns and scene unloads race
    /// with bulk operations over the registry.
    pub fn migrate_to_holding_area(
        &mut self,
        registry: &mut ObjectRegistry,
        objects: &[ObjectId],
    ) -> MigrationReport {
        let mut report = MigrationReport::default();

        for object_id in objects {
            if self.recorded_active.contains_key(object_id) {
                debug!("{} is already in the holding area", object_id);
                report.skipped.push(*object_id);
                continue;
            }
            let object = match registry.get_mut(object_id) {
                Ok(object) => object,
                Err(error) => {
                    warn!("Skipping migration to holding area: {}", error);
                    report.skipped.push(*object_id);
                    continue;
                }
            };

            self.recorded_active.insert(*object_id, object.is_active());
            self.held_order.push(*object_id);
            object.set_scene_handle(None);
            report.migrated.push(*object_id);
        }

        report
    }

    /// Moves every held object into `target`, restoring its recorded enabled
    /// flag. Returns the restored ids in migration order.
    pub fn restore_from_holding_area(
        &mut self,
        registry: &mut ObjectRegistry,
        target: &SceneHandle,
    ) -> Vec<ObjectId> {
        let mut restored = Vec::with_capacity(self.held_order.len());

        for object_id in std::mem::take(&mut self.held_order) {
            let Some(active) = self.recorded_active.remove(&object_id) else {
                continue;
            };
            match registry.get_mut(&object_id) {
                Ok(object) => {
                    object.set_scene_handle(Some(*target));
                    object.set_active(active);
                    restored.push(object_id);
                }
                Err(error) => {
                    warn!("Skipping restore from holding area: {}", error);
                }
            }
        }

        restored
    }

    /// Registers an object that arrived already held, e.g. from a peer's
    /// synchronize payload
    pub fn adopt(&mut self, object_id: &ObjectId, active: bool) {
        if self.recorded_active.insert(*object_id, active).is_none() {
            self.held_order.push(*object_id);
        }
    }

    /// Stops tracking an object destroyed while held
    pub fn forget(&mut self, object_id: &ObjectId) -> bool {
        if self.recorded_active.remove(object_id).is_some() {
            self.held_order.retain(|held| held != object_id);
            return true;
        }
        false
    }

    pub fn is_held(&self, object_id: &ObjectId) -> bool {
        self.recorded_active.contains_key(object_id)
    }

    pub fn held_count(&self) -> usize {
        self.held_order.len()
    }

    pub fn clear(&mut self) {
        self.held_order.clear();
        self.recorded_active.clear();
    }
}
