use slotmap::{new_key_type, SlotMap};

use crate::{scene::error::PoolError, SceneEvent};

new_key_type! {
    /// Generational handle to a pooled scene event record. Once the record is
    /// released the key goes stale and resolves to nothing.
    pub struct SceneEventKey;
}

struct PooledSceneEvent {
    event: SceneEvent,
    consumers: u32,
}

/// Arena of in-flight scene event records.
///
/// A record is acquired when an operation starts and lives until every local
/// consumer released it. Slots are reused, keys are not: a key held past its
/// record's release never aliases the record that took the slot over.
#[derive(Default)]
pub struct SceneEventPool {
    records: SlotMap<SceneEventKey, PooledSceneEvent>,
}

impl SceneEventPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `event` with a single consumer
    pub fn acquire(&mut self, event: SceneEvent) -> SceneEventKey {
        self.records.insert(PooledSceneEvent {
            event,
            consumers: 1,
        })
    }

    pub fn get(&self, key: &SceneEventKey) -> Option<&SceneEvent> {
        self.records.get(*key).map(|record| &record.event)
    }

    pub fn get_mut(&mut self, key: &SceneEventKey) -> Option<&mut SceneEvent> {
        self.records.get_mut(*key).map(|record| &mut record.event)
    }

    /// Registers one more consumer of the record
    pub fn retain(&mut self, key: &SceneEventKey) -> Result<(), PoolError> {
        let record = self.records.get_mut(*key).ok_or(PoolError::StaleKey)?;
        record.consumers += 1;
        Ok(())
    }

    /// Drops one consumer. When the last one is gone the slot is freed and the
    /// record handed back.
    pub fn release(&mut self, key: &SceneEventKey) -> Result<Option<SceneEvent>, PoolError> {
        let record = self.records.get_mut(*key).ok_or(PoolError::StaleKey)?;
        record.consumers -= 1;
        if record.consumers > 0 {
            return Ok(None);
        }
        Ok(self.records.remove(*key).map(|record| record.event))
    }

    pub fn contains(&self, key: &SceneEventKey) -> bool {
        self.records.contains_key(*key)
    }

    /// Number of records not yet released
    pub fn in_flight(&self) -> usize {
        self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
