use std::{mem, vec::IntoIter};

use scenery_shared::{
    ObjectId, PeerId, SceneEvent, SceneEventCompleted, SceneLoad, ScenePhaseComplete,
    SceneSynchronize, SceneUnload,
};

use crate::ClientError;

/// One scene phase transition. `peer` is the originator: the authority for
/// the records it issued, this client for its own completions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneEventNotification {
    pub peer: PeerId,
    pub event: SceneEvent,
}

pub struct Events {
    vetoes: Vec<SceneLoad>,
    expired: Vec<ObjectId>,
    errors: Vec<ClientError>,
    spawns: Vec<ObjectId>,
    despawns: Vec<ObjectId>,

    notifications: Vec<SceneEventNotification>,
    loads: Vec<SceneLoad>,
    unloads: Vec<SceneUnload>,
    load_completes: Vec<ScenePhaseComplete>,
    unload_completes: Vec<ScenePhaseComplete>,
    load_events_completed: Vec<SceneEventCompleted>,
    unload_events_completed: Vec<SceneEventCompleted>,
    synchronizes: Vec<SceneSynchronize>,
    synchronize_completes: Vec<PeerId>,

    empty: bool,
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            vetoes: Vec::new(),
            expired: Vec::new(),
            errors: Vec::new(),
            spawns: Vec::new(),
            despawns: Vec::new(),

            notifications: Vec::new(),
            loads: Vec::new(),
            unloads: Vec::new(),
            load_completes: Vec::new(),
            unload_completes: Vec::new(),
            load_events_completed: Vec::new(),
            unload_events_completed: Vec::new(),
            synchronizes: Vec::new(),
            synchronize_completes: Vec::new(),

            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: Event>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: Event>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_veto(&mut self, load: &SceneLoad) {
        self.vetoes.push(load.clone());
        self.empty = false;
    }

    pub(crate) fn push_expired(&mut self, object_id: &ObjectId) {
        self.expired.push(*object_id);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: ClientError) {
        self.errors.push(error);
        self.empty = false;
    }

    pub(crate) fn push_spawn(&mut self, object_id: &ObjectId) {
        self.spawns.push(*object_id);
        self.empty = false;
    }

    pub(crate) fn push_despawn(&mut self, object_id: &ObjectId) {
        self.despawns.push(*object_id);
        self.empty = false;
    }

    pub(crate) fn push_scene_event(&mut self, peer: &PeerId, event: &SceneEvent) {
        match event {
            SceneEvent::Load(load) => self.loads.push(load.clone()),
            SceneEvent::Unload(unload) => self.unloads.push(unload.clone()),
            SceneEvent::LoadComplete(phase) => self.load_completes.push(phase.clone()),
            SceneEvent::UnloadComplete(phase) => self.unload_completes.push(phase.clone()),
            SceneEvent::LoadEventCompleted(completed) => {
                self.load_events_completed.push(completed.clone())
            }
            SceneEvent::UnloadEventCompleted(completed) => {
                self.unload_events_completed.push(completed.clone())
            }
            SceneEvent::Synchronize(synchronize) => self.synchronizes.push(synchronize.clone()),
            SceneEvent::SynchronizeComplete(complete) => {
                self.synchronize_completes.push(complete.originator)
            }
        }
        self.notifications.push(SceneEventNotification {
            peer: *peer,
            event: event.clone(),
        });
        self.empty = false;
    }
}

// Event Trait
pub trait Event {
    type Iter;

    fn iter(events: &mut Events) -> Self::Iter;

    fn has(events: &Events) -> bool;
}

// Scene Vetoed Event, loads the scene verifier rejected
pub struct SceneVetoedEvent;
impl Event for SceneVetoedEvent {
    type Iter = IntoIter<SceneLoad>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.vetoes);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.vetoes.is_empty()
    }
}

// Parked Create Expired Event, creates dropped while waiting for their scene
pub struct ParkedCreateExpiredEvent;
impl Event for ParkedCreateExpiredEvent {
    type Iter = IntoIter<ObjectId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.expired);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.expired.is_empty()
    }
}

// Error Event
pub struct ErrorEvent;
impl Event for ErrorEvent {
    type Iter = IntoIter<ClientError>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.errors.is_empty()
    }
}

// Spawn Object Event
pub struct SpawnObjectEvent;
impl Event for SpawnObjectEvent {
    type Iter = IntoIter<ObjectId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.spawns);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.spawns.is_empty()
    }
}

// Despawn Object Event
pub struct DespawnObjectEvent;
impl Event for DespawnObjectEvent {
    type Iter = IntoIter<ObjectId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.despawns);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.despawns.is_empty()
    }
}

// Every scene phase, in the order they happened
impl Event for SceneEventNotification {
    type Iter = IntoIter<SceneEventNotification>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.notifications);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.notifications.is_empty()
    }
}

// Load Event
pub struct LoadEvent;
impl Event for LoadEvent {
    type Iter = IntoIter<SceneLoad>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.loads);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.loads.is_empty()
    }
}

// Unload Event
pub struct UnloadEvent;
impl Event for UnloadEvent {
    type Iter = IntoIter<SceneUnload>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.unloads);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.unloads.is_empty()
    }
}

// Load Complete Event
pub struct LoadCompleteEvent;
impl Event for LoadCompleteEvent {
    type Iter = IntoIter<ScenePhaseComplete>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.load_completes);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.load_completes.is_empty()
    }
}

// Unload Complete Event
pub struct UnloadCompleteEvent;
impl Event for UnloadCompleteEvent {
    type Iter = IntoIter<ScenePhaseComplete>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.unload_completes);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.unload_completes.is_empty()
    }
}

// Load Event Completed Event
pub struct LoadEventCompletedEvent;
impl Event for LoadEventCompletedEvent {
    type Iter = IntoIter<SceneEventCompleted>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.load_events_completed);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.load_events_completed.is_empty()
    }
}

// Unload Event Completed Event
pub struct UnloadEventCompletedEvent;
impl Event for UnloadEventCompletedEvent {
    type Iter = IntoIter<SceneEventCompleted>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.unload_events_completed);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.unload_events_completed.is_empty()
    }
}

// Synchronize Event
pub struct SynchronizeEvent;
impl Event for SynchronizeEvent {
    type Iter = IntoIter<SceneSynchronize>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.synchronizes);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.synchronizes.is_empty()
    }
}

// Synchronize Complete Event
pub struct SynchronizeCompleteEvent;
impl Event for SynchronizeCompleteEvent {
    type Iter = IntoIter<PeerId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.synchronize_completes);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.synchronize_completes.is_empty()
    }
}
