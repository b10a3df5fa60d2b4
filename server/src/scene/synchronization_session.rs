use std::time::Instant;

use scenery_shared::{LoadMode, PeerId, SceneHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SynchronizationPhase {
    /// Waiting for the peer to load the scenes of its synchronize payload
    AwaitingSceneLoads,
    /// Scenes are loaded, waiting for the peer to create the objects
    AwaitingObjectAck,
    Complete,
}

/// The authority's view of one peer's initial synchronization. Until the
/// session is complete the peer is not made an observer of anything.
pub(crate) struct SynchronizationSession {
    peer: PeerId,
    pending_scenes: Vec<(SceneHandle, String, LoadMode)>,
    phase: SynchronizationPhase,
    started_at: Instant,
}

impl SynchronizationSession {
    pub fn new(
        peer: PeerId,
        pending_scenes: Vec<(SceneHandle, String, LoadMode)>,
        now: &Instant,
    ) -> Self {
        let phase = if pending_scenes.is_empty() {
            SynchronizationPhase::AwaitingObjectAck
        } else {
            SynchronizationPhase::AwaitingSceneLoads
        };
        Self {
            peer,
            pending_scenes,
            phase,
            started_at: *now,
        }
    }

    pub fn peer(&self) -> PeerId {
        self.peer
    }

    pub fn phase(&self) -> SynchronizationPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SynchronizationPhase::Complete
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn is_pending(&self, scene_handle: &SceneHandle) -> bool {
        self.pending_scenes
            .iter()
            .any(|(handle, _, _)| handle == scene_handle)
    }

    /// Records the peer's load of one synchronized scene
    pub fn scene_loaded(&mut self, scene_handle: &SceneHandle) {
        self.pending_scenes
            .retain(|(handle, _, _)| handle != scene_handle);
        if self.pending_scenes.is_empty()
            && self.phase == SynchronizationPhase::AwaitingSceneLoads
        {
            self.phase = SynchronizationPhase::AwaitingObjectAck;
        }
    }

    /// Names of the scenes still unanswered, for diagnostics
    pub fn pending_scene_names(&self) -> Vec<&str> {
        self.pending_scenes
            .iter()
            .map(|(_, name, _)| name.as_str())
            .collect()
    }

    pub fn complete(&mut self) {
        self.pending_scenes.clear();
        self.phase = SynchronizationPhase::Complete;
    }
}
