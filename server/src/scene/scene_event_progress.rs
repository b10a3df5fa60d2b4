use std::{
    collections::BTreeSet,
    time::{Duration, Instant},
};

use scenery_shared::{PeerId, SceneEventKey, SceneEventKind, SceneHandle};

/// Completion tracking for the one top-level load or unload in flight.
///
/// The expected set is the snapshot of peers taken when the event started.
/// The event is done once every expected peer either completed or timed out.
pub(crate) struct SceneEventProgress {
    record_key: SceneEventKey,
    kind: SceneEventKind,
    scene_handle: SceneHandle,
    expected: BTreeSet<PeerId>,
    completed: Vec<PeerId>,
    timed_out: Vec<PeerId>,
    started_at: Instant,
}

impl SceneEventProgress {
    pub fn new(
        record_key: SceneEventKey,
        kind: SceneEventKind,
        scene_handle: SceneHandle,
        expected: BTreeSet<PeerId>,
        now: &Instant,
    ) -> Self {
        Self {
            record_key,
            kind,
            scene_handle,
            expected,
            completed: Vec::new(),
            timed_out: Vec::new(),
            started_at: *now,
        }
    }

    pub fn record_key(&self) -> SceneEventKey {
        self.record_key
    }

    pub fn kind(&self) -> SceneEventKind {
        self.kind
    }

    pub fn scene_handle(&self) -> SceneHandle {
        self.scene_handle
    }

    /// Whether this event tracks a `kind` completion for `scene_handle`
    pub fn tracks(&self, kind: SceneEventKind, scene_handle: &SceneHandle) -> bool {
        self.kind == kind && self.scene_handle == *scene_handle
    }

    /// Whether `peer` is expected and has not answered yet
    pub fn is_awaiting(&self, peer: &PeerId) -> bool {
        self.expected.contains(peer)
            && !self.completed.contains(peer)
            && !self.timed_out.contains(peer)
    }

    /// Returns false for duplicates, late answers and peers never expected
    pub fn mark_completed(&mut self, peer: &PeerId) -> bool {
        if !self.is_awaiting(peer) {
            return false;
        }
        self.completed.push(*peer);
        true
    }

    /// Drops a disconnected peer from every set, it counts as neither
    /// completed nor timed out
    pub fn remove_peer(&mut self, peer: &PeerId) -> bool {
        let removed = self.expected.remove(peer);
        self.completed.retain(|completed| completed != peer);
        self.timed_out.retain(|timed_out| timed_out != peer);
        removed
    }

    /// Moves every peer still awaited into the timed-out set once `timeout`
    /// has elapsed. Returns the peers moved.
    pub fn time_out(&mut self, now: &Instant, timeout: &Duration) -> Vec<PeerId> {
        if now.saturating_duration_since(self.started_at) < *timeout {
            return Vec::new();
        }
        let expired: Vec<PeerId> = self
            .expected
            .iter()
            .filter(|peer| !self.completed.contains(peer) && !self.timed_out.contains(peer))
            .copied()
            .collect();
        self.timed_out.extend(expired.iter().copied());
        expired
    }

    pub fn is_done(&self) -> bool {
        self.completed.len() + self.timed_out.len() == self.expected.len()
    }

    /// Peers that completed, in arrival order
    pub fn completed(&self) -> &[PeerId] {
        &self.completed
    }

    pub fn timed_out(&self) -> &[PeerId] {
        &self.timed_out
    }
}
