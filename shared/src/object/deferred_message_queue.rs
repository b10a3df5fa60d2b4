use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::PeerId;

/// Holds object messages that arrive for a peer whose synchronization has not
/// completed yet, and hands them back in arrival order once it has.
///
/// Scene ordering needs no extra bookkeeping here: synchronization applies
/// every pending scene before the queue is flushed, so nothing replayed from
/// it can reference a scene that is not loaded yet.
pub struct DeferredMessageQueue<M> {
    queues: HashMap<PeerId, VecDeque<M>>,
    last_deferred: HashMap<PeerId, usize>,
}

impl<M> DeferredMessageQueue<M> {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
            last_deferred: HashMap::new(),
        }
    }

    pub fn enqueue(&mut self, peer: &PeerId, message: M) {
        self.queues.entry(*peer).or_default().push_back(message);
    }

    /// Drains `peer`'s queue in arrival order. The number of drained messages
    /// becomes the peer's [`last_deferred_count`](Self::last_deferred_count).
    pub fn flush(&mut self, peer: &PeerId) -> Vec<M> {
        let messages: Vec<M> = self
            .queues
            .remove(peer)
            .map(Vec::from)
            .unwrap_or_default();
        debug!("Flushing {} deferred messages for {}", messages.len(), peer);
        self.last_deferred.insert(*peer, messages.len());
        messages
    }

    /// Drops everything queued for `peer`, returning how many messages were lost
    pub fn discard(&mut self, peer: &PeerId) -> usize {
        self.last_deferred.remove(peer);
        self.queues.remove(peer).map_or(0, |queue| queue.len())
    }

    pub fn pending(&self, peer: &PeerId) -> usize {
        self.queues.get(peer).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self) -> bool {
        self.queues.values().all(VecDeque::is_empty)
    }

    /// How many messages the last flush for `peer` replayed. Diagnostics only.
    pub fn last_deferred_count(&self, peer: &PeerId) -> usize {
        self.last_deferred.get(peer).copied().unwrap_or(0)
    }
}

impl<M> Default for DeferredMessageQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}
