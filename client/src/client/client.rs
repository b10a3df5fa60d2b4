use std::{collections::HashSet, mem, time::Instant};

use log::{debug, info, warn};

use scenery_shared::{
    correlate_scene_objects, ChannelKind, DeferredMessageQueue, LoadMode, LoadedScenes,
    ObjectMessage, ObjectRegistry, ObjectSnapshot, PeerId, ReplicatedObject, RetiredScenes,
    SceneCatalog, SceneEvent, SceneEventKey, SceneEventPool, SceneFate, SceneHandle, SceneLoad,
    SceneObjectEntry, ScenePhaseComplete, SceneSpace, SceneSynchronize, SceneUnload,
    SceneWaitlist, SceneWorld, SynchronizeComplete, Transport,
};

use crate::{ClientConfig, ClientError, Events};

type SceneVerifier = Box<dyn FnMut(&str, LoadMode) -> bool>;

/// A peer of a replication session. Mirrors the authority's scenes and
/// objects, holding back object messages that race the initial
/// synchronization or the load of the scene they reference.
///
/// Nothing happens in the background: progress is made in
/// [`Client::receive`] and [`Client::update`].
pub struct Client<W: SceneWorld, T: Transport> {
    config: ClientConfig,
    catalog: SceneCatalog,
    world: W,
    transport: T,
    peer_id: PeerId,
    // Scenes & objects
    space: SceneSpace,
    pool: SceneEventPool,
    verifier: Option<SceneVerifier>,
    vetoed: HashSet<SceneHandle>,
    retired: RetiredScenes,
    // Held back object messages
    synchronized: bool,
    deferred: DeferredMessageQueue<ObjectMessage>,
    waitlist: SceneWaitlist<ObjectMessage>,
    // Events
    incoming_events: Events,
}

impl<W: SceneWorld, T: Transport> Client<W, T> {
    /// Create a new Client. `peer_id` is the id the authority knows this
    /// client by.
    pub fn new(
        config: ClientConfig,
        catalog: SceneCatalog,
        world: W,
        transport: T,
        peer_id: PeerId,
    ) -> Self {
        let waitlist = SceneWaitlist::new(config.scene.deferred_message_ttl);
        Self {
            config,
            catalog,
            world,
            transport,
            peer_id,
            space: SceneSpace::new(),
            pool: SceneEventPool::new(),
            verifier: None,
            vetoed: HashSet::new(),
            retired: RetiredScenes::new(),
            synchronized: false,
            deferred: DeferredMessageQueue::new(),
            waitlist,
            incoming_events: Events::new(),
        }
    }

    /// Installs the predicate consulted before every scene load. Returning
    /// false skips the load; the client still reports completion.
    pub fn set_scene_verifier<F: FnMut(&str, LoadMode) -> bool + 'static>(&mut self, verifier: F) {
        self.verifier = Some(Box::new(verifier));
    }

    /// Returns every event raised since the last call
    pub fn take_events(&mut self) -> Events {
        mem::take(&mut self.incoming_events)
    }

    // Incoming

    /// Handles one payload the authority sent on `channel`
    pub fn receive(&mut self, channel: ChannelKind, payload: &[u8], now: &Instant) {
        match channel {
            ChannelKind::Objects => self.receive_object_message(payload, now),
            ChannelKind::SceneEvents => self.receive_scene_event(payload, now),
        }
    }

    /// Drops parked creates whose scene never loaded
    pub fn update(&mut self, now: &Instant) {
        for message in self.waitlist.remove_expired(now) {
            let object_id = message.object_id();
            warn!(
                "Dropping create for {}, its scene {:?} never loaded",
                object_id,
                message.required_scene()
            );
            self.incoming_events.push_expired(&object_id);
        }
    }

    /// Tears down every scene and object after losing the authority
    pub fn disconnect(&mut self) {
        let discarded = self.deferred.discard(&self.peer_id);
        self.waitlist.clear();
        self.pool.clear();
        self.vetoed.clear();
        self.retired.clear();
        self.synchronized = false;
        let destroyed = self.space.clear(&mut self.world);
        for object_id in &destroyed {
            self.incoming_events.push_despawn(object_id);
        }
        info!(
            "{} disconnected: {} objects destroyed, {} deferred messages discarded",
            self.peer_id,
            destroyed.len(),
            discarded
        );
    }

    // Accessors

    pub fn peer_id(&self) -> PeerId {
        self.peer_id
    }

    pub fn is_synchronized(&self) -> bool {
        self.synchronized
    }

    pub fn registry(&self) -> &ObjectRegistry {
        self.space.registry()
    }

    pub fn loaded_scenes(&self) -> &LoadedScenes {
        self.space.scenes()
    }

    /// Object messages waiting for synchronization to complete
    pub fn deferred_message_count(&self) -> usize {
        self.deferred.pending(&self.peer_id)
    }

    /// How many object messages the last synchronization replayed
    pub fn last_deferred_count(&self) -> usize {
        self.deferred.last_deferred_count(&self.peer_id)
    }

    /// Creates parked until their scene loads
    pub fn waitlisted_count(&self) -> usize {
        self.waitlist.len()
    }

    pub fn held_object_count(&self) -> usize {
        self.space.migrator().held_count()
    }

    /// Scene event records not yet released
    pub fn in_flight_records(&self) -> usize {
        self.pool.in_flight()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // Object messages

    fn receive_object_message(&mut self, payload: &[u8], now: &Instant) {
        let message = match ObjectMessage::from_bytes(payload) {
            Ok(message) => message,
            Err(error) => {
                warn!("Could not decode object message: {}", error);
                self.incoming_events
                    .push_error(ClientError::ObjectDecode(error));
                return;
            }
        };

        if !self.synchronized {
            debug!(
                "Deferring message for {} until synchronized",
                message.object_id()
            );
            self.deferred.enqueue(&self.peer_id, message);
            return;
        }
        self.apply_object_message(message, now);
    }

    fn apply_object_message(&mut self, message: ObjectMessage, now: &Instant) {
        match message {
            ObjectMessage::Create(snapshot) => {
                let object_id = snapshot.object_id;
                if self.space.registry().contains(&object_id) {
                    warn!("Ignoring duplicate create for {}", object_id);
                    return;
                }
                if let Some(scene_handle) = snapshot.scene_handle {
                    if !self.space.is_loaded(&scene_handle) {
                        if let Some(fate) = self.retired.fate(&scene_handle) {
                            self.create_in_retired_scene(snapshot, fate, now);
                            return;
                        }
                        debug!("Parking create for {} until {} loads", object_id, scene_handle);
                        self.waitlist.queue(
                            &scene_handle,
                            &object_id,
                            ObjectMessage::Create(snapshot),
                            now,
                        );
                        return;
                    }
                }
                self.create_object(ReplicatedObject::from_snapshot(&snapshot));
            }
            ObjectMessage::Destroy(object_id) => {
                if self.waitlist.cancel_object(&object_id).is_some() {
                    debug!("Cancelled parked create for {}", object_id);
                    return;
                }
                if self.space.remove_object(&mut self.world, &object_id).is_some() {
                    self.incoming_events.push_despawn(&object_id);
                } else {
                    debug!("Ignoring destroy for unknown {}", object_id);
                }
            }
        }
    }

    /// A create that lost the race against the unload of its scene. The
    /// authority already applied the unload rules to the object, so apply
    /// them here too.
    fn create_in_retired_scene(
        &mut self,
        mut snapshot: ObjectSnapshot,
        fate: SceneFate,
        now: &Instant,
    ) {
        if snapshot.destroy_with_scene {
            debug!(
                "Dropping create for {}, its scene {:?} is already gone",
                snapshot.object_id, snapshot.scene_handle
            );
            return;
        }
        snapshot.scene_handle = match fate {
            SceneFate::Held => None,
            SceneFate::RestoredInto(scene_handle) => Some(scene_handle),
        };
        debug!(
            "Redirecting create for {} from a retired scene to {:?}",
            snapshot.object_id, snapshot.scene_handle
        );
        self.apply_object_message(ObjectMessage::Create(snapshot), now);
    }

    fn create_object(&mut self, object: ReplicatedObject) {
        let object_id = object.id();
        match self.space.insert_object(&mut self.world, object) {
            Ok(()) => self.incoming_events.push_spawn(&object_id),
            Err(error) => warn!("Creating {}: {}", object_id, error),
        }
    }

    // Scene events

    fn receive_scene_event(&mut self, payload: &[u8], now: &Instant) {
        let event = match SceneEvent::from_bytes(payload, &self.catalog) {
            Ok(event) => event,
            Err(error) => {
                warn!("Could not decode scene event: {}", error);
                self.incoming_events.push_error(ClientError::Decode(error));
                return;
            }
        };
        if !event.kind().is_authority_originated() {
            self.incoming_events
                .push_error(ClientError::UnexpectedEvent { kind: event.kind() });
            return;
        }

        let key = self.pool.acquire(event);
        self.dispatch_scene_event(&key, now);
        if let Err(error) = self.pool.release(&key) {
            warn!("Inbound scene event record: {}", error);
        }
    }

    fn dispatch_scene_event(&mut self, key: &SceneEventKey, now: &Instant) {
        let Some(event) = self.pool.get(key).cloned() else {
            return;
        };
        self.notify(&PeerId::AUTHORITY, &event);

        match event {
            SceneEvent::Load(load) => self.on_load(load, now),
            SceneEvent::Unload(unload) => self.on_unload(unload, now),
            SceneEvent::Synchronize(synchronize) => self.on_synchronize(synchronize, now),
            SceneEvent::LoadEventCompleted(completed)
            | SceneEvent::UnloadEventCompleted(completed) => {
                debug!(
                    "Scene event for '{}' finished: {} completed, {} timed out",
                    completed.scene_name,
                    completed.clients_completed.len(),
                    completed.clients_timed_out.len()
                );
            }
            SceneEvent::LoadComplete(_)
            | SceneEvent::UnloadComplete(_)
            | SceneEvent::SynchronizeComplete(_) => {}
        }
    }

    fn on_load(&mut self, load: SceneLoad, now: &Instant) {
        let accepted = self.verify(&load.scene_name, load.load_mode);

        // the mode's unloads happen even when the new scene is vetoed
        let mut replaced = Vec::new();
        if load.load_mode == LoadMode::Single {
            replaced = self.space.scenes().handles();
            replaced.extend(self.vetoed.drain());
            let report = self.space.prepare_single_load(&mut self.world);
            for object_id in &report.destroyed {
                self.incoming_events.push_despawn(object_id);
            }
            self.retired.single_loaded(&load.scene_handle, &replaced);
        }

        if accepted {
            self.apply_scene_load(
                &load.scene_name,
                load.load_mode,
                &load.scene_handle,
                &load.scene_objects,
                load.load_mode == LoadMode::Single,
                now,
            );
        } else {
            info!("Scene '{}' was vetoed, skipping its load", load.scene_name);
            self.vetoed.insert(load.scene_handle);
            self.incoming_events.push_veto(&load);
        }
        for scene_handle in &replaced {
            self.release_retired(scene_handle, now);
        }

        self.send_scene_event(SceneEvent::LoadComplete(ScenePhaseComplete {
            originator: self.peer_id,
            scene_name: load.scene_name,
            load_mode: load.load_mode,
            scene_handle: load.scene_handle,
        }));
    }

    fn on_unload(&mut self, unload: SceneUnload, now: &Instant) {
        if self.space.is_loaded(&unload.scene_handle) {
            match self.space.unload_scene(&mut self.world, &unload.scene_handle) {
                Ok(report) => {
                    for object_id in &report.destroyed {
                        self.incoming_events.push_despawn(object_id);
                    }
                }
                Err(error) => warn!("Unloading '{}': {}", unload.scene_name, error),
            }
        } else {
            debug!("Unload of '{}', which is not loaded here", unload.scene_name);
        }
        self.vetoed.remove(&unload.scene_handle);
        self.retired.unloaded(&unload.scene_handle);
        self.release_retired(&unload.scene_handle, now);

        self.send_scene_event(SceneEvent::UnloadComplete(ScenePhaseComplete {
            originator: self.peer_id,
            scene_name: unload.scene_name,
            load_mode: unload.load_mode,
            scene_handle: unload.scene_handle,
        }));
    }

    fn on_synchronize(&mut self, synchronize: SceneSynchronize, now: &Instant) {
        if self.synchronized {
            warn!("Ignoring second synchronize payload");
            self.incoming_events
                .push_error(ClientError::DuplicateSynchronize);
            return;
        }
        info!(
            "Synchronizing: {} scenes, {} objects",
            synchronize.scenes.len(),
            synchronize.objects.len()
        );

        // every scene loads before any object is created
        for scene in synchronize.scenes {
            if self.verify(&scene.scene_name, scene.load_mode) {
                self.apply_scene_load(
                    &scene.scene_name,
                    scene.load_mode,
                    &scene.scene_handle,
                    &scene.scene_objects,
                    false,
                    now,
                );
            } else {
                info!("Scene '{}' was vetoed, skipping its load", scene.scene_name);
                self.vetoed.insert(scene.scene_handle);
                self.incoming_events.push_veto(&SceneLoad {
                    scene_name: scene.scene_name.clone(),
                    load_mode: scene.load_mode,
                    scene_handle: scene.scene_handle,
                    scene_objects: scene.scene_objects,
                });
            }
            self.send_scene_event(SceneEvent::LoadComplete(ScenePhaseComplete {
                originator: self.peer_id,
                scene_name: scene.scene_name,
                load_mode: scene.load_mode,
                scene_handle: scene.scene_handle,
            }));
        }

        for snapshot in synchronize.objects {
            if let Some(scene_handle) = snapshot.scene_handle {
                if !self.space.is_loaded(&scene_handle) {
                    debug!(
                        "Skipping {}, its scene {} is not loaded here",
                        snapshot.object_id, scene_handle
                    );
                    continue;
                }
            }
            self.create_object(ReplicatedObject::from_snapshot(&snapshot));
        }

        self.synchronized = true;
        let deferred = self.deferred.flush(&self.peer_id);
        if !deferred.is_empty() {
            info!("Replaying {} deferred object messages", deferred.len());
        }
        for message in deferred {
            self.apply_object_message(message, now);
        }

        self.send_scene_event(SceneEvent::SynchronizeComplete(SynchronizeComplete {
            originator: self.peer_id,
        }));
    }

    fn verify(&mut self, scene_name: &str, load_mode: LoadMode) -> bool {
        match self.verifier.as_mut() {
            Some(verifier) => verifier(scene_name, load_mode),
            None => true,
        }
    }

    /// Loads a scene, matches its placed objects to the authority's entries,
    /// then releases the creates that were waiting on it
    fn apply_scene_load(
        &mut self,
        scene_name: &str,
        load_mode: LoadMode,
        scene_handle: &SceneHandle,
        entries: &[SceneObjectEntry],
        restore_held: bool,
        now: &Instant,
    ) {
        let templates =
            match self
                .space
                .load_scene(&mut self.world, scene_name, scene_handle, load_mode)
            {
                Ok(templates) => templates,
                Err(error) => {
                    warn!("Loading '{}': {}", scene_name, error);
                    return;
                }
            };

        let correlation = correlate_scene_objects(entries, templates);
        for (entry, _) in &correlation.matched {
            self.create_object(ReplicatedObject::scene_object(entry, *scene_handle));
        }
        for entry in &correlation.unmatched_entries {
            warn!(
                "Skipping {} at {} in '{}', it has no local counterpart",
                entry.object_id, entry.path, scene_name
            );
        }
        for template in &correlation.unmatched_templates {
            debug!(
                "Discarding local scene object at {} in '{}'",
                template.path, scene_name
            );
            self.world.discard_scene_object(scene_handle, template);
        }

        if restore_held {
            let restored = self.space.restore_held(scene_handle);
            debug!("Restored {} held objects into {}", restored.len(), scene_handle);
        }

        for message in self.waitlist.release_scene(scene_handle) {
            self.apply_object_message(message, now);
        }
    }

    /// Re-runs creates parked on a scene that went away before it loaded here
    fn release_retired(&mut self, scene_handle: &SceneHandle, now: &Instant) {
        for message in self.waitlist.release_scene(scene_handle) {
            self.apply_object_message(message, now);
        }
    }

    fn send_scene_event(&mut self, event: SceneEvent) {
        let key = self.pool.acquire(event);
        if let Some(record) = self.pool.get(&key) {
            self.transport.send(
                &PeerId::AUTHORITY,
                ChannelKind::SceneEvents,
                record.to_bytes(),
            );
        }
        match self.pool.release(&key) {
            Ok(Some(record)) => {
                let originator = record.originator();
                self.notify(&originator, &record);
            }
            Ok(None) => {}
            Err(error) => warn!("Outbound scene event record: {}", error),
        }
    }

    fn notify(&mut self, peer: &PeerId, event: &SceneEvent) {
        self.incoming_events.push_scene_event(peer, event);
    }
}
