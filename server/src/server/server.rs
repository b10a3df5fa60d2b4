use std::{
    collections::{BTreeSet, HashMap},
    mem,
    time::Instant,
};

use log::{debug, info, warn};

use scenery_shared::{
    ChannelKind, LoadMode, LoadedScenes, ObjectId, ObjectMessage, ObjectRegistry, PeerId,
    ReplicatedObject, SceneCatalog, SceneEvent, SceneEventCompleted, SceneEventKey,
    SceneEventKind, SceneEventPool, SceneHandle, SceneLoad, SceneObjectEntry,
    SceneObjectTemplate, ScenePhaseComplete, SceneSpace, SceneSynchronize, SceneUnload,
    SceneWorld, SynchronizeComplete, SynchronizedScene, Transport,
};

use crate::{
    scene::{
        scene_commands::{SceneCommand, SceneCommands, SceneEventListener},
        scene_event_progress::SceneEventProgress,
        synchronization_session::{SynchronizationPhase, SynchronizationSession},
    },
    ConnectError, DespawnError, Events, SceneError, ServerConfig, ServerError, SpawnError,
    SpawnParams,
};

/// Returned when a load or unload was started. Completion is reported later
/// through a `LoadEventCompletedEvent` / `UnloadEventCompletedEvent`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventStarted {
    pub kind: SceneEventKind,
    pub scene_handle: SceneHandle,
    /// Peers whose completion the event waits for
    pub expected_peers: Vec<PeerId>,
}

/// The authority of a replication session. Owns the loaded scenes and every
/// replicated object, issues scene events to peers and tracks their
/// completion, and synchronizes peers that join mid-session.
///
/// Nothing happens in the background: progress is made in
/// [`Server::receive`] and [`Server::update`].
pub struct Server<W: SceneWorld, T: Transport> {
    config: ServerConfig,
    catalog: SceneCatalog,
    world: W,
    transport: T,
    // Scenes & objects
    space: SceneSpace,
    next_object_id: u64,
    next_scene_handle: u32,
    // Scene events
    pool: SceneEventPool,
    progress: Option<SceneEventProgress>,
    commands: SceneCommands,
    listeners: Vec<Box<dyn SceneEventListener>>,
    // Peers
    peers: BTreeSet<PeerId>,
    sessions: HashMap<PeerId, SynchronizationSession>,
    // Events
    incoming_events: Events,
}

impl<W: SceneWorld, T: Transport> Server<W, T> {
    /// Create a new Server
    pub fn new(config: ServerConfig, catalog: SceneCatalog, world: W, transport: T) -> Self {
        Self {
            config,
            catalog,
            world,
            transport,
            space: SceneSpace::new(),
            next_object_id: 1,
            next_scene_handle: 1,
            pool: SceneEventPool::new(),
            progress: None,
            commands: SceneCommands::new(),
            listeners: Vec::new(),
            peers: BTreeSet::new(),
            sessions: HashMap::new(),
            incoming_events: Events::new(),
        }
    }

    /// Returns every event raised since the last call
    pub fn take_events(&mut self) -> Events {
        mem::take(&mut self.incoming_events)
    }

    // Peers

    /// Registers a connected peer. With `synchronize_on_connect` the peer is
    /// sent its synchronize payload right away.
    pub fn connect_peer(&mut self, peer: &PeerId, now: &Instant) -> Result<(), ConnectError> {
        if peer.is_authority() {
            return Err(ConnectError::ReservedPeerId { peer: *peer });
        }
        if !self.peers.insert(*peer) {
            return Err(ConnectError::AlreadyConnected { peer: *peer });
        }
        info!("{} connected", peer);
        self.incoming_events.push_connection(peer);

        if self.config.synchronize_on_connect {
            self.start_synchronization(peer, now);
        }
        Ok(())
    }

    /// Sends a connected peer the current scenes and objects
    pub fn synchronize_peer(&mut self, peer: &PeerId, now: &Instant) -> Result<(), ConnectError> {
        if !self.peers.contains(peer) {
            return Err(ConnectError::NotConnected { peer: *peer });
        }
        if self.sessions.contains_key(peer) {
            debug!("{} is already synchronizing", peer);
            return Ok(());
        }
        self.start_synchronization(peer, now);
        Ok(())
    }

    /// Forgets a peer. If a scene event is waiting on it, the peer is dropped
    /// from the expected set; its objects stay alive.
    pub fn disconnect_peer(&mut self, peer: &PeerId) -> Result<(), ConnectError> {
        if !self.peers.remove(peer) {
            return Err(ConnectError::NotConnected { peer: *peer });
        }
        if let Some(session) = self.sessions.remove(peer) {
            if !session.is_complete() {
                info!(
                    "{} disconnected during synchronization ({:?})",
                    peer,
                    session.phase()
                );
            }
        }
        self.space.registry_mut().remove_observer_from_all(peer);
        if let Some(progress) = self.progress.as_mut() {
            if progress.remove_peer(peer) {
                debug!(
                    "{} dropped from the {:?} event for {}",
                    peer,
                    progress.kind(),
                    progress.scene_handle()
                );
            }
        }
        info!("{} disconnected", peer);
        self.incoming_events.push_disconnection(peer);

        self.try_finish_scene_event();
        Ok(())
    }

    pub fn is_connected(&self, peer: &PeerId) -> bool {
        self.peers.contains(peer)
    }

    pub fn connected_peers(&self) -> impl Iterator<Item = &PeerId> {
        self.peers.iter()
    }

    pub fn synchronization_phase(&self, peer: &PeerId) -> Option<SynchronizationPhase> {
        self.sessions.get(peer).map(SynchronizationSession::phase)
    }

    pub fn is_synchronized(&self, peer: &PeerId) -> bool {
        self.sessions
            .get(peer)
            .map_or(false, SynchronizationSession::is_complete)
    }

    // Incoming

    /// Handles one payload a peer sent on `channel`
    pub fn receive(&mut self, peer: &PeerId, channel: ChannelKind, payload: &[u8], now: &Instant) {
        if !self.peers.contains(peer) {
            warn!("Dropping {} bytes from unknown {}", payload.len(), peer);
            self.incoming_events
                .push_error(ServerError::UnknownPeer { peer: *peer });
            return;
        }
        if channel != ChannelKind::SceneEvents {
            self.incoming_events.push_error(ServerError::UnexpectedChannel {
                peer: *peer,
                channel,
            });
            return;
        }

        let event = match SceneEvent::from_bytes(payload, &self.catalog) {
            Ok(event) => event,
            Err(error) => {
                warn!("Could not decode scene event from {}: {}", peer, error);
                self.incoming_events.push_error(ServerError::Decode {
                    peer: *peer,
                    error,
                });
                return;
            }
        };
        if event.kind().is_authority_originated() {
            self.incoming_events.push_error(ServerError::UnexpectedEvent {
                peer: *peer,
                kind: event.kind(),
            });
            return;
        }
        if event.originator() != *peer {
            self.incoming_events.push_error(ServerError::OriginatorMismatch {
                peer: *peer,
                originator: event.originator(),
            });
            return;
        }

        let key = self.pool.acquire(event);
        self.dispatch_peer_event(peer, &key, now);
        if let Err(error) = self.pool.release(&key) {
            warn!("Inbound scene event record: {}", error);
        }
    }

    /// Drives timeouts and starts the next queued scene command once no
    /// event is in flight
    pub fn update(&mut self, now: &Instant) {
        let timeout = self.config.scene.load_event_timeout;
        if let Some(progress) = self.progress.as_mut() {
            let expired = progress.time_out(now, &timeout);
            if !expired.is_empty() {
                warn!(
                    "{:?} event for {} timed out waiting on {:?}",
                    progress.kind(),
                    progress.scene_handle(),
                    expired
                );
            }
        }
        self.try_finish_scene_event();

        if self.progress.is_some() {
            return;
        }
        if let Some(command) = self.commands.pop() {
            let result = match command {
                SceneCommand::Load {
                    scene_name,
                    load_mode,
                } => self.load_scene(&scene_name, load_mode, now),
                SceneCommand::Unload { scene_handle } => self.unload_scene(&scene_handle, now),
            };
            if let Err(error) = result {
                warn!("Queued scene command failed: {}", error);
                self.incoming_events
                    .push_error(ServerError::QueuedCommand(error));
            }
        }
    }

    // Scenes

    /// Loads a scene here and on every synchronizing or synchronized peer
    pub fn load_scene(
        &mut self,
        scene_name: &str,
        load_mode: LoadMode,
        now: &Instant,
    ) -> Result<EventStarted, SceneError> {
        self.check_no_event_in_progress()?;
        if !self.catalog.contains(scene_name) {
            return Err(SceneError::InvalidSceneName {
                scene_name: scene_name.to_string(),
            });
        }

        let scene_handle = self.allocate_scene_handle();
        if load_mode == LoadMode::Single {
            let report = self.space.prepare_single_load(&mut self.world);
            self.report_despawns(&report.destroyed);
        }
        let templates =
            match self
                .space
                .load_scene(&mut self.world, scene_name, &scene_handle, load_mode)
            {
                Ok(templates) => templates,
                Err(error) => {
                    warn!("Loading '{}': {}", scene_name, error);
                    Vec::new()
                }
            };
        let scene_objects = self.register_scene_objects(&scene_handle, templates);
        if load_mode == LoadMode::Single {
            let restored = self.space.restore_held(&scene_handle);
            debug!("Restored {} held objects into {}", restored.len(), scene_handle);
        }
        info!(
            "Loading scene '{}' as {} ({:?}, {} scene objects)",
            scene_name,
            scene_handle,
            load_mode,
            scene_objects.len()
        );

        let event = SceneEvent::Load(SceneLoad {
            scene_name: scene_name.to_string(),
            load_mode,
            scene_handle,
            scene_objects,
        });
        let local_complete = SceneEvent::LoadComplete(ScenePhaseComplete {
            originator: PeerId::AUTHORITY,
            scene_name: scene_name.to_string(),
            load_mode,
            scene_handle,
        });
        Ok(self.start_scene_event(event, local_complete, scene_handle, now))
    }

    /// Unloads a loaded scene here and on every synchronizing or
    /// synchronized peer
    pub fn unload_scene(
        &mut self,
        scene_handle: &SceneHandle,
        now: &Instant,
    ) -> Result<EventStarted, SceneError> {
        self.check_no_event_in_progress()?;
        let Some(scene) = self.space.scenes().get(scene_handle).cloned() else {
            return Err(SceneError::SceneNotLoaded {
                scene_handle: *scene_handle,
            });
        };

        let report = self
            .space
            .unload_scene(&mut self.world, scene_handle)
            .map_err(|_| SceneError::SceneNotLoaded {
                scene_handle: *scene_handle,
            })?;
        self.report_despawns(&report.destroyed);
        info!(
            "Unloading scene '{}' ({}), {} objects held",
            scene.name,
            scene_handle,
            report.held.len()
        );

        let event = SceneEvent::Unload(SceneUnload {
            scene_name: scene.name.clone(),
            load_mode: scene.load_mode,
            scene_handle: *scene_handle,
        });
        let local_complete = SceneEvent::UnloadComplete(ScenePhaseComplete {
            originator: PeerId::AUTHORITY,
            scene_name: scene.name,
            load_mode: scene.load_mode,
            scene_handle: *scene_handle,
        });
        Ok(self.start_scene_event(event, local_complete, *scene_handle, now))
    }

    /// Queues a load to start at the next tick with no event in flight
    pub fn queue_load_scene(&mut self, scene_name: &str, load_mode: LoadMode) {
        self.commands.load_scene(scene_name, load_mode);
    }

    pub fn queue_unload_scene(&mut self, scene_handle: &SceneHandle) {
        self.commands.unload_scene(scene_handle);
    }

    pub fn queued_commands(&self) -> usize {
        self.commands.len()
    }

    pub fn add_scene_listener<L: SceneEventListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    /// The top-level event awaiting completion, if any
    pub fn scene_event_in_progress(&self) -> Option<(SceneEventKind, SceneHandle)> {
        self.progress
            .as_ref()
            .map(|progress| (progress.kind(), progress.scene_handle()))
    }

    pub fn loaded_scenes(&self) -> &LoadedScenes {
        self.space.scenes()
    }

    /// Scene event records not yet released
    pub fn in_flight_records(&self) -> usize {
        self.pool.in_flight()
    }

    // Objects

    /// Spawns a dynamic object and announces it to every peer that is
    /// synchronizing or synchronized
    pub fn spawn(&mut self, params: SpawnParams) -> Result<ObjectId, SpawnError> {
        let scene_handle = match params.scene {
            Some(scene_handle) => scene_handle,
            None => self
                .space
                .scenes()
                .active_scene()
                .ok_or(SpawnError::NoActiveScene)?,
        };
        if !self.space.is_loaded(&scene_handle) {
            return Err(SpawnError::SceneNotLoaded { scene_handle });
        }
        if let Some(owner) = params.owner {
            if !self.peers.contains(&owner) {
                return Err(SpawnError::UnknownOwner { owner });
            }
        }

        let object_id = self.allocate_object_id();
        let object = ReplicatedObject::dynamic(object_id, params.prefab_hash, scene_handle)
            .with_owner(params.owner)
            .with_destroy_with_scene(params.destroy_with_scene)
            .with_active(params.active);
        let message = ObjectMessage::Create(object.snapshot());
        self.space.insert_object(&mut self.world, object)?;
        for peer in self.synchronized_peers() {
            if let Err(error) = self.space.registry_mut().add_observer(&object_id, &peer) {
                warn!("Adding observer {}: {}", peer, error);
            }
        }

        let payload = message.to_bytes();
        for peer in self.sessions.keys() {
            self.transport
                .send(peer, ChannelKind::Objects, payload.clone());
        }
        debug!("Spawned {} in {}", object_id, scene_handle);
        self.incoming_events.push_spawn(&object_id);
        Ok(object_id)
    }

    /// Destroys an object and tells every peer that knows of it
    pub fn despawn(&mut self, object_id: &ObjectId) -> Result<(), DespawnError> {
        let Some(object) = self.space.registry().get(object_id) else {
            return Err(DespawnError::NotFound {
                object_id: *object_id,
            });
        };
        // peers still synchronizing may have the create queued
        let recipients: Vec<PeerId> = self
            .sessions
            .values()
            .filter(|session| !session.is_complete() || object.is_observed_by(&session.peer()))
            .map(SynchronizationSession::peer)
            .collect();
        self.space.remove_object(&mut self.world, object_id);

        let payload = ObjectMessage::Destroy(*object_id).to_bytes();
        for peer in &recipients {
            self.transport
                .send(peer, ChannelKind::Objects, payload.clone());
        }
        debug!("Despawned {}", object_id);
        self.incoming_events.push_despawn(object_id);
        Ok(())
    }

    pub fn registry(&self) -> &ObjectRegistry {
        self.space.registry()
    }

    /// Destroys every object, unloads every scene and forgets every peer
    pub fn shutdown(&mut self) {
        self.progress = None;
        self.pool.clear();
        self.commands.clear();
        self.sessions.clear();
        for peer in mem::take(&mut self.peers) {
            self.incoming_events.push_disconnection(&peer);
        }
        let destroyed = self.space.clear(&mut self.world);
        self.report_despawns(&destroyed);
        info!("Server shut down, {} objects destroyed", destroyed.len());
    }

    // Collaborators

    pub fn config(&self) -> &ServerConfig {
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

    // Private

    fn check_no_event_in_progress(&self) -> Result<(), SceneError> {
        match &self.progress {
            Some(progress) => Err(SceneError::SceneEventInProgress {
                kind: progress.kind(),
                scene_handle: progress.scene_handle(),
            }),
            None => Ok(()),
        }
    }

    fn allocate_scene_handle(&mut self) -> SceneHandle {
        let scene_handle = SceneHandle::new(self.next_scene_handle);
        self.next_scene_handle = self.next_scene_handle.wrapping_add(1).max(1);
        scene_handle
    }

    fn allocate_object_id(&mut self) -> ObjectId {
        let object_id = ObjectId::new(self.next_object_id);
        self.next_object_id += 1;
        object_id
    }

    fn synchronized_peers(&self) -> Vec<PeerId> {
        self.sessions
            .values()
            .filter(|session| session.is_complete())
            .map(SynchronizationSession::peer)
            .collect()
    }

    fn scene_entries(&self, scene_handle: &SceneHandle) -> Vec<SceneObjectEntry> {
        self.space
            .registry()
            .scene_objects_in(scene_handle)
            .into_iter()
            .filter_map(ReplicatedObject::scene_entry)
            .collect()
    }

    /// Gives every placed object of a freshly loaded scene an id and
    /// registers it. Returns the entries peers correlate against, in
    /// traversal order.
    fn register_scene_objects(
        &mut self,
        scene_handle: &SceneHandle,
        templates: Vec<SceneObjectTemplate>,
    ) -> Vec<SceneObjectEntry> {
        let observers = self.synchronized_peers();
        let mut entries = Vec::with_capacity(templates.len());

        for template in templates {
            let entry = SceneObjectEntry {
                object_id: self.allocate_object_id(),
                prefab_hash: template.prefab_hash,
                path: template.path,
                owner: None,
                active: template.active,
            };
            let object = ReplicatedObject::scene_object(&entry, *scene_handle);
            if let Err(error) = self.space.insert_object(&mut self.world, object) {
                warn!("Skipping scene object at {}: {}", entry.path, error);
                continue;
            }
            for peer in &observers {
                if let Err(error) = self
                    .space
                    .registry_mut()
                    .add_observer(&entry.object_id, peer)
                {
                    warn!("Adding observer {}: {}", peer, error);
                }
            }
            self.incoming_events.push_spawn(&entry.object_id);
            entries.push(entry);
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    fn report_despawns(&mut self, destroyed: &[ObjectId]) {
        for object_id in destroyed {
            self.incoming_events.push_despawn(object_id);
        }
    }

    fn start_synchronization(&mut self, peer: &PeerId, now: &Instant) {
        let scenes: Vec<SynchronizedScene> = self
            .space
            .scenes()
            .iter()
            .map(|scene| SynchronizedScene {
                scene_name: scene.name.clone(),
                load_mode: scene.load_mode,
                scene_handle: scene.handle,
                scene_objects: self.scene_entries(&scene.handle),
            })
            .collect();
        let objects = self
            .space
            .registry()
            .dynamic_objects()
            .map(ReplicatedObject::snapshot)
            .collect::<Vec<_>>();
        let pending_scenes = scenes
            .iter()
            .map(|scene| (scene.scene_handle, scene.scene_name.clone(), scene.load_mode))
            .collect();

        info!(
            "Synchronizing {}: {} scenes, {} objects",
            peer,
            scenes.len(),
            objects.len()
        );
        self.sessions
            .insert(*peer, SynchronizationSession::new(*peer, pending_scenes, now));

        let event = SceneEvent::Synchronize(SceneSynchronize { scenes, objects });
        if let Some(event) = self.send_transient(event, &[*peer]) {
            self.notify(peer, &event);
        }
    }

    fn start_scene_event(
        &mut self,
        event: SceneEvent,
        local_complete: SceneEvent,
        scene_handle: SceneHandle,
        now: &Instant,
    ) -> EventStarted {
        let kind = event.kind();
        let expected: BTreeSet<PeerId> = self.sessions.keys().copied().collect();
        let expected_peers: Vec<PeerId> = expected.iter().copied().collect();

        self.notify(&PeerId::AUTHORITY, &event);
        let key = self.pool.acquire(event);
        self.send_record(&key, &expected_peers);
        self.progress = Some(SceneEventProgress::new(
            key,
            kind,
            scene_handle,
            expected,
            now,
        ));
        self.notify(&PeerId::AUTHORITY, &local_complete);

        // no peers to wait for
        self.try_finish_scene_event();

        EventStarted {
            kind,
            scene_handle,
            expected_peers,
        }
    }

    fn send_record(&mut self, key: &SceneEventKey, recipients: &[PeerId]) {
        let Some(record) = self.pool.get(key) else {
            warn!("Cannot send a released scene event record");
            return;
        };
        let payload = record.to_bytes();
        for peer in recipients {
            self.transport
                .send(peer, ChannelKind::SceneEvents, payload.clone());
        }
    }

    /// Sends a record nothing waits on and hands it back once released
    fn send_transient(&mut self, event: SceneEvent, recipients: &[PeerId]) -> Option<SceneEvent> {
        let key = self.pool.acquire(event);
        self.send_record(&key, recipients);
        match self.pool.release(&key) {
            Ok(record) => record,
            Err(error) => {
                warn!("Transient scene event record: {}", error);
                None
            }
        }
    }

    fn notify(&mut self, peer: &PeerId, event: &SceneEvent) {
        self.incoming_events.push_scene_event(peer, event);
        for listener in self.listeners.iter_mut() {
            listener.on_scene_event(peer, event, &mut self.commands);
        }
    }

    fn dispatch_peer_event(&mut self, peer: &PeerId, key: &SceneEventKey, now: &Instant) {
        let Some(event) = self.pool.get(key).cloned() else {
            return;
        };
        match &event {
            SceneEvent::LoadComplete(phase) => {
                self.on_phase_complete(peer, SceneEventKind::Load, &phase.scene_handle, &event)
            }
            SceneEvent::UnloadComplete(phase) => {
                self.on_phase_complete(peer, SceneEventKind::Unload, &phase.scene_handle, &event)
            }
            SceneEvent::SynchronizeComplete(_) => self.on_synchronize_complete(peer, now),
            _ => {
                self.incoming_events.push_error(ServerError::UnexpectedEvent {
                    peer: *peer,
                    kind: event.kind(),
                });
            }
        }
    }

    fn on_phase_complete(
        &mut self,
        peer: &PeerId,
        tracked_kind: SceneEventKind,
        scene_handle: &SceneHandle,
        event: &SceneEvent,
    ) {
        let counted = self.progress.as_mut().map_or(false, |progress| {
            progress.tracks(tracked_kind, scene_handle) && progress.mark_completed(peer)
        });
        if counted {
            debug!("{} completed {:?} of {}", peer, tracked_kind, scene_handle);
            self.notify(peer, event);
            self.try_finish_scene_event();
            return;
        }

        if tracked_kind == SceneEventKind::Load {
            if let Some(session) = self.sessions.get_mut(peer) {
                if session.is_pending(scene_handle) {
                    session.scene_loaded(scene_handle);
                    debug!("{} loaded synchronized {}", peer, scene_handle);
                    self.notify(peer, event);
                    return;
                }
            }
        }

        debug!(
            "Ignoring late or duplicate {:?} completion from {} for {}",
            tracked_kind, peer, scene_handle
        );
    }

    fn on_synchronize_complete(&mut self, peer: &PeerId, now: &Instant) {
        let Some(session) = self.sessions.get_mut(peer) else {
            debug!("{} completed a synchronization it was never sent", peer);
            return;
        };
        if session.is_complete() {
            debug!("Duplicate synchronize completion from {}", peer);
            return;
        }
        if session.phase() == SynchronizationPhase::AwaitingSceneLoads {
            warn!(
                "{} finished synchronizing without loading {:?}",
                peer,
                session.pending_scene_names()
            );
        }
        session.complete();
        let elapsed = now.saturating_duration_since(session.started_at());

        self.space.registry_mut().add_observer_to_all(peer);
        info!("{} synchronized in {:?}", peer, elapsed);
        self.notify(
            peer,
            &SceneEvent::SynchronizeComplete(SynchronizeComplete { originator: *peer }),
        );
    }

    /// Emits the aggregate completion once every expected peer answered or
    /// timed out. The progress is taken, so this fires once per event.
    fn try_finish_scene_event(&mut self) {
        let Some(progress) = self.progress.take() else {
            return;
        };
        if !progress.is_done() {
            self.progress = Some(progress);
            return;
        }

        let record = match self.pool.release(&progress.record_key()) {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!("Scene event record is still retained at completion");
                return;
            }
            Err(error) => {
                warn!("Completing scene event: {}", error);
                return;
            }
        };
        let clients_completed = progress.completed().to_vec();
        let clients_timed_out = progress.timed_out().to_vec();
        let completed = match record {
            SceneEvent::Load(load) => SceneEvent::LoadEventCompleted(SceneEventCompleted {
                scene_name: load.scene_name,
                load_mode: load.load_mode,
                scene_handle: load.scene_handle,
                clients_completed,
                clients_timed_out,
            }),
            SceneEvent::Unload(unload) => SceneEvent::UnloadEventCompleted(SceneEventCompleted {
                scene_name: unload.scene_name,
                load_mode: unload.load_mode,
                scene_handle: unload.scene_handle,
                clients_completed,
                clients_timed_out,
            }),
            other => {
                warn!("{:?} record cannot complete a scene event", other.kind());
                return;
            }
        };
        info!(
            "{:?} of {} finished: {} completed, {} timed out",
            progress.kind(),
            progress.scene_handle(),
            progress.completed().len(),
            progress.timed_out().len()
        );

        let recipients: Vec<PeerId> = self.peers.iter().copied().collect();
        if let Some(completed) = self.send_transient(completed, &recipients) {
            self.notify(&PeerId::AUTHORITY, &completed);
        }
    }
}
