use std::{
    collections::{BTreeMap, HashSet},
    time::{Duration, Instant},
};

use scenery_client::{Client, ClientConfig};
use scenery_server::{Server, ServerConfig};
use scenery_shared::{ChannelKind, PeerId};

use crate::{scene_catalog, test_world, LocalHub, LocalTransport, TestWorld};

pub type TestServer = Server<TestWorld, LocalTransport>;
pub type TestClient = Client<TestWorld, LocalTransport>;

/// One authority and any number of peers wired through a [`LocalHub`].
/// Nothing moves until the test delivers it, so races between the scene
/// and object channels can be staged exactly.
pub struct TestNetwork {
    pub hub: LocalHub,
    pub server: TestServer,
    pub clients: BTreeMap<PeerId, TestClient>,
    client_config: ClientConfig,
    muted: HashSet<PeerId>,
    now: Instant,
}

impl TestNetwork {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default(), ClientConfig::default())
    }

    pub fn with_config(server_config: ServerConfig, client_config: ClientConfig) -> Self {
        let hub = LocalHub::new();
        let server = Server::new(
            server_config,
            scene_catalog(),
            test_world(),
            hub.transport_for(&PeerId::AUTHORITY),
        );
        Self {
            hub,
            server,
            clients: BTreeMap::new(),
            client_config,
            muted: HashSet::new(),
            now: Instant::now(),
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Creates a peer with the standard scene layouts and connects it
    pub fn connect(&mut self, peer: u64) -> PeerId {
        self.connect_with_world(peer, test_world())
    }

    pub fn connect_with_world(&mut self, peer: u64, world: TestWorld) -> PeerId {
        let peer_id = PeerId::new(peer);
        let client = Client::new(
            self.client_config.clone(),
            scene_catalog(),
            world,
            self.hub.transport_for(&peer_id),
            peer_id,
        );
        self.clients.insert(peer_id, client);
        self.server.connect_peer(&peer_id, &self.now).unwrap();
        peer_id
    }

    pub fn client(&self, peer: &PeerId) -> &TestClient {
        self.clients.get(peer).unwrap()
    }

    pub fn client_mut(&mut self, peer: &PeerId) -> &mut TestClient {
        self.clients.get_mut(peer).unwrap()
    }

    /// Everything `peer` sends from now on is lost
    pub fn mute(&mut self, peer: &PeerId) {
        self.muted.insert(*peer);
    }

    pub fn disconnect(&mut self, peer: &PeerId) {
        self.server.disconnect_peer(peer).unwrap();
        self.hub.sever(peer);
        self.clients.remove(peer);
        self.muted.remove(peer);
    }

    /// Feeds everything queued on one link to its receiver. Returns how many
    /// payloads were delivered.
    pub fn deliver(&mut self, from: &PeerId, to: &PeerId, channel: ChannelKind) -> usize {
        let payloads = self.hub.take(from, to, channel);
        if self.muted.contains(from) {
            return 0;
        }
        let count = payloads.len();
        if to.is_authority() {
            for payload in payloads {
                self.server.receive(from, channel, &payload, &self.now);
            }
        } else if let Some(client) = self.clients.get_mut(to) {
            for payload in payloads {
                client.receive(channel, &payload, &self.now);
            }
        }
        count
    }

    /// Delivers the authority's scene channel, then its object channel, to
    /// one peer
    pub fn deliver_to_client(&mut self, peer: &PeerId) -> usize {
        self.deliver(&PeerId::AUTHORITY, peer, ChannelKind::SceneEvents)
            + self.deliver(&PeerId::AUTHORITY, peer, ChannelKind::Objects)
    }

    /// Delivers every peer's replies to the authority
    pub fn deliver_to_server(&mut self) -> usize {
        let peers: Vec<PeerId> = self.clients.keys().copied().collect();
        peers
            .iter()
            .map(|peer| self.deliver(peer, &PeerId::AUTHORITY, ChannelKind::SceneEvents))
            .sum()
    }

    /// Delivers in both directions until the network is quiet
    pub fn pump(&mut self) {
        for _ in 0..64 {
            let peers: Vec<PeerId> = self.clients.keys().copied().collect();
            let mut delivered = 0;
            for peer in &peers {
                delivered += self.deliver_to_client(peer);
            }
            delivered += self.deliver_to_server();
            if delivered == 0 {
                return;
            }
        }
        panic!("network did not settle");
    }

    /// Moves the clock and runs one update everywhere
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
        self.server.update(&self.now);
        for client in self.clients.values_mut() {
            client.update(&self.now);
        }
    }

    /// One frame: update everywhere, then settle the network
    pub fn tick(&mut self) {
        self.advance(Duration::from_millis(16));
        self.pump();
    }
}

impl Default for TestNetwork {
    fn default() -> Self {
        Self::new()
    }
}
