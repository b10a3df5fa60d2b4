/// Scenario: a peer joins while the authority keeps spawning
/// Object messages that overtake the synchronize payload are deferred and
/// replayed, so the peer ends up with exactly the authority's objects

use scenery_server::{SpawnParams, SynchronizationPhase, SynchronizeCompleteEvent};
use scenery_shared::{ChannelKind, LoadMode, ObjectId, PeerId};
use scenery_test::{TestNetwork, CRATE_PREFAB, LOBBY, PLAYER_PREFAB};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn object_ids(ids: impl Iterator<Item = ObjectId>) -> Vec<ObjectId> {
    let mut ids: Vec<ObjectId> = ids.collect();
    ids.sort();
    ids
}

#[test]
fn three_hundred_spawns_during_synchronization() {
    init_logging();
    let mut net = TestNetwork::new();
    let now = net.now();
    net.server.load_scene(LOBBY, LoadMode::Single, &now).unwrap();
    for _ in 0..10 {
        net.server.spawn(SpawnParams::new(CRATE_PREFAB)).unwrap();
    }

    let peer = net.connect(1);
    assert_eq!(
        net.server.synchronization_phase(&peer),
        Some(SynchronizationPhase::AwaitingSceneLoads)
    );
    for index in 0..300 {
        let params = SpawnParams::new(PLAYER_PREFAB);
        let params = if index % 3 == 0 { params.destroy_with_scene() } else { params };
        net.server.spawn(params).unwrap();
    }

    // the object channel overtakes the scene channel
    assert_eq!(
        net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::Objects),
        300
    );
    assert_eq!(net.client(&peer).deferred_message_count(), 300);
    assert!(!net.client(&peer).is_synchronized());
    assert_eq!(net.client(&peer).registry().len(), 0);

    net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::SceneEvents);
    let client = net.client(&peer);
    assert!(client.is_synchronized());
    assert!(client.last_deferred_count() > 0);
    assert_eq!(client.last_deferred_count(), 300);
    assert_eq!(client.deferred_message_count(), 0);

    net.pump();
    assert!(net.server.is_synchronized(&peer));
    let mut events = net.server.take_events();
    assert_eq!(
        events.read::<SynchronizeCompleteEvent>().collect::<Vec<_>>(),
        vec![peer]
    );

    let server_ids = object_ids(net.server.registry().ids().copied());
    let client_ids = object_ids(net.client(&peer).registry().ids().copied());
    assert_eq!(server_ids.len(), 2 + 10 + 300);
    assert_eq!(client_ids, server_ids);

    // observer only once synchronized
    assert!(net
        .server
        .registry()
        .iter()
        .all(|object| object.is_observed_by(&peer)));
}

#[test]
fn destroy_racing_synchronization_is_replayed_in_order() {
    init_logging();
    let mut net = TestNetwork::new();
    let now = net.now();
    net.server.load_scene(LOBBY, LoadMode::Single, &now).unwrap();

    let peer = net.connect(1);
    let short_lived = net.server.spawn(SpawnParams::new(CRATE_PREFAB)).unwrap();
    let kept = net.server.spawn(SpawnParams::new(CRATE_PREFAB)).unwrap();
    net.server.despawn(&short_lived).unwrap();

    net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::Objects);
    assert_eq!(net.client(&peer).deferred_message_count(), 3);
    net.pump();

    let registry = net.client(&peer).registry();
    assert!(registry.contains(&kept));
    assert!(!registry.contains(&short_lived));
    assert!(!net.client(&peer).world().live_objects.contains(&short_lived));
}

#[test]
fn peers_not_yet_synchronized_are_not_observers() {
    init_logging();
    let mut net = TestNetwork::new();
    let now = net.now();
    net.server.load_scene(LOBBY, LoadMode::Single, &now).unwrap();

    let peer = net.connect(1);
    let object_id = net.server.spawn(SpawnParams::new(CRATE_PREFAB)).unwrap();
    assert!(!net
        .server
        .registry()
        .get(&object_id)
        .unwrap()
        .is_observed_by(&peer));

    net.pump();
    assert!(net
        .server
        .registry()
        .get(&object_id)
        .unwrap()
        .is_observed_by(&peer));
}
