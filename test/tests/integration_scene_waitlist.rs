use std::time::Duration;

use scenery_server::SpawnParams;
use scenery_shared::{ChannelKind, LoadMode, PeerId, SceneHandle};
use scenery_test::{TestNetwork, ARENA, DUNGEON, LOBBY, TORCH_PREFAB};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn synchronized_peer(net: &mut TestNetwork) -> PeerId {
    let now = net.now();
    net.server.load_scene(LOBBY, LoadMode::Single, &now).unwrap();
    let peer = net.connect(1);
    net.pump();
    peer
}

fn loaded_arena(net: &mut TestNetwork) -> SceneHandle {
    let now = net.now();
    let arena = net
        .server
        .load_scene(ARENA, LoadMode::Additive, &now)
        .unwrap()
        .scene_handle;
    net.pump();
    arena
}

#[test]
fn create_overtaking_its_scene_load_is_parked() {
    init_logging();
    let mut net = TestNetwork::new();
    let peer = synchronized_peer(&mut net);
    let now = net.now();

    let arena = net
        .server
        .load_scene(ARENA, LoadMode::Additive, &now)
        .unwrap()
        .scene_handle;
    let torch = net
        .server
        .spawn(SpawnParams::new(TORCH_PREFAB).in_scene(&arena))
        .unwrap();

    assert_eq!(net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::Objects), 1);
    assert_eq!(net.client(&peer).waitlisted_count(), 1);
    assert!(!net.client(&peer).registry().contains(&torch));

    net.pump();
    let client = net.client(&peer);
    assert_eq!(client.waitlisted_count(), 0);
    let object = client.registry().get(&torch).unwrap();
    assert_eq!(object.scene_handle(), Some(arena));
}

#[test]
fn destroy_cancels_a_parked_create() {
    init_logging();
    let mut net = TestNetwork::new();
    let peer = synchronized_peer(&mut net);
    let now = net.now();

    let arena = net
        .server
        .load_scene(ARENA, LoadMode::Additive, &now)
        .unwrap()
        .scene_handle;
    let torch = net
        .server
        .spawn(SpawnParams::new(TORCH_PREFAB).in_scene(&arena))
        .unwrap();
    net.server.despawn(&torch).unwrap();

    assert_eq!(net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::Objects), 2);
    assert_eq!(net.client(&peer).waitlisted_count(), 0);

    net.pump();
    let client = net.client(&peer);
    assert!(client.loaded_scenes().contains(&arena));
    assert!(!client.registry().contains(&torch));
    assert!(!client.world().live_objects.contains(&torch));
}

#[test]
fn creates_for_loaded_scenes_apply_immediately() {
    init_logging();
    let mut net = TestNetwork::new();
    let peer = synchronized_peer(&mut net);

    let torch = net
        .server
        .spawn(SpawnParams::new(TORCH_PREFAB))
        .unwrap();
    net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::Objects);

    let client = net.client(&peer);
    assert_eq!(client.waitlisted_count(), 0);
    assert!(client.registry().contains(&torch));
    assert!(net
        .server
        .registry()
        .get(&torch)
        .unwrap()
        .is_observed_by(&peer));
}

#[test]
fn create_arriving_after_its_scene_unloaded_is_held() {
    init_logging();
    let mut net = TestNetwork::new();
    let peer = synchronized_peer(&mut net);
    let arena = loaded_arena(&mut net);
    let now = net.now();

    let torch = net
        .server
        .spawn(SpawnParams::new(TORCH_PREFAB).in_scene(&arena))
        .unwrap();
    net.server.unload_scene(&arena, &now).unwrap();
    assert!(net.server.registry().get(&torch).unwrap().is_held());

    // the unload overtakes the create
    net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::SceneEvents);
    assert_eq!(net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::Objects), 1);

    let client = net.client(&peer);
    assert_eq!(client.waitlisted_count(), 0);
    assert_eq!(client.held_object_count(), 1);
    assert!(client.registry().get(&torch).unwrap().is_held());

    net.pump();
    net.advance(Duration::from_secs(61));
    assert!(net.client(&peer).registry().contains(&torch));

    let now = net.now();
    let dungeon = net
        .server
        .load_scene(DUNGEON, LoadMode::Single, &now)
        .unwrap()
        .scene_handle;
    net.pump();

    let client = net.client(&peer);
    assert_eq!(client.registry().len(), net.server.registry().len());
    assert_eq!(client.held_object_count(), 0);
    assert_eq!(
        client.registry().get(&torch).unwrap().scene_handle(),
        Some(dungeon)
    );
    assert_eq!(
        net.server.registry().get(&torch).unwrap().scene_handle(),
        Some(dungeon)
    );
}

#[test]
fn create_dying_with_an_unloaded_scene_is_dropped() {
    init_logging();
    let mut net = TestNetwork::new();
    let peer = synchronized_peer(&mut net);
    let arena = loaded_arena(&mut net);
    let now = net.now();

    let torch = net
        .server
        .spawn(
            SpawnParams::new(TORCH_PREFAB)
                .in_scene(&arena)
                .destroy_with_scene(),
        )
        .unwrap();
    net.server.unload_scene(&arena, &now).unwrap();
    assert!(!net.server.registry().contains(&torch));

    net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::SceneEvents);
    assert_eq!(net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::Objects), 1);

    let client = net.client(&peer);
    assert_eq!(client.waitlisted_count(), 0);
    assert_eq!(client.held_object_count(), 0);
    assert!(!client.registry().contains(&torch));
    assert!(!client.world().live_objects.contains(&torch));
}

#[test]
fn create_arriving_after_a_single_load_follows_into_the_new_scene() {
    init_logging();
    let mut net = TestNetwork::new();
    let peer = synchronized_peer(&mut net);
    let now = net.now();

    let torch = net
        .server
        .spawn(SpawnParams::new(TORCH_PREFAB))
        .unwrap();
    let dungeon = net
        .server
        .load_scene(DUNGEON, LoadMode::Single, &now)
        .unwrap()
        .scene_handle;

    net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::SceneEvents);
    net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::Objects);

    let client = net.client(&peer);
    assert_eq!(client.waitlisted_count(), 0);
    assert_eq!(
        client.registry().get(&torch).unwrap().scene_handle(),
        Some(dungeon)
    );

    net.pump();
    assert_eq!(
        net.server.registry().get(&torch).unwrap().scene_handle(),
        Some(dungeon)
    );
}
