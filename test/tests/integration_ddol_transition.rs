use scenery_client::{DespawnObjectEvent, SceneEventNotification};
use scenery_server::SpawnParams;
use scenery_shared::{LoadMode, SceneEventKind};
use scenery_test::{TestNetwork, CRATE_PREFAB, DUNGEON, LOBBY, PLAYER_PREFAB, TORCH_PREFAB};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn persistent_objects_survive_single_load_everywhere() {
    init_logging();
    let mut net = TestNetwork::new();
    let now = net.now();
    let lobby = net
        .server
        .load_scene(LOBBY, LoadMode::Single, &now)
        .unwrap()
        .scene_handle;
    let peer = net.connect(1);
    net.pump();

    let player = net
        .server
        .spawn(SpawnParams::new(PLAYER_PREFAB).owned_by(&peer))
        .unwrap();
    let lantern = net
        .server
        .spawn(SpawnParams::new(TORCH_PREFAB).inactive())
        .unwrap();
    let debris = net
        .server
        .spawn(SpawnParams::new(CRATE_PREFAB).destroy_with_scene())
        .unwrap();
    net.pump();
    let lobby_objects = net.server.registry().objects_in_scene(&lobby);
    assert_eq!(lobby_objects.len(), 5);
    assert_eq!(net.client(&peer).registry().len(), 5);
    net.client_mut(&peer).take_events();

    let now = net.now();
    let dungeon = net
        .server
        .load_scene(DUNGEON, LoadMode::Single, &now)
        .unwrap()
        .scene_handle;
    net.pump();

    let server_registry = net.server.registry();
    assert_eq!(server_registry.len(), 2);
    assert!(!net.server.loaded_scenes().contains(&lobby));

    let client = net.client(&peer);
    let client_registry = client.registry();
    assert_eq!(client_registry.len(), 2);
    assert_eq!(client.loaded_scenes().handles(), vec![dungeon]);
    assert_eq!(client.held_object_count(), 0);
    assert!(!client.world().is_loaded(&lobby));

    for registry in [server_registry, client_registry] {
        let player = registry.get(&player).unwrap();
        assert_eq!(player.scene_handle(), Some(dungeon));
        assert!(player.is_active());
        assert_eq!(player.owner(), Some(peer));

        let lantern = registry.get(&lantern).unwrap();
        assert_eq!(lantern.scene_handle(), Some(dungeon));
        assert!(!lantern.is_active());

        assert!(!registry.contains(&debris));
    }

    // transition destruction is local: the client saw it happen, nobody
    // sent it destroy messages
    let mut events = net.client_mut(&peer).take_events();
    let despawned: Vec<_> = events.read::<DespawnObjectEvent>().collect();
    assert_eq!(despawned.len(), 3);
    assert!(despawned.contains(&debris));
    assert!(!despawned.contains(&player));
}

#[test]
fn additive_unload_holds_persistent_objects_until_next_single_load() {
    init_logging();
    let mut net = TestNetwork::new();
    let now = net.now();
    net.server.load_scene(LOBBY, LoadMode::Single, &now).unwrap();
    let peer = net.connect(1);
    net.pump();

    let now = net.now();
    let dungeon = net
        .server
        .load_scene(DUNGEON, LoadMode::Additive, &now)
        .unwrap()
        .scene_handle;
    net.pump();
    let player = net
        .server
        .spawn(SpawnParams::new(PLAYER_PREFAB).in_scene(&dungeon))
        .unwrap();
    net.pump();

    net.server.unload_scene(&dungeon, &now).unwrap();
    net.pump();

    assert!(net.server.registry().get(&player).unwrap().is_held());
    assert!(net.client(&peer).registry().get(&player).unwrap().is_held());
    assert_eq!(net.client(&peer).held_object_count(), 1);

    let now = net.now();
    let dungeon_again = net
        .server
        .load_scene(DUNGEON, LoadMode::Single, &now)
        .unwrap()
        .scene_handle;
    net.pump();

    assert_eq!(
        net.client(&peer).registry().get(&player).unwrap().scene_handle(),
        Some(dungeon_again)
    );
    assert_eq!(net.client(&peer).held_object_count(), 0);
}

#[test]
fn single_load_phases_reach_the_peer_in_order() {
    init_logging();
    let mut net = TestNetwork::new();
    let now = net.now();
    net.server.load_scene(LOBBY, LoadMode::Single, &now).unwrap();
    let peer = net.connect(1);
    net.pump();
    net.client_mut(&peer).take_events();

    let now = net.now();
    net.server.load_scene(DUNGEON, LoadMode::Single, &now).unwrap();
    net.pump();

    let kinds: Vec<_> = net
        .client_mut(&peer)
        .take_events()
        .read::<SceneEventNotification>()
        .map(|notification| notification.event.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            SceneEventKind::Load,
            SceneEventKind::LoadComplete,
            SceneEventKind::LoadEventCompleted
        ]
    );
}
