/// Scenario: unloading a scene that is already gone
/// The call fails fast and nothing is issued: no record, no payload, no event

use scenery_server::{
    SceneError, SceneEventNotification, UnloadCompleteEvent, UnloadEventCompletedEvent,
};
use scenery_shared::{ChannelKind, LoadMode, PeerId, SceneEventKind, SceneHandle};
use scenery_test::{TestNetwork, ARENA, LOBBY};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn second_unload_reports_scene_not_loaded() {
    init_logging();
    let mut net = TestNetwork::new();
    let now = net.now();
    net.server.load_scene(LOBBY, LoadMode::Single, &now).unwrap();
    let peer = net.connect(1);
    net.pump();

    let now = net.now();
    let arena = net
        .server
        .load_scene(ARENA, LoadMode::Additive, &now)
        .unwrap()
        .scene_handle;
    net.pump();
    net.server.unload_scene(&arena, &now).unwrap();
    net.pump();

    let mut events = net.server.take_events();
    let unload_completes: Vec<_> = events.read::<UnloadCompleteEvent>().collect();
    assert_eq!(unload_completes.len(), 2);
    assert_eq!(unload_completes[1].originator, peer);
    assert_eq!(events.read::<UnloadEventCompletedEvent>().count(), 1);
    assert!(!net.client(&peer).loaded_scenes().contains(&arena));

    assert_eq!(
        net.server.unload_scene(&arena, &now),
        Err(SceneError::SceneNotLoaded {
            scene_handle: arena
        })
    );
    assert_eq!(net.server.in_flight_records(), 0);
    assert!(net.server.scene_event_in_progress().is_none());
    assert_eq!(
        net.hub
            .pending(&PeerId::AUTHORITY, &peer, ChannelKind::SceneEvents),
        0
    );
    assert!(!net.server.take_events().has::<SceneEventNotification>());
}

#[test]
fn never_loaded_handle_is_not_loaded() {
    init_logging();
    let mut net = TestNetwork::new();
    let now = net.now();

    assert_eq!(
        net.server.unload_scene(&SceneHandle::new(42), &now),
        Err(SceneError::SceneNotLoaded {
            scene_handle: SceneHandle::new(42)
        })
    );
    assert!(net.server.take_events().is_empty());
}

#[test]
fn operations_are_single_flight() {
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

    let arena = net
        .server
        .load_scene(ARENA, LoadMode::Additive, &now)
        .unwrap()
        .scene_handle;
    let in_progress = SceneError::SceneEventInProgress {
        kind: SceneEventKind::Load,
        scene_handle: arena,
    };
    assert_eq!(
        net.server.load_scene(LOBBY, LoadMode::Additive, &now),
        Err(in_progress.clone())
    );
    // in-progress is checked before the handle
    assert_eq!(
        net.server.unload_scene(&SceneHandle::new(42), &now),
        Err(in_progress.clone())
    );
    assert_eq!(net.server.unload_scene(&lobby, &now), Err(in_progress));

    net.pump();
    assert!(net.server.scene_event_in_progress().is_none());
    assert!(net.server.unload_scene(&lobby, &now).is_ok());
    net.pump();
    assert!(!net.client(&peer).loaded_scenes().contains(&lobby));
}

#[test]
fn unknown_scene_name_is_rejected() {
    init_logging();
    let mut net = TestNetwork::new();
    let now = net.now();

    assert_eq!(
        net.server.load_scene("Atlantis", LoadMode::Additive, &now),
        Err(SceneError::InvalidSceneName {
            scene_name: "Atlantis".to_string()
        })
    );
    assert!(net.server.loaded_scenes().is_empty());
}
