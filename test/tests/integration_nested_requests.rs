use scenery_server::{
    ErrorEvent, LoadEventCompletedEvent, SceneCommands, SceneError, ServerError,
};
use scenery_shared::{LoadMode, PeerId, SceneEvent};
use scenery_test::{TestNetwork, ARENA, DUNGEON, LOBBY};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn listener_queues_the_next_load() {
    init_logging();
    let mut net = TestNetwork::new();
    net.server.add_scene_listener(
        |peer: &PeerId, event: &SceneEvent, commands: &mut SceneCommands| {
            if let SceneEvent::LoadEventCompleted(completed) = event {
                if peer.is_authority() && completed.scene_name == LOBBY {
                    commands.load_scene(ARENA, LoadMode::Additive);
                }
            }
        },
    );
    let now = net.now();
    net.server.load_scene(LOBBY, LoadMode::Single, &now).unwrap();
    let peer = net.connect(1);
    net.pump();

    // no peers were waiting, so the lobby finished inside load_scene
    assert_eq!(net.server.queued_commands(), 1);
    assert_eq!(net.server.loaded_scenes().len(), 1);

    net.tick();
    assert_eq!(net.server.queued_commands(), 0);
    assert_eq!(net.server.loaded_scenes().len(), 2);
    assert_eq!(net.client(&peer).loaded_scenes().len(), 2);

    let completed: Vec<_> = net
        .server
        .take_events()
        .read::<LoadEventCompletedEvent>()
        .map(|completed| completed.scene_name)
        .collect();
    assert_eq!(completed, vec![LOBBY.to_string(), ARENA.to_string()]);
}

#[test]
fn queued_commands_wait_for_the_event_in_flight() {
    init_logging();
    let mut net = TestNetwork::new();
    let now = net.now();
    net.server.load_scene(LOBBY, LoadMode::Single, &now).unwrap();
    let peer = net.connect(1);
    net.pump();

    net.server.load_scene(ARENA, LoadMode::Additive, &now).unwrap();
    net.server.queue_load_scene(DUNGEON, LoadMode::Additive);

    // the peer has not answered yet
    net.advance(std::time::Duration::from_millis(16));
    assert_eq!(net.server.queued_commands(), 1);
    assert_eq!(net.server.loaded_scenes().len(), 2);

    net.pump();
    net.tick();
    assert_eq!(net.server.queued_commands(), 0);
    assert_eq!(net.server.loaded_scenes().len(), 3);
    assert_eq!(net.client(&peer).loaded_scenes().len(), 3);
}

#[test]
fn failed_queued_command_is_reported() {
    init_logging();
    let mut net = TestNetwork::new();
    net.server.queue_load_scene("Atlantis", LoadMode::Additive);

    net.tick();

    let errors: Vec<_> = net.server.take_events().read::<ErrorEvent>().collect();
    assert_eq!(
        errors,
        vec![ServerError::QueuedCommand(SceneError::InvalidSceneName {
            scene_name: "Atlantis".to_string()
        })]
    );
}
