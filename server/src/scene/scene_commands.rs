use std::collections::VecDeque;

use scenery_shared::{LoadMode, PeerId, SceneEvent, SceneHandle};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneCommand {
    Load {
        scene_name: String,
        load_mode: LoadMode,
    },
    Unload {
        scene_handle: SceneHandle,
    },
}

/// Loads and unloads requested from inside a notification, started one per
/// tick once no scene event is in flight.
#[derive(Debug, Default)]
pub struct SceneCommands {
    queued: VecDeque<SceneCommand>,
}

impl SceneCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_scene(&mut self, scene_name: &str, load_mode: LoadMode) {
        self.queued.push_back(SceneCommand::Load {
            scene_name: scene_name.to_string(),
            load_mode,
        });
    }

    pub fn unload_scene(&mut self, scene_handle: &SceneHandle) {
        self.queued.push_back(SceneCommand::Unload {
            scene_handle: *scene_handle,
        });
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub(crate) fn pop(&mut self) -> Option<SceneCommand> {
        self.queued.pop_front()
    }

    pub(crate) fn clear(&mut self) {
        self.queued.clear();
    }
}

/// Hears every scene notification the authority raises. `peer` is the peer
/// the phase concerns, or the authority for its own phases.
pub trait SceneEventListener {
    fn on_scene_event(&mut self, peer: &PeerId, event: &SceneEvent, commands: &mut SceneCommands);
}

impl<F> SceneEventListener for F
where
    F: FnMut(&PeerId, &SceneEvent, &mut SceneCommands),
{
    fn on_scene_event(&mut self, peer: &PeerId, event: &SceneEvent, commands: &mut SceneCommands) {
        self(peer, event, commands)
    }
}
