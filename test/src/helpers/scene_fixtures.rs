use scenery_shared::{PrefabHash, SceneCatalog, SceneObjectTemplate, TraversalPath};

use crate::TestWorld;

pub const LOBBY: &str = "Lobby";
pub const ARENA: &str = "Arena";
pub const DUNGEON: &str = "Dungeon";

pub const CRATE_PREFAB: PrefabHash = PrefabHash::new(0x00c0_ffee);
pub const TORCH_PREFAB: PrefabHash = PrefabHash::new(0x0070_4c4e);
pub const PLAYER_PREFAB: PrefabHash = PrefabHash::new(0x00be_ef00);

pub fn scene_catalog() -> SceneCatalog {
    SceneCatalog::new([LOBBY, ARENA, DUNGEON]).unwrap()
}

fn template(prefab_hash: PrefabHash, path: &[u16]) -> SceneObjectTemplate {
    SceneObjectTemplate::new(prefab_hash, TraversalPath::from(path))
}

/// Objects placed in each test scene, identical on every process unless a
/// test says otherwise
pub fn scene_layout(scene_name: &str) -> Vec<SceneObjectTemplate> {
    match scene_name {
        LOBBY => vec![template(CRATE_PREFAB, &[0]), template(CRATE_PREFAB, &[1])],
        ARENA => vec![
            template(CRATE_PREFAB, &[0]),
            template(TORCH_PREFAB, &[1, 0]),
            template(TORCH_PREFAB, &[1, 1]).inactive(),
        ],
        _ => Vec::new(),
    }
}

pub fn test_world() -> TestWorld {
    TestWorld::new()
        .with_scene(LOBBY, scene_layout(LOBBY))
        .with_scene(ARENA, scene_layout(ARENA))
        .with_scene(DUNGEON, scene_layout(DUNGEON))
}
