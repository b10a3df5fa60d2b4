pub mod scene_fixtures;
pub mod test_network;

pub use scene_fixtures::{
    scene_catalog, scene_layout, test_world, ARENA, CRATE_PREFAB, DUNGEON, LOBBY, PLAYER_PREFAB,
    TORCH_PREFAB,
};
pub use test_network::{TestClient, TestNetwork, TestServer};
