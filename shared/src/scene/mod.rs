pub mod error;
pub mod loaded_scenes;
pub mod retired_scenes;
pub mod scene_catalog;
pub mod scene_event;
pub mod scene_event_kind;
pub mod scene_event_pool;
pub mod scene_object;
pub mod scene_object_correlator;
pub mod scene_space;
pub mod scene_world;
