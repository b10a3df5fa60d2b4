pub mod scene_commands;
pub(crate) mod scene_event_progress;
pub mod synchronization_session;
