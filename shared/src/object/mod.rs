pub mod ddol_migrator;
pub mod deferred_message_queue;
pub mod error;
pub mod object_message;
pub mod object_registry;
pub mod replicated_object;
pub mod scene_waitlist;
