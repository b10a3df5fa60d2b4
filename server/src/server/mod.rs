mod server;
pub use server::{EventStarted, Server};

mod server_config;
pub use server_config::ServerConfig;

mod spawn_params;
pub use spawn_params::SpawnParams;
