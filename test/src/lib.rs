pub mod helpers;
pub mod test_world;

pub use helpers::*;
pub use local_transport::{LocalHub, LocalTransport};
pub use test_world::TestWorld;
