use crate::PeerId;

/// The logical channels scene replication uses. Each is reliable and ordered
/// on its own; nothing orders one channel relative to the other, which is
/// why object messages can overtake the scene events they depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Scene load/unload/synchronize records and their acknowledgements
    SceneEvents,
    /// Object creation and destroy messages
    Objects,
}

/// Outbound half of the transport collaborator. Inbound traffic is handed to
/// `Server::receive` / `Client::receive` by whoever owns the socket.
pub trait Transport {
    fn send(&mut self, peer: &PeerId, channel: ChannelKind, payload: Box<[u8]>);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, peer: &PeerId, channel: ChannelKind, payload: Box<[u8]>) {
        (**self).send(peer, channel, payload);
    }
}
