/// PROPERTY-BASED TESTS: deferred object messages
///
/// Whatever arrives while a peer is synchronizing is replayed in arrival
/// order, so the peer ends up with exactly the authority's objects.

use proptest::prelude::*;
use std::collections::BTreeSet;

use scenery_server::SpawnParams;
use scenery_shared::{ChannelKind, DeferredMessageQueue, LoadMode, ObjectId, PeerId};
use scenery_test::{TestNetwork, CRATE_PREFAB, LOBBY};

#[derive(Clone, Debug)]
enum Op {
    Spawn,
    // despawns the n-th live object, modulo the live count
    Despawn(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Spawn),
        1 => (0usize..64).prop_map(Op::Despawn),
    ]
}

proptest! {
    #[test]
    fn prop_flush_preserves_arrival_order(
        messages in prop::collection::vec((1u64..4, any::<u32>()), 0..64)
    ) {
        let mut queue = DeferredMessageQueue::new();
        for (peer, message) in &messages {
            queue.enqueue(&PeerId::new(*peer), *message);
        }

        for peer in 1u64..4 {
            let peer = PeerId::new(peer);
            let expected: Vec<u32> = messages
                .iter()
                .filter(|(sender, _)| PeerId::new(*sender) == peer)
                .map(|(_, message)| *message)
                .collect();
            prop_assert_eq!(queue.pending(&peer), expected.len());
            prop_assert_eq!(queue.flush(&peer), expected.clone());
            prop_assert_eq!(queue.last_deferred_count(&peer), expected.len());
            prop_assert_eq!(queue.pending(&peer), 0);
        }
        prop_assert!(queue.is_empty());
    }

    #[test]
    fn prop_mid_synchronization_traffic_converges(
        ops in prop::collection::vec(op_strategy(), 0..48)
    ) {
        let mut net = TestNetwork::new();
        let now = net.now();
        net.server.load_scene(LOBBY, LoadMode::Single, &now).unwrap();
        let peer = net.connect(1);

        let mut live: Vec<ObjectId> = Vec::new();
        for op in &ops {
            match op {
                Op::Spawn => {
                    live.push(net.server.spawn(SpawnParams::new(CRATE_PREFAB)).unwrap());
                }
                Op::Despawn(n) => {
                    if live.is_empty() {
                        continue;
                    }
                    let object_id = live.remove(n % live.len());
                    net.server.despawn(&object_id).unwrap();
                }
            }
        }

        // object traffic overtakes the synchronize payload
        net.deliver(&PeerId::AUTHORITY, &peer, ChannelKind::Objects);
        prop_assert!(!net.client(&peer).is_synchronized());
        net.pump();

        let server_ids: BTreeSet<ObjectId> = net.server.registry().ids().copied().collect();
        let client_ids: BTreeSet<ObjectId> =
            net.client(&peer).registry().ids().copied().collect();
        prop_assert_eq!(server_ids, client_ids);
        prop_assert_eq!(net.client(&peer).deferred_message_count(), 0);
        prop_assert!(net.server.is_synchronized(&peer));
    }
}
