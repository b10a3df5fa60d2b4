/// PROPERTY-BASED TESTS: holding area round trips
///
/// Key invariants:
/// 1. Restore puts back the enabled flag recorded at migration
/// 2. Restored objects land in the target scene and leave the holding area
/// 3. Stale ids never abort a batch

use proptest::prelude::*;

use scenery_shared::{DdolMigrator, ObjectId, ObjectRegistry, PrefabHash, ReplicatedObject, SceneHandle};

const SOURCE: SceneHandle = SceneHandle::new(1);
const TARGET: SceneHandle = SceneHandle::new(2);

fn registry_with(flags: &[bool]) -> ObjectRegistry {
    let mut registry = ObjectRegistry::new();
    for (index, active) in flags.iter().enumerate() {
        let object = ReplicatedObject::dynamic(
            ObjectId::new(index as u64 + 1),
            PrefabHash::new(7),
            SOURCE,
        )
        .with_active(*active);
        registry.insert(object).unwrap();
    }
    registry
}

proptest! {
    #[test]
    fn prop_restore_reapplies_recorded_flags(
        flags in prop::collection::vec(any::<bool>(), 1..32),
        flips in prop::collection::vec(any::<bool>(), 32),
    ) {
        let mut registry = registry_with(&flags);
        let mut migrator = DdolMigrator::new();
        let ids: Vec<ObjectId> = (1..=flags.len() as u64).map(ObjectId::new).collect();

        let report = migrator.migrate_to_holding_area(&mut registry, &ids);
        prop_assert_eq!(&report.migrated, &ids);
        prop_assert_eq!(migrator.held_count(), ids.len());

        // scripts toggle held objects
        for (object_id, flip) in ids.iter().zip(flips.iter()) {
            registry.set_active(object_id, *flip).unwrap();
        }

        let restored = migrator.restore_from_holding_area(&mut registry, &TARGET);
        prop_assert_eq!(&restored, &ids);
        prop_assert_eq!(migrator.held_count(), 0);
        for (object_id, active) in ids.iter().zip(flags.iter()) {
            let object = registry.get(object_id).unwrap();
            prop_assert_eq!(object.is_active(), *active);
            prop_assert_eq!(object.scene_handle(), Some(TARGET));
        }
    }

    #[test]
    fn prop_stale_ids_are_skipped(
        flags in prop::collection::vec(any::<bool>(), 1..16),
        stale in prop::collection::vec(100u64..200, 0..8),
    ) {
        let mut registry = registry_with(&flags);
        let mut migrator = DdolMigrator::new();
        let mut ids: Vec<ObjectId> = (1..=flags.len() as u64).map(ObjectId::new).collect();
        ids.extend(stale.iter().copied().map(ObjectId::new));

        let report = migrator.migrate_to_holding_area(&mut registry, &ids);

        prop_assert_eq!(report.migrated.len(), flags.len());
        prop_assert_eq!(report.skipped.len(), stale.len());
        prop_assert!(registry.iter().all(ReplicatedObject::is_held));
    }
}
