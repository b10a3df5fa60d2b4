use std::collections::{HashMap, VecDeque};

use log::warn;

use crate::{PrefabHash, SceneObjectEntry, SceneObjectTemplate, TraversalPath};

/// Result of matching the authority's scene-object entries against the
/// objects a peer found in its own copy of the scene
#[derive(Debug, Default)]
pub struct SceneObjectCorrelation {
    /// Pairs in the authority's entry order
    pub matched: Vec<(SceneObjectEntry, SceneObjectTemplate)>,
    /// Authority entries with no local counterpart (asset mismatch)
    pub unmatched_entries: Vec<SceneObjectEntry>,
    /// Local scene objects the authority does not know about; they are never
    /// given a network identity
    pub unmatched_templates: Vec<SceneObjectTemplate>,
}

/// Matches on `(PrefabHash, TraversalPath)`. The hash alone is not enough:
/// two isomorphic hierarchies in the same scene share every hash, so the
/// build-time traversal path breaks the tie.
pub fn correlate_scene_objects(
    entries: &[SceneObjectEntry],
    templates: Vec<SceneObjectTemplate>,
) -> SceneObjectCorrelation {
    let mut by_key: HashMap<(PrefabHash, TraversalPath), VecDeque<SceneObjectTemplate>> =
        HashMap::new();
    for template in templates {
        by_key
            .entry((template.prefab_hash, template.path.clone()))
            .or_default()
            .push_back(template);
    }

    let mut correlation = SceneObjectCorrelation::default();

    for entry in entries {
        let key = (entry.prefab_hash, entry.path.clone());
        let found = by_key.get_mut(&key).and_then(VecDeque::pop_front);
        match found {
            Some(template) => correlation.matched.push((entry.clone(), template)),
            None => {
                warn!(
                    "Scene object {} (prefab {:#010x} at {}) has no local counterpart",
                    entry.object_id,
                    entry.prefab_hash.to_u32(),
                    entry.path
                );
                correlation.unmatched_entries.push(entry.clone());
            }
        }
    }

    let mut leftovers: Vec<SceneObjectTemplate> = by_key.into_values().flatten().collect();
    leftovers.sort_by(|a, b| a.path.cmp(&b.path));
    correlation.unmatched_templates = leftovers;

    correlation
}
