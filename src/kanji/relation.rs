use std::collections::HashMap;

use serde::Deserialize;

/// One character's decomposition: the components it is built from ("in")
/// and the characters it directly composes into ("out").
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CompositionEntry {
    #[serde(default, rename = "in")]
    pub components: Vec<String>,
    #[serde(default, rename = "out")]
    pub used_in: Vec<String>,
}

/// The full character-composition relation, indexed by character id.
///
/// The `used_in` direction is always rebuilt from `components` on ingest, so
/// the two directions agree even when the input data does not.
#[derive(Clone, Debug, Default)]
pub struct CompositionRelation {
    entries: HashMap<String, CompositionEntry>,
    edge_count: usize,
}

impl CompositionRelation {
    pub fn from_entries(raw: HashMap<String, CompositionEntry>) -> Self {
        let mut entries = HashMap::with_capacity(raw.len());

        for (id, raw_entry) in raw {
            if id.is_empty() {
                continue;
            }

            let mut components = Vec::with_capacity(raw_entry.components.len());
            for component in raw_entry.components {
                if component.is_empty() || component == id {
                    continue;
                }
                if !components.contains(&component) {
                    components.push(component);
                }
            }

            entries.insert(
                id,
                CompositionEntry {
                    components,
                    used_in: Vec::new(),
                },
            );
        }

        let mut reverse: HashMap<String, Vec<String>> = HashMap::new();
        let mut edge_count = 0usize;

        for (id, entry) in &entries {
            edge_count += entry.components.len();
            for component in &entry.components {
                reverse.entry(component.clone()).or_default().push(id.clone());
            }
        }

        for (id, entry) in &mut entries {
            if let Some(mut used_in) = reverse.remove(id) {
                used_in.sort();
                used_in.dedup();
                entry.used_in = used_in;
            }
        }

        Self { entries, edge_count }
    }

    pub fn get(&self, id: &str) -> Option<&CompositionEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Direct components of `id`, empty for atomic or unknown characters.
    pub fn components_of(&self, id: &str) -> &[String] {
        self.entries
            .get(id)
            .map(|entry| entry.components.as_slice())
            .unwrap_or(&[])
    }

    /// How many entries across the whole relation list `id` as a direct
    /// component. A full scan of the `in` direction, not scoped to any
    /// selected subgraph.
    pub fn usage_count(&self, id: &str) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.components.iter().any(|component| component == id))
            .count()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &CompositionEntry)> {
        self.entries.iter()
    }

    /// Character ids in sorted order, for deterministic traversal.
    pub fn sorted_ids(&self) -> Vec<&String> {
        let mut ids = self.entries.keys().collect::<Vec<_>>();
        ids.sort();
        ids
    }

    pub fn node_count(&self) -> usize {
        self.entries.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
