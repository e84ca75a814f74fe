use std::collections::HashMap;

use serde::Deserialize;

use super::relation::CompositionRelation;

/// Static metadata for a radical; coverage of the table is partial.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RadicalMeta {
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub strokes: u32,
}

/// A component character together with every character that uses it directly.
#[derive(Clone, Debug)]
pub struct RadicalInfo {
    pub radical: String,
    pub meaning: String,
    pub strokes: u32,
    pub kanji_usages: Vec<String>,
}

impl RadicalInfo {
    /// Radicals used by at most one character add no exploratory value and
    /// are suppressed at display time. The raw index keeps them.
    pub fn is_displayable(&self) -> bool {
        self.kanji_usages.len() > 1
    }
}

/// Derive the radical index from the `in` direction of the relation.
///
/// Usage ids are unique per radical and entries are visited in sorted id
/// order, so re-running on the same relation yields an identically ordered
/// index. Ordering: usage count descending, then stroke count ascending,
/// then radical id.
pub fn build_radical_index(
    relation: &CompositionRelation,
    meta: &HashMap<String, RadicalMeta>,
) -> Vec<RadicalInfo> {
    let mut index_by_radical: HashMap<&str, usize> = HashMap::new();
    let mut radicals: Vec<RadicalInfo> = Vec::new();

    for id in relation.sorted_ids() {
        for component in relation.components_of(id) {
            let slot = *index_by_radical
                .entry(component.as_str())
                .or_insert_with(|| {
                    let info = meta.get(component);
                    radicals.push(RadicalInfo {
                        radical: component.clone(),
                        meaning: info.map(|m| m.meaning.clone()).unwrap_or_default(),
                        strokes: info.map(|m| m.strokes).unwrap_or(0),
                        kanji_usages: Vec::new(),
                    });
                    radicals.len() - 1
                });

            let usages = &mut radicals[slot].kanji_usages;
            if !usages.contains(id) {
                usages.push(id.clone());
            }
        }
    }

    radicals.sort_by(|a, b| {
        b.kanji_usages
            .len()
            .cmp(&a.kanji_usages.len())
            .then_with(|| a.strokes.cmp(&b.strokes))
            .then_with(|| a.radical.cmp(&b.radical))
    });

    radicals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kanji::CompositionEntry;

    fn relation(pairs: &[(&str, &[&str])]) -> CompositionRelation {
        let mut raw = HashMap::new();
        for (id, components) in pairs {
            raw.insert(
                id.to_string(),
                CompositionEntry {
                    components: components.iter().map(|c| c.to_string()).collect(),
                    used_in: Vec::new(),
                },
            );
        }
        CompositionRelation::from_entries(raw)
    }

    fn meta(entries: &[(&str, &str, u32)]) -> HashMap<String, RadicalMeta> {
        entries
            .iter()
            .map(|(id, meaning, strokes)| {
                (
                    id.to_string(),
                    RadicalMeta {
                        meaning: meaning.to_string(),
                        strokes: *strokes,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn counts_distinct_users_per_radical() {
        let relation = relation(&[("木", &[]), ("林", &["木"]), ("森", &["木"])]);
        let index = build_radical_index(&relation, &meta(&[("木", "tree", 4)]));

        assert_eq!(index.len(), 1);
        assert_eq!(index[0].radical, "木");
        assert_eq!(index[0].kanji_usages, vec!["林".to_string(), "森".to_string()]);
        assert!(index[0].is_displayable());
    }

    #[test]
    fn missing_metadata_degrades_to_blank() {
        let relation = relation(&[("明", &["日", "月"]), ("昌", &["日"])]);
        let index = build_radical_index(&relation, &HashMap::new());

        let sun = index.iter().find(|r| r.radical == "日").unwrap();
        assert_eq!(sun.meaning, "");
        assert_eq!(sun.strokes, 0);
    }

    #[test]
    fn orders_by_usage_then_strokes_then_id() {
        let relation = relation(&[
            ("休", &["人", "木"]),
            ("体", &["人", "木"]),
            ("林", &["木"]),
            ("位", &["人"]),
            ("明", &["日", "月"]),
            ("昭", &["日", "召"]),
        ]);
        let table = meta(&[("人", "person", 2), ("木", "tree", 4), ("日", "sun", 4)]);
        let index = build_radical_index(&relation, &table);

        let order = index.iter().map(|r| r.radical.as_str()).collect::<Vec<_>>();
        // 人 and 木 both have 3 usages; 人 wins on strokes. 日 has 2, the
        // single-use radicals trail, tie-broken by id.
        assert_eq!(order, ["人", "木", "日", "召", "月"]);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let relation = relation(&[
            ("休", &["人", "木"]),
            ("林", &["木"]),
            ("森", &["木"]),
            ("位", &["人"]),
        ]);
        let table = meta(&[("人", "person", 2), ("木", "tree", 4)]);

        let first = build_radical_index(&relation, &table);
        let second = build_radical_index(&relation, &table);

        let ids = |index: &[RadicalInfo]| {
            index
                .iter()
                .map(|r| (r.radical.clone(), r.kanji_usages.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn empty_relation_produces_empty_index() {
        let relation = relation(&[]);
        assert!(build_radical_index(&relation, &HashMap::new()).is_empty());
    }
}
