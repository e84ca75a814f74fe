use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use super::lookup::{KanjiInfo, KanjiLookup};
use super::radicals::RadicalMeta;
use super::relation::{CompositionEntry, CompositionRelation};

/// All static tables for a session, loaded once and read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct KanjiData {
    pub relation: CompositionRelation,
    pub radical_meta: HashMap<String, RadicalMeta>,
    pub lookup: KanjiLookup,
    pub joyo: HashSet<String>,
    pub jinmeiyo: HashSet<String>,
}

impl KanjiData {
    pub fn is_joyo(&self, id: &str) -> bool {
        self.joyo.contains(id)
    }

    pub fn is_jinmeiyo(&self, id: &str) -> bool {
        self.jinmeiyo.contains(id)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Load every static table from `data_dir`:
/// `composition.json`, `radicals.json`, `searchlist.json`, `joyo.json`,
/// `jinmeiyo.json`.
pub fn collect_kanji_data(data_dir: &Path) -> Result<KanjiData> {
    let raw_relation: HashMap<String, CompositionEntry> =
        read_json(&data_dir.join("composition.json"))
            .context("failed to load composition relation")?;
    let relation = CompositionRelation::from_entries(raw_relation);

    let radical_meta: HashMap<String, RadicalMeta> =
        read_json(&data_dir.join("radicals.json")).context("failed to load radical metadata")?;

    let records: Vec<KanjiInfo> =
        read_json(&data_dir.join("searchlist.json")).context("failed to load kanji lookup table")?;
    let lookup = KanjiLookup::new(records);

    let joyo: HashSet<String> =
        read_json(&data_dir.join("joyo.json")).context("failed to load Jōyō reference set")?;
    let jinmeiyo: HashSet<String> = read_json(&data_dir.join("jinmeiyo.json"))
        .context("failed to load Jinmeiyō reference set")?;

    info!(
        characters = relation.node_count(),
        edges = relation.edge_count(),
        lookup_records = lookup.len(),
        joyo = joyo.len(),
        jinmeiyo = jinmeiyo.len(),
        "loaded kanji data set"
    );

    Ok(KanjiData {
        relation,
        radical_meta,
        lookup,
        joyo,
        jinmeiyo,
    })
}

static SHARED_DATA: OnceLock<Arc<KanjiData>> = OnceLock::new();

/// Process-wide lazily-initialized copy of the static tables. The first
/// successful load wins; later calls return the cached tables regardless of
/// the directory argument.
pub fn shared_kanji_data(data_dir: &Path) -> Result<Arc<KanjiData>> {
    if let Some(data) = SHARED_DATA.get() {
        return Ok(Arc::clone(data));
    }

    let data = Arc::new(collect_kanji_data(data_dir)?);
    Ok(Arc::clone(SHARED_DATA.get_or_init(|| data)))
}
