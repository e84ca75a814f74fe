use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, warn};

use crate::kanji::{KanjiData, KanjiInfo, RadicalInfo, build_radical_index, shared_kanji_data};

mod graph;
mod pager;
mod search;

pub use graph::{BothGraphData, GraphData, GraphLink, GraphNode, both_graph_data, compose_graph};
pub use pager::{PageItem, Pager, PagerError};
pub use search::{SearchHit, search_kanji};

pub const RADICALS_PER_PAGE: usize = 48;
pub const RADICAL_PAGE_WINDOW: usize = 5;
pub const KANJI_PER_PAGE: usize = 100;
pub const KANJI_PAGE_WINDOW: usize = 7;

/// Route of a character's detail view. The navigation itself is owned by the
/// surrounding shell; this layer only produces the target.
pub fn detail_route(id: &str) -> String {
    format!("/{id}")
}

/// A lookup record enriched with composition data for the related-kanji list.
#[derive(Clone, Debug)]
pub struct EnhancedKanjiInfo {
    pub info: KanjiInfo,
    /// The character's own direct components.
    pub components: Vec<String>,
    /// How many characters across the whole relation this one helps compose.
    pub usage_count: usize,
}

/// One rendered page of an ordered sequence plus its page-number controls.
#[derive(Clone, Debug)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
    pub window: Vec<PageItem>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct RelatedCacheKey {
    radical: String,
    joyo_only: bool,
}

struct RelatedKanjiCache {
    key: RelatedCacheKey,
    entries: Vec<EnhancedKanjiInfo>,
}

/// Session-local selection, filter, and pagination state over the loaded
/// tables. Every mutation synchronously invalidates the derived views, so a
/// reader never observes a cursor pointing past a shrunken list.
pub struct BrowseModel {
    data: Arc<KanjiData>,
    radicals: Vec<RadicalInfo>,
    selected_radical: Option<String>,
    joyo_only: bool,
    search_term: String,
    radical_page: usize,
    kanji_page: usize,
    radical_pager: Pager,
    kanji_pager: Pager,
    related_cache: Option<RelatedKanjiCache>,
}

impl BrowseModel {
    pub fn new(data: Arc<KanjiData>) -> Self {
        let radicals = build_radical_index(&data.relation, &data.radical_meta);
        Self {
            data,
            radicals,
            selected_radical: None,
            joyo_only: false,
            search_term: String::new(),
            radical_page: 1,
            kanji_page: 1,
            radical_pager: Pager::new(RADICALS_PER_PAGE, RADICAL_PAGE_WINDOW)
                .expect("radical page sizes are nonzero"),
            kanji_pager: Pager::new(KANJI_PER_PAGE, KANJI_PAGE_WINDOW)
                .expect("kanji page sizes are nonzero"),
            related_cache: None,
        }
    }

    pub fn data(&self) -> &KanjiData {
        &self.data
    }

    /// The full radical index, singletons included.
    pub fn radicals(&self) -> &[RadicalInfo] {
        &self.radicals
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn joyo_only(&self) -> bool {
        self.joyo_only
    }

    pub fn selected_radical(&self) -> Option<&RadicalInfo> {
        let selected = self.selected_radical.as_deref()?;
        self.radicals.iter().find(|info| info.radical == selected)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.search_term {
            return;
        }
        self.search_term = term;
        self.radical_page = 1;
    }

    pub fn set_joyo_only(&mut self, joyo_only: bool) {
        if joyo_only == self.joyo_only {
            return;
        }
        self.joyo_only = joyo_only;
        self.radical_page = 1;
    }

    /// Select a radical by id, or clear the selection with `None`. A fresh
    /// selection rewinds the related-kanji cursor; the radical-list cursor is
    /// deliberately left alone.
    pub fn select_radical(&mut self, id: Option<&str>) {
        let next = match id {
            Some(id) if self.radicals.iter().any(|info| info.radical == id) => {
                Some(id.to_string())
            }
            Some(id) => {
                warn!(radical = id, "ignoring selection of unknown radical");
                None
            }
            None => None,
        };

        if next != self.selected_radical {
            self.selected_radical = next;
            self.kanji_page = 1;
        }
    }

    pub fn set_radical_page(&mut self, page: usize) {
        let len = self.filtered_radicals().len();
        self.radical_page = self.radical_pager.clamp_page(page, len);
    }

    pub fn set_kanji_page(&mut self, page: usize) {
        let len = self.related_kanji().len();
        self.kanji_page = self.kanji_pager.clamp_page(page, len);
    }

    /// Radicals that pass the display predicate (used by more than one
    /// character) and the current search term. The term matches the radical
    /// id as-is, or the meaning case-insensitively; absent meanings behave as
    /// empty strings.
    pub fn filtered_radicals(&self) -> Vec<&RadicalInfo> {
        let term_lower = self.search_term.to_lowercase();
        self.radicals
            .iter()
            .filter(|info| info.is_displayable())
            .filter(|info| {
                self.search_term.is_empty()
                    || info.radical.contains(&self.search_term)
                    || info.meaning.to_lowercase().contains(&term_lower)
            })
            .collect()
    }

    /// Enriched lookup records for every character using the selected
    /// radical, or empty when nothing is selected. Recomputed whenever the
    /// selection or the Jōyō filter changed since the last call.
    pub fn related_kanji(&mut self) -> &[EnhancedKanjiInfo] {
        let Some(selected) = self.selected_radical.clone() else {
            return &[];
        };

        let key = RelatedCacheKey {
            radical: selected,
            joyo_only: self.joyo_only,
        };
        let stale = self
            .related_cache
            .as_ref()
            .is_none_or(|cache| cache.key != key);
        if stale {
            let entries = self.compute_related(&key.radical);
            self.related_cache = Some(RelatedKanjiCache { key, entries });
        }

        self.related_cache
            .as_ref()
            .map(|cache| cache.entries.as_slice())
            .unwrap_or(&[])
    }

    fn compute_related(&self, radical_id: &str) -> Vec<EnhancedKanjiInfo> {
        let Some(radical) = self
            .radicals
            .iter()
            .find(|info| info.radical == radical_id)
        else {
            return Vec::new();
        };

        let mut entries = Vec::with_capacity(radical.kanji_usages.len());
        for id in &radical.kanji_usages {
            let Some(info) = self.data.lookup.get(id) else {
                // Expected for rare, foreign, and compound entries.
                debug!(kanji = id.as_str(), "no lookup record, dropping from related list");
                continue;
            };

            if self.joyo_only && !self.data.is_joyo(id) {
                continue;
            }

            entries.push(EnhancedKanjiInfo {
                info: info.clone(),
                components: self.data.relation.components_of(id).to_vec(),
                usage_count: self.data.relation.usage_count(id),
            });
        }

        entries.sort_by(|a, b| {
            b.usage_count.cmp(&a.usage_count).then_with(|| {
                match (a.info.frequency, b.info.frequency) {
                    (Some(a_rank), Some(b_rank)) => a_rank.cmp(&b_rank),
                    _ => a.info.kanji.cmp(&b.info.kanji),
                }
            })
        });

        entries
    }

    pub fn radical_page_view(&self) -> PageView<RadicalInfo> {
        let filtered = self.filtered_radicals();
        let page = self.radical_pager.clamp_page(self.radical_page, filtered.len());
        PageView {
            items: self
                .radical_pager
                .slice(&filtered, page)
                .iter()
                .map(|info| (*info).clone())
                .collect(),
            page,
            page_count: self.radical_pager.page_count(filtered.len()),
            total: filtered.len(),
            window: self.radical_pager.window(page, filtered.len()),
        }
    }

    pub fn kanji_page_view(&mut self) -> PageView<EnhancedKanjiInfo> {
        let pager = self.kanji_pager;
        let page = self.kanji_page;
        let related = self.related_kanji();
        let page = pager.clamp_page(page, related.len());
        PageView {
            items: pager.slice(related, page).to_vec(),
            page,
            page_count: pager.page_count(related.len()),
            total: related.len(),
            window: pager.window(page, related.len()),
        }
    }
}

/// Load lifecycle wrapper around [`BrowseModel`]: the tables load on a
/// background thread while the session reports `Loading`, then flip to
/// `Ready` or `Error` on a later [`poll`](BrowseSession::poll). Dropping the
/// session mid-load makes the worker's eventual send a no-op.
pub struct BrowseSession {
    data_dir: PathBuf,
    state: SessionState,
}

enum SessionState {
    Loading {
        rx: Receiver<Result<Arc<KanjiData>, String>>,
    },
    Ready(Box<BrowseModel>),
    Error(String),
}

impl BrowseSession {
    pub fn new(data_dir: PathBuf) -> Self {
        let rx = Self::spawn_load(data_dir.clone());
        Self {
            data_dir,
            state: SessionState::Loading { rx },
        }
    }

    fn spawn_load(data_dir: PathBuf) -> Receiver<Result<Arc<KanjiData>, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = shared_kanji_data(&data_dir).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    /// Drain the load channel without blocking. Must be called until the
    /// session leaves the loading state; no derivation runs on partial data.
    pub fn poll(&mut self) {
        let SessionState::Loading { rx } = &self.state else {
            return;
        };

        let transition = match rx.try_recv() {
            Ok(Ok(data)) => Some(SessionState::Ready(Box::new(BrowseModel::new(data)))),
            Ok(Err(error)) => Some(SessionState::Error(error)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(SessionState::Error("load worker disconnected".to_owned()))
            }
        };

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }

    /// Restart the load after a failure.
    pub fn retry(&mut self) {
        if matches!(self.state, SessionState::Error(_)) {
            self.state = SessionState::Loading {
                rx: Self::spawn_load(self.data_dir.clone()),
            };
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Error(error) => Some(error),
            _ => None,
        }
    }

    pub fn model(&self) -> Option<&BrowseModel> {
        match &self.state {
            SessionState::Ready(model) => Some(model),
            _ => None,
        }
    }

    pub fn model_mut(&mut self) -> Option<&mut BrowseModel> {
        match &mut self.state {
            SessionState::Ready(model) => Some(model),
            _ => None,
        }
    }
}
