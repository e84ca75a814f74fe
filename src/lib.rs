//! Kanji composition-graph browser.
//!
//! Takes a raw character-composition relation (which characters are built
//! from which components, and which characters each one composes into) and
//! derives a browsable radical index: usage counts, most-used ordering,
//! search and Jōyō filtering, paginated radical and related-kanji views, and
//! the neighborhood subgraph that feeds a force-graph renderer.
//!
//! The static tables (composition relation, radical metadata, flat kanji
//! lookup list, Jōyō/Jinmeiyō sets) are loaded once per process and treated
//! as read-only for the session; everything else is session-local selection
//! state over them.

pub mod browse;
pub mod kanji;
pub mod prefs;
pub mod util;

pub use browse::{
    BothGraphData, BrowseModel, BrowseSession, EnhancedKanjiInfo, GraphData, PageItem, PageView,
    Pager, PagerError, SearchHit, both_graph_data, detail_route, search_kanji,
};
pub use kanji::{
    CompositionEntry, CompositionRelation, Grade, KanjiData, KanjiInfo, KanjiLookup, RadicalInfo,
    RadicalMeta, build_radical_index, collect_kanji_data, shared_kanji_data,
};
pub use prefs::{GraphPreferences, GraphStyle, load_preferences, save_preferences};
