mod collect;
mod lookup;
mod radicals;
mod relation;

pub use collect::{KanjiData, collect_kanji_data, shared_kanji_data};
pub use lookup::{Grade, KanjiInfo, KanjiLookup};
pub use radicals::{RadicalInfo, RadicalMeta, build_radical_index};
pub use relation::{CompositionEntry, CompositionRelation};
