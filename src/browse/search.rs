use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::kanji::{KanjiInfo, KanjiLookup};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

#[derive(Clone, Debug)]
pub struct SearchHit<'a> {
    pub info: &'a KanjiInfo,
    pub score: i64,
}

// An exact hit on the character itself always outranks fuzzy text matches.
const ID_MATCH_SCORE: i64 = i64::MAX / 2;

/// Ranked free-text search over the flat lookup table, matching the
/// character id directly and the meaning/reading fuzzily.
pub fn search_kanji<'a>(lookup: &'a KanjiLookup, query: &str, limit: usize) -> Vec<SearchHit<'a>> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut hits = lookup
        .records()
        .iter()
        .filter_map(|info| {
            let score = if info.kanji.contains(query) {
                Some(ID_MATCH_SCORE)
            } else {
                let meaning = fuzzy_match_score(&matcher, &info.meaning, query);
                let reading = fuzzy_match_score(&matcher, &info.reading, query);
                meaning.max(reading)
            };
            score.map(|score| SearchHit { info, score })
        })
        .collect::<Vec<_>>();

    hits.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.info.kanji.cmp(&b.info.kanji))
    });
    hits.truncate(limit);
    hits
}
