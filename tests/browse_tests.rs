// End-to-end tests for the radical browsing flow: index derivation,
// selection, filtering, and pagination over an in-memory data set.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use kanjigraph::{
    BrowseModel, CompositionEntry, CompositionRelation, Grade, KanjiData, KanjiInfo, KanjiLookup,
    RadicalMeta,
};

fn entry(components: &[&str]) -> CompositionEntry {
    CompositionEntry {
        components: components.iter().map(|c| c.to_string()).collect(),
        used_in: Vec::new(),
    }
}

fn record(kanji: &str, grade: u8, meaning: &str, reading: &str, frequency: Option<u32>) -> KanjiInfo {
    KanjiInfo {
        kanji: kanji.to_string(),
        grade: Grade::from_code(grade),
        meaning: meaning.to_string(),
        reading: reading.to_string(),
        frequency,
    }
}

/// Small semantic fixture:
/// 木 is used by 林, 森, 休, 体, and 桂 (which has no lookup record);
/// 人 by 休, 体, and 位; 林 by 梦 and 楚; 金 and 立 are single-use.
fn fixture() -> Arc<KanjiData> {
    let mut raw = HashMap::new();
    raw.insert("木".to_string(), entry(&[]));
    raw.insert("人".to_string(), entry(&[]));
    raw.insert("金".to_string(), entry(&[]));
    raw.insert("立".to_string(), entry(&[]));
    raw.insert("林".to_string(), entry(&["木"]));
    raw.insert("森".to_string(), entry(&["木"]));
    raw.insert("休".to_string(), entry(&["人", "木"]));
    raw.insert("体".to_string(), entry(&["人", "木"]));
    raw.insert("桂".to_string(), entry(&["木"]));
    raw.insert("位".to_string(), entry(&["人", "立"]));
    raw.insert("鑫".to_string(), entry(&["金"]));
    raw.insert("梦".to_string(), entry(&["林"]));
    raw.insert("楚".to_string(), entry(&["林"]));

    let mut radical_meta = HashMap::new();
    radical_meta.insert(
        "木".to_string(),
        RadicalMeta {
            meaning: "tree".to_string(),
            strokes: 4,
        },
    );
    radical_meta.insert(
        "人".to_string(),
        RadicalMeta {
            meaning: "person".to_string(),
            strokes: 2,
        },
    );
    radical_meta.insert(
        "林".to_string(),
        RadicalMeta {
            meaning: "grove".to_string(),
            strokes: 8,
        },
    );

    let lookup = KanjiLookup::new(vec![
        record("林", 1, "grove", "はやし", Some(500)),
        record("森", 1, "forest", "もり", Some(400)),
        record("休", 1, "rest", "やすむ", Some(300)),
        record("体", 1, "body", "からだ", Some(100)),
        record("位", 1, "rank", "くらい", Some(200)),
        record("梦", 0, "dream", "", None),
        record("楚", 0, "thorny", "", None),
        record("鑫", 2, "prosperity", "", None),
    ]);

    let joyo: HashSet<String> = ["林".to_string()].into();

    Arc::new(KanjiData {
        relation: CompositionRelation::from_entries(raw),
        radical_meta,
        lookup,
        joyo,
        jinmeiyo: HashSet::new(),
    })
}

/// Generated fixture with enough radicals and related kanji to need more
/// than one page of each.
fn paged_fixture() -> Arc<KanjiData> {
    let mut raw = HashMap::new();
    let mut records = Vec::new();

    raw.insert("口".to_string(), entry(&[]));
    for i in 0..250 {
        let id = format!("w{i}");
        raw.insert(id.clone(), entry(&["口"]));
        records.push(record(&id, 1, "word", "", Some(i as u32)));
    }

    for i in 0..60 {
        let radical = format!("r{i}");
        raw.insert(radical.clone(), entry(&[]));
        for suffix in ["a", "b"] {
            let user = format!("u{i}{suffix}");
            raw.insert(user.clone(), entry(&[radical.as_str()]));
            records.push(record(&user, 0, "synthetic", "", None));
        }
    }

    Arc::new(KanjiData {
        relation: CompositionRelation::from_entries(raw),
        radical_meta: HashMap::new(),
        lookup: KanjiLookup::new(records),
        joyo: HashSet::new(),
        jinmeiyo: HashSet::new(),
    })
}

#[test]
fn index_counts_match_distinct_users() {
    let model = BrowseModel::new(fixture());

    let tree = model
        .radicals()
        .iter()
        .find(|info| info.radical == "木")
        .unwrap();
    assert_eq!(tree.kanji_usages.len(), 5);

    let person = model
        .radicals()
        .iter()
        .find(|info| info.radical == "人")
        .unwrap();
    assert_eq!(person.kanji_usages.len(), 3);
}

#[test]
fn single_use_radicals_never_display() {
    let mut model = BrowseModel::new(fixture());

    for term in ["", "金", "立", "prosperity"] {
        model.set_search_term(term);
        let shown = model
            .filtered_radicals()
            .iter()
            .map(|info| info.radical.clone())
            .collect::<Vec<_>>();
        assert!(!shown.contains(&"金".to_string()), "term {term:?}");
        assert!(!shown.contains(&"立".to_string()), "term {term:?}");
    }
}

#[test]
fn radicals_order_by_usage_then_strokes() {
    let model = BrowseModel::new(fixture());
    let shown = model
        .filtered_radicals()
        .iter()
        .map(|info| info.radical.clone())
        .collect::<Vec<_>>();
    assert_eq!(shown, ["木", "人", "林"]);
}

#[test]
fn search_matches_meaning_case_insensitively() {
    let mut model = BrowseModel::new(fixture());

    model.set_search_term("GROVE");
    let shown = model
        .filtered_radicals()
        .iter()
        .map(|info| info.radical.clone())
        .collect::<Vec<_>>();
    assert_eq!(shown, ["林"]);

    model.set_search_term("no such meaning");
    assert!(model.filtered_radicals().is_empty());
}

#[test]
fn search_matches_radical_id() {
    let mut model = BrowseModel::new(fixture());
    model.set_search_term("木");
    let shown = model
        .filtered_radicals()
        .iter()
        .map(|info| info.radical.clone())
        .collect::<Vec<_>>();
    assert_eq!(shown, ["木"]);
}

#[test]
fn related_kanji_enriches_and_orders() {
    let mut model = BrowseModel::new(fixture());
    model.select_radical(Some("木"));

    let related = model.related_kanji();
    let ids = related
        .iter()
        .map(|entry| entry.info.kanji.clone())
        .collect::<Vec<_>>();
    // 桂 has no lookup record and is dropped. 林 composes two characters so
    // it leads; the rest tie on usage and fall back to frequency rank.
    assert_eq!(ids, ["林", "体", "休", "森"]);

    let grove = &related[0];
    assert_eq!(grove.usage_count, 2);
    assert_eq!(grove.components, vec!["木".to_string()]);
}

#[test]
fn usage_count_scans_the_whole_relation() {
    let mut model = BrowseModel::new(fixture());
    // 林 is selected, but 木's usage count still reflects every user of 木,
    // not just the selected subgraph.
    model.select_radical(Some("林"));
    assert_eq!(model.data().relation.usage_count("木"), 5);

    let related = model.related_kanji();
    assert!(related.iter().all(|entry| entry.usage_count == 0));
}

#[test]
fn joyo_filter_restricts_related_kanji() {
    let mut model = BrowseModel::new(fixture());
    model.select_radical(Some("木"));
    model.set_joyo_only(true);

    let ids = model
        .related_kanji()
        .iter()
        .map(|entry| entry.info.kanji.clone())
        .collect::<Vec<_>>();
    assert_eq!(ids, ["林"]);
}

#[test]
fn switching_radicals_leaks_nothing() {
    let mut model = BrowseModel::new(fixture());

    model.select_radical(Some("木"));
    let _ = model.related_kanji();

    model.select_radical(Some("人"));
    let ids = model
        .related_kanji()
        .iter()
        .map(|entry| entry.info.kanji.clone())
        .collect::<Vec<_>>();
    assert_eq!(ids, ["体", "位", "休"]);
}

#[test]
fn selecting_a_radical_resets_the_kanji_cursor_only() {
    let mut model = BrowseModel::new(paged_fixture());

    model.set_radical_page(2);
    model.select_radical(Some("口"));
    model.set_kanji_page(3);
    assert_eq!(model.kanji_page_view().page, 3);

    model.select_radical(Some("r0"));
    assert_eq!(model.kanji_page_view().page, 1);
    assert_eq!(model.radical_page_view().page, 2);
}

#[test]
fn filter_changes_reset_the_radical_cursor() {
    let mut model = BrowseModel::new(paged_fixture());

    model.set_radical_page(2);
    model.set_search_term("口");
    assert_eq!(model.radical_page_view().page, 1);

    model.set_radical_page(1);
    model.set_search_term("");
    model.set_radical_page(2);
    model.set_joyo_only(true);
    assert_eq!(model.radical_page_view().page, 1);
}

#[test]
fn kanji_pages_concatenate_to_the_full_related_list() {
    let mut model = BrowseModel::new(paged_fixture());
    model.select_radical(Some("口"));

    let full = model
        .related_kanji()
        .iter()
        .map(|entry| entry.info.kanji.clone())
        .collect::<Vec<_>>();
    assert_eq!(full.len(), 250);

    let mut rebuilt = Vec::new();
    let page_count = model.kanji_page_view().page_count;
    for page in 1..=page_count {
        model.set_kanji_page(page);
        let view = model.kanji_page_view();
        rebuilt.extend(view.items.iter().map(|entry| entry.info.kanji.clone()));
    }
    assert_eq!(rebuilt, full);
}

#[test]
fn unknown_radical_selection_clears() {
    let mut model = BrowseModel::new(fixture());
    model.select_radical(Some("木"));
    model.select_radical(Some("龍"));

    assert!(model.selected_radical().is_none());
    assert!(model.related_kanji().is_empty());
}
