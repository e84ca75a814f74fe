use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use kanjigraph::browse::{self, BrowseSession, PageItem};
use kanjigraph::prefs::load_preferences;
use kanjigraph::util::{ellipsize, is_compound_id};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory holding the static JSON tables.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Persisted display-preference file for the graph view.
    #[arg(long, default_value = "graph-preferences.json")]
    prefs: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Browse the radical index and the kanji using a selected radical.
    Radicals {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        joyo_only: bool,
        /// Radical to select; prints its related kanji.
        #[arg(long)]
        select: Option<String>,
        #[arg(long, default_value_t = 1)]
        kanji_page: usize,
    },
    /// Show one character's lookup record and composition neighborhood.
    Kanji { id: String },
    /// Ranked free-text search over the lookup table.
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut session = BrowseSession::new(args.data_dir.clone());
    while session.is_loading() {
        session.poll();
        thread::sleep(Duration::from_millis(10));
    }
    if let Some(error) = session.error() {
        return Err(anyhow!("failed to load kanji data: {error}"));
    }
    let Some(model) = session.model_mut() else {
        return Err(anyhow!("kanji data session ended in an unexpected state"));
    };

    match args.command {
        Command::Radicals {
            page,
            search,
            joyo_only,
            select,
            kanji_page,
        } => {
            if let Some(term) = search {
                model.set_search_term(term);
            }
            model.set_joyo_only(joyo_only);
            model.set_radical_page(page);

            let view = model.radical_page_view();
            println!(
                "Radicals (page {}/{}, {} total)",
                view.page, view.page_count, view.total
            );
            for radical in &view.items {
                println!(
                    "  {}  {:<24} strokes {:>2}  kanji {}",
                    radical.radical,
                    ellipsize(&radical.meaning, 24),
                    radical.strokes,
                    radical.kanji_usages.len()
                );
            }
            println!("  {}", render_window(&view.window, view.page));

            if let Some(radical) = select {
                model.select_radical(Some(&radical));
                model.set_kanji_page(kanji_page);

                let Some(selected) = model.selected_radical() else {
                    return Err(anyhow!("{radical} is not a known radical"));
                };
                let title = format!("{} ({})", selected.radical, selected.meaning);

                let view = model.kanji_page_view();
                println!();
                println!(
                    "Kanji with {title} (page {}/{}, {} found)",
                    view.page, view.page_count, view.total
                );
                for entry in &view.items {
                    println!(
                        "  {}  {:<28} {:<12} {:<16} used in {}",
                        entry.info.kanji,
                        ellipsize(&entry.info.meaning, 28),
                        ellipsize(&entry.info.reading, 12),
                        entry.info.grade.label(),
                        entry.usage_count
                    );
                }
                println!("  {}", render_window(&view.window, view.page));
            }
        }
        Command::Kanji { id } => {
            let data = model.data();
            match data.lookup.get(&id) {
                Some(info) => {
                    println!("{}  {}", info.kanji, info.grade.label());
                    println!("  meaning: {}", info.meaning);
                    if !info.reading.is_empty() {
                        println!("  reading: {}", info.reading);
                    }
                    if let Some(rank) = info.frequency {
                        println!("  frequency rank: {rank}");
                    }
                }
                None => println!("{id}  (no lookup record)"),
            }
            if is_compound_id(&id) {
                println!("  compound id");
            }

            let components = data.relation.components_of(&id);
            if !components.is_empty() {
                println!("  components: {}", components.join(" "));
            }
            println!("  used in {} characters", data.relation.usage_count(&id));
            println!("  route: {}", browse::detail_route(&id));

            let prefs = load_preferences(&args.prefs);
            let graph = browse::compose_graph(
                &data.relation,
                &data.joyo,
                &id,
                prefs.out_links,
                prefs.joyo_only,
            );
            println!();
            println!(
                "Composition graph: {} nodes, {} links",
                graph.nodes.len(),
                graph.links.len()
            );
            for link in &graph.links {
                println!("  {} -> {}", link.source, link.target);
            }
        }
        Command::Search { query, limit } => {
            let hits = browse::search_kanji(&model.data().lookup, &query, limit);
            if hits.is_empty() {
                println!("No kanji matched \"{query}\"");
            }
            for hit in hits {
                println!(
                    "  {}  {:<28} {}",
                    hit.info.kanji,
                    ellipsize(&hit.info.meaning, 28),
                    hit.info.grade.label()
                );
            }
        }
    }

    Ok(())
}

fn render_window(window: &[PageItem], current: usize) -> String {
    window
        .iter()
        .map(|item| match item {
            PageItem::Page(page) if *page == current => format!("[{page}]"),
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
