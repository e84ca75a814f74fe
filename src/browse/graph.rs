use std::collections::{HashSet, VecDeque};

use crate::kanji::CompositionRelation;

const GRAPH_NODE_LIMIT: usize = 280;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub is_root: bool,
}

/// A directed composition edge: `source` is a component of `target`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug, Default)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// The two variants the force-graph view toggles between.
#[derive(Clone, Debug)]
pub struct BothGraphData {
    pub with_out_links: GraphData,
    pub no_out_links: GraphData,
}

/// Build the composition neighborhood of `root`: its full decomposition
/// (every in-edge reachable from the root) and, when `out_links` is set, the
/// characters the root directly composes into. `joyo_only` restricts the
/// out-neighbors to the Jōyō set; the decomposition side is always kept so a
/// character's structure stays visible under the filter.
pub fn compose_graph(
    relation: &CompositionRelation,
    joyo: &HashSet<String>,
    root: &str,
    out_links: bool,
    joyo_only: bool,
) -> GraphData {
    let mut node_ids = Vec::new();
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let mut queue = VecDeque::from([root.to_string()]);
    seen.insert(root.to_string());
    node_ids.push(root.to_string());

    while let Some(id) = queue.pop_front() {
        if node_ids.len() >= GRAPH_NODE_LIMIT {
            break;
        }

        for component in relation.components_of(&id) {
            links.push(GraphLink {
                source: component.clone(),
                target: id.clone(),
            });
            if seen.insert(component.clone()) {
                node_ids.push(component.clone());
                queue.push_back(component.clone());
            }
        }
    }

    if out_links
        && let Some(entry) = relation.get(root)
    {
        for user in &entry.used_in {
            if joyo_only && !joyo.contains(user) {
                continue;
            }
            links.push(GraphLink {
                source: root.to_string(),
                target: user.clone(),
            });
            if seen.insert(user.clone()) {
                node_ids.push(user.clone());
            }
        }
    }

    links.sort_by(|a, b| a.source.cmp(&b.source).then_with(|| a.target.cmp(&b.target)));
    links.dedup();

    GraphData {
        nodes: node_ids
            .into_iter()
            .map(|id| GraphNode {
                is_root: id == root,
                id,
            })
            .collect(),
        links,
    }
}

pub fn both_graph_data(
    relation: &CompositionRelation,
    joyo: &HashSet<String>,
    root: &str,
    joyo_only: bool,
) -> BothGraphData {
    BothGraphData {
        with_out_links: compose_graph(relation, joyo, root, true, joyo_only),
        no_out_links: compose_graph(relation, joyo, root, false, joyo_only),
    }
}
