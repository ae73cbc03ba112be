use std::collections::{HashMap, HashSet, VecDeque};

use crate::ir::Graph;

/// Result of longest-path layering. `columns[r]` lists the node ids at
/// rank `r` in the order they became ready for placement.
#[derive(Debug, Clone)]
pub(super) struct Ranking {
    pub ranks: HashMap<String, usize>,
    pub columns: Vec<Vec<String>>,
}

/// Kahn-style longest-path layering. Self-loops carry no ordering
/// constraint; nodes that never become ready (cycle members, targets fed
/// only by unknown sources) fall back to rank 0 instead of erroring, so
/// cyclic or partially malformed input still terminates with a total
/// assignment.
pub(super) fn compute_ranks(graph: &Graph) -> Ranking {
    let known: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();

    let mut indegree: HashMap<&str, usize> = graph
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), 0usize))
        .collect();
    let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &graph.edges {
        if edge.is_self_loop() {
            continue;
        }
        if let Some(count) = indegree.get_mut(edge.target.as_str()) {
            *count += 1;
        }
        if known.contains(edge.source.as_str()) {
            outgoing
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }
    }

    let mut ranks: HashMap<String, usize> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    let mut discovery: Vec<&str> = Vec::new();

    for node in &graph.nodes {
        if indegree[node.id.as_str()] == 0 {
            ranks.insert(node.id.clone(), 0);
            queue.push_back(node.id.as_str());
            discovery.push(node.id.as_str());
        }
    }

    while let Some(current) = queue.pop_front() {
        let rank = ranks.get(current).copied().unwrap_or(0);
        let Some(targets) = outgoing.get(current) else {
            continue;
        };
        for &target in targets {
            if !known.contains(target) {
                continue;
            }
            let proposed = rank + 1;
            let entry = ranks.entry(target.to_string()).or_insert(0);
            if proposed > *entry {
                *entry = proposed;
            }
            let remaining = indegree
                .get_mut(target)
                .map(|count| {
                    *count = count.saturating_sub(1);
                    *count
                })
                .unwrap_or(0);
            if remaining == 0 {
                queue.push_back(target);
                discovery.push(target);
            }
        }
    }

    // Anything never enqueued defaults to rank 0 and lands after the
    // discovered nodes, in input order.
    let discovered: HashSet<&str> = discovery.iter().copied().collect();
    for node in &graph.nodes {
        ranks.entry(node.id.clone()).or_insert(0);
    }

    let max_rank = graph
        .nodes
        .iter()
        .filter_map(|n| ranks.get(n.id.as_str()))
        .copied()
        .max();
    let mut columns: Vec<Vec<String>> = match max_rank {
        Some(max) => vec![Vec::new(); max + 1],
        None => Vec::new(),
    };
    for id in &discovery {
        let rank = ranks.get(*id).copied().unwrap_or(0);
        columns[rank].push((*id).to_string());
    }
    for node in &graph.nodes {
        if !discovered.contains(node.id.as_str()) {
            let rank = ranks.get(node.id.as_str()).copied().unwrap_or(0);
            columns[rank].push(node.id.clone());
        }
    }

    Ranking { ranks, columns }
}
