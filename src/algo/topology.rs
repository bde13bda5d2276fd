//! Structural predicates over a graph view

use super::common::GraphView;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// No self-loops and no parallel edges.
///
/// In an undirected graph `a-b` and `b-a` are the same pair; in a directed
/// graph they are distinct.
pub fn is_simple(view: &GraphView) -> bool {
    let mut seen = FxHashSet::default();
    for &(u, v) in &view.endpoints {
        if u == v {
            return false;
        }
        let key = if view.directed || u < v { (u, v) } else { (v, u) };
        if !seen.insert(key) {
            return false;
        }
    }
    true
}

/// Two-colourability of the underlying undirected graph.
pub fn is_bipartite(view: &GraphView) -> bool {
    let mut colour: Vec<Option<bool>> = vec![None; view.node_count];
    let mut queue = VecDeque::new();

    for start in 0..view.node_count {
        if colour[start].is_some() {
            continue;
        }
        colour[start] = Some(false);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            let side = colour[node].unwrap_or(false);
            for next in view.neighbors(node) {
                match colour[next] {
                    None => {
                        colour[next] = Some(!side);
                        queue.push_back(next);
                    }
                    Some(c) if c == side => return false,
                    Some(_) => {}
                }
            }
        }
    }
    true
}

/// Directed acyclic graph check (Kahn's algorithm). Undirected graphs are
/// never DAGs.
pub fn is_dag(view: &GraphView) -> bool {
    if !view.directed {
        return false;
    }

    let mut in_degree: Vec<usize> = (0..view.node_count).map(|i| view.in_degree(i)).collect();
    let mut queue: VecDeque<usize> = (0..view.node_count).filter(|&i| in_degree[i] == 0).collect();
    let mut visited = 0;

    while let Some(node) = queue.pop_front() {
        visited += 1;
        for &next in &view.outgoing[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    visited == view.node_count
}
