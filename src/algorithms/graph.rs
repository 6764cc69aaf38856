//! Instrumented traversals over the static graph fixture
//!
//! The graph itself is shared by every step; only highlights (and, for
//! shortest path, the tentative distances) vary. Neighbors are always
//! scanned in edge-list order.

use super::{AlgorithmInfo, Category, Complexity, Generator};
use crate::input::graph::Graph;
use crate::trace::{Highlights, Recorder};
use std::collections::VecDeque;
use std::sync::Arc;

pub(super) fn entries() -> Vec<AlgorithmInfo> {
    vec![
        AlgorithmInfo {
            id: "bfs",
            name: "Breadth-First Search",
            category: Category::Graph,
            complexity: Complexity::new("O(V+E)", "O(V+E)", "O(V+E)", "O(V)"),
            description: "Visits nodes level by level from the start node using a FIFO queue.",
            code: BFS_CODE,
            generator: Generator::Graph(breadth_first),
        },
        AlgorithmInfo {
            id: "dfs",
            name: "Depth-First Search",
            category: Category::Graph,
            complexity: Complexity::new("O(V+E)", "O(V+E)", "O(V+E)", "O(V)"),
            description: "Follows each branch as deep as possible before backtracking.",
            code: DFS_CODE,
            generator: Generator::Graph(depth_first),
        },
        AlgorithmInfo {
            id: "dijkstra",
            name: "Dijkstra's Algorithm",
            category: Category::Graph,
            complexity: Complexity::new(
                "O((V+E) log V)",
                "O((V+E) log V)",
                "O((V+E) log V)",
                "O(V)",
            ),
            description: "Settles nodes in order of shortest known distance from the start, \
                          relaxing the outgoing edges of each settled node.",
            code: DIJKSTRA_CODE,
            generator: Generator::Graph(shortest_path),
        },
    ]
}

fn graph_highlights(visited: &[usize], path: &[usize], current: Option<usize>) -> Highlights {
    Highlights {
        visited: visited.to_vec(),
        path: path.to_vec(),
        current,
        ..Highlights::default()
    }
}

fn labels(graph: &Graph, ids: impl IntoIterator<Item = usize>) -> String {
    ids.into_iter()
        .map(|id| graph.label(id))
        .collect::<Vec<_>>()
        .join(", ")
}

const BFS_CODE: &str = "\
fn bfs(graph: &Graph, start: usize) -> Vec<usize> {
    let mut visited = Vec::new();
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        if visited.contains(&node) {
            continue;
        }
        visited.push(node);
        for edge in graph.outgoing(node) {
            if !visited.contains(&edge.to) && !queue.contains(&edge.to) {
                queue.push_back(edge.to);
            }
        }
    }
    visited
}";

pub fn breadth_first(graph: &Arc<Graph>, start: usize, rec: &mut Recorder) {
    let mut visited = Vec::with_capacity(graph.node_count());
    let mut queue = VecDeque::new();
    if graph.contains(start) {
        queue.push_back(start);
    }

    while let Some(node) = queue.pop_front() {
        rec.access(1);
        if visited.contains(&node) {
            continue;
        }

        visited.push(node);
        rec.record_graph(
            graph,
            None,
            graph_highlights(&visited, &[], Some(node)),
            format!("Visiting node {}", graph.label(node)),
            Some(8),
        );

        for edge in graph.outgoing(node) {
            rec.compare();
            if !visited.contains(&edge.to) && !queue.contains(&edge.to) {
                queue.push_back(edge.to);
                rec.access(1);
                rec.record_graph(
                    graph,
                    None,
                    graph_highlights(&visited, &[], Some(node)),
                    format!(
                        "Adding node {} to the queue [{}]",
                        graph.label(edge.to),
                        labels(graph, queue.iter().copied())
                    ),
                    Some(11),
                );
            }
        }
    }

    rec.record_graph(
        graph,
        None,
        graph_highlights(&visited, &[], None),
        "BFS traversal complete",
        None,
    );
}

const DFS_CODE: &str = "\
fn dfs(graph: &Graph, node: usize, visited: &mut Vec<usize>) {
    visited.push(node);
    for edge in graph.outgoing(node) {
        if !visited.contains(&edge.to) {
            dfs(graph, edge.to, visited);
        }
    }
}";

pub fn depth_first(graph: &Arc<Graph>, start: usize, rec: &mut Recorder) {
    let adjacency: Vec<Vec<usize>> = (0..graph.node_count())
        .map(|node| graph.outgoing(node).map(|e| e.to).collect())
        .collect();
    let mut visited = Vec::with_capacity(graph.node_count());

    // (node, index of the next outgoing edge to try), deepest call on top
    let mut stack: Vec<(usize, usize)> = Vec::new();

    if graph.contains(start) {
        visited.push(start);
        rec.access(1);
        rec.record_graph(
            graph,
            None,
            graph_highlights(&visited, &[start], Some(start)),
            format!("Visiting node {}", graph.label(start)),
            Some(2),
        );
        stack.push((start, 0));
    }

    while let Some(frame) = stack.last_mut() {
        let node = frame.0;
        let Some(&next) = adjacency[node].get(frame.1) else {
            stack.pop();
            continue;
        };
        frame.1 += 1;

        rec.compare();
        if visited.contains(&next) {
            continue;
        }

        visited.push(next);
        rec.access(1);
        stack.push((next, 0));
        let path: Vec<usize> = stack.iter().map(|&(n, _)| n).collect();
        rec.record_graph(
            graph,
            None,
            graph_highlights(&visited, &path, Some(next)),
            format!(
                "Visiting node {} via {}",
                graph.label(next),
                graph.label(node)
            ),
            Some(2),
        );
    }

    rec.record_graph(
        graph,
        None,
        graph_highlights(&visited, &[], None),
        "DFS traversal complete",
        None,
    );
}

const DIJKSTRA_CODE: &str = "\
fn dijkstra(graph: &Graph, start: usize) -> Vec<u64> {
    let mut dist = vec![u64::MAX; graph.node_count()];
    let mut visited = vec![false; graph.node_count()];
    dist[start] = 0;
    while let Some(u) = (0..dist.len())
        .filter(|&v| !visited[v] && dist[v] != u64::MAX)
        .min_by_key(|&v| dist[v])
    {
        visited[u] = true;
        for edge in graph.outgoing(u) {
            let candidate = dist[u] + edge.weight;
            if candidate < dist[edge.to] {
                dist[edge.to] = candidate;
            }
        }
    }
    dist
}";

pub fn shortest_path(graph: &Arc<Graph>, start: usize, rec: &mut Recorder) {
    let n = graph.node_count();
    let mut distances: Vec<Option<u64>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut visited = Vec::with_capacity(n);

    if graph.contains(start) {
        distances[start] = Some(0);
    }

    loop {
        // First unsettled node with the smallest tentative distance
        let mut closest: Option<(usize, u64)> = None;
        for node in 0..n {
            rec.compare();
            rec.access(1);
            if settled[node] {
                continue;
            }
            if let Some(d) = distances[node] {
                if closest.map_or(true, |(_, best)| d < best) {
                    closest = Some((node, d));
                }
            }
        }

        let Some((u, du)) = closest else {
            break;
        };

        settled[u] = true;
        visited.push(u);
        rec.record_graph(
            graph,
            Some(distances.as_slice()),
            graph_highlights(&visited, &visited, Some(u)),
            format!("Visiting node {} (distance: {})", graph.label(u), du),
            Some(9),
        );

        for edge in graph.outgoing(u) {
            rec.compare();
            rec.access(2);
            let candidate = du + edge.weight;
            if distances[edge.to].map_or(true, |d| candidate < d) {
                distances[edge.to] = Some(candidate);
                rec.record_graph(
                    graph,
                    Some(distances.as_slice()),
                    Highlights {
                        comparing: vec![u, edge.to],
                        ..graph_highlights(&visited, &visited, Some(u))
                    },
                    format!(
                        "Updated distance to {}: {}",
                        graph.label(edge.to),
                        candidate
                    ),
                    Some(13),
                );
            }
        }
    }

    rec.record_graph(
        graph,
        Some(distances.as_slice()),
        graph_highlights(&visited, &visited, None),
        "Shortest path algorithm complete",
        None,
    );
}
