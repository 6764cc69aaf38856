// Weighted directed graph fixture for traversal algorithms

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: usize,
    pub label: String,
    /// Layout coordinates for renderers (screen space, y grows downward)
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: u64,
}

/// A static graph. Node ids equal their position in `nodes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// The fixed six-node sample used by every traversal
    ///
    /// ```text
    /// A->B 4   A->C 2   B->D 5   C->E 3   D->F 2   E->F 6   B->C 1
    /// ```
    pub fn sample() -> Self {
        let node = |id: usize, label: &str, x: f64, y: f64| Node {
            id,
            label: label.to_string(),
            x,
            y,
        };
        let edge = |from, to, weight| Edge { from, to, weight };

        Graph {
            nodes: vec![
                node(0, "A", 100.0, 200.0),
                node(1, "B", 250.0, 100.0),
                node(2, "C", 250.0, 300.0),
                node(3, "D", 400.0, 100.0),
                node(4, "E", 400.0, 300.0),
                node(5, "F", 550.0, 200.0),
            ],
            edges: vec![
                edge(0, 1, 4),
                edge(0, 2, 2),
                edge(1, 3, 5),
                edge(2, 4, 3),
                edge(3, 5, 2),
                edge(4, 5, 6),
                edge(1, 2, 1),
            ],
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: usize) -> bool {
        id < self.nodes.len()
    }

    /// Label of a node, or `"?"` for ids outside the graph
    pub fn label(&self, id: usize) -> &str {
        self.nodes.get(id).map(|n| n.label.as_str()).unwrap_or("?")
    }

    /// Outgoing edges of `id` in edge-list order
    pub fn outgoing(&self, id: usize) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.from == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape() {
        let graph = Graph::sample();
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edges.len(), 7);
        assert!(graph.nodes.iter().enumerate().all(|(i, n)| n.id == i));
    }

    #[test]
    fn test_outgoing_keeps_edge_list_order() {
        let graph = Graph::sample();
        let from_b: Vec<usize> = graph.outgoing(1).map(|e| e.to).collect();
        assert_eq!(from_b, vec![3, 2]);
        assert_eq!(graph.outgoing(5).count(), 0);
        assert_eq!(graph.label(4), "E");
        assert_eq!(graph.label(42), "?");
    }
}
