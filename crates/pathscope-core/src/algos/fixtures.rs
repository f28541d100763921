//! Small graphs shared by algorithm tests.

use crate::graph::{Graph, NodeId, Position};

/// Build a graph with nodes at the given positions and `(u, v, weight)` edges.
pub(crate) fn graph_from(positions: &[(f64, f64)], edges: &[(NodeId, NodeId, f64)]) -> Graph {
    let mut graph = Graph::new();
    for &(x, y) in positions {
        graph.add_node(Position::new(x, y));
    }
    for &(u, v, weight) in edges {
        graph.add_edge(u, v, weight).unwrap();
    }
    graph
}

/// `0-1 (1)`, `1-2 (1)`, `0-2 (5)`; shortest 0→2 is `[0, 1, 2]` at cost 2.
pub(crate) fn triangle() -> Graph {
    graph_from(
        &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)],
        &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 5.0)],
    )
}

/// A=0, B=1, C=2, D=3: two cost-2 routes A→D plus a direct edge of cost 5.
pub(crate) fn diamond() -> Graph {
    graph_from(
        &[(0.0, 0.0), (0.5, 0.5), (0.5, -0.5), (1.0, 0.0)],
        &[(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0), (0, 3, 5.0)],
    )
}

/// A straight street 0-1-2-3-4-5 along the x axis with a side branch
/// 0-6-7-8 heading the other way. Weights equal the Euclidean lengths.
pub(crate) fn line_with_branch() -> Graph {
    graph_from(
        &[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (3.0, 0.0),
            (4.0, 0.0),
            (5.0, 0.0),
            (-1.0, 0.0),
            (-2.0, 0.0),
            (-3.0, 0.0),
        ],
        &[
            (0, 1, 1.0),
            (1, 2, 1.0),
            (2, 3, 1.0),
            (3, 4, 1.0),
            (4, 5, 1.0),
            (0, 6, 1.0),
            (6, 7, 1.0),
            (7, 8, 1.0),
        ],
    )
}

/// Two components: `0-1-2` and `3-4`.
pub(crate) fn two_components() -> Graph {
    graph_from(
        &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (10.0, 0.0), (11.0, 0.0)],
        &[(0, 1, 1.0), (1, 2, 1.0), (3, 4, 1.0)],
    )
}
