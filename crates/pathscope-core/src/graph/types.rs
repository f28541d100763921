use serde::{Deserialize, Serialize};

/// Stable index of a node in the graph's node table
pub type NodeId = usize;

/// 2D embedding of a node, used as the A* heuristic input
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Straight-line distance to `other`
    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A node slot. Removed nodes keep their slot so identities never shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    pub removed: bool,
}

/// Undirected weighted edge `{u, v}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub u: NodeId,
    pub v: NodeId,
    pub weight: f64,
}

impl Edge {
    /// True if the edge joins `a` and `b` in either orientation
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.u == a && self.v == b) || (self.u == b && self.v == a)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.u == node || self.v == node
    }
}

/// One directed half of an undirected edge, stored in the adjacency index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjacent {
    pub node: NodeId,
    pub weight: f64,
}

/// Ordered node sequence from source to target with its total cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub nodes: Vec<NodeId>,
    pub distance: f64,
}

impl Route {
    pub fn new(nodes: Vec<NodeId>, distance: f64) -> Self {
        Route { nodes, distance }
    }

    /// Number of edges along the route
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Walk `parent` pointers back from `target` and return the forward path.
pub(crate) fn walk_parents(parent: &[Option<NodeId>], target: NodeId) -> Vec<NodeId> {
    let mut path = vec![target];
    let mut current = target;
    while let Some(prev) = parent[current] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_edge_connects_either_orientation() {
        let edge = Edge {
            u: 1,
            v: 2,
            weight: 1.0,
        };
        assert!(edge.connects(1, 2));
        assert!(edge.connects(2, 1));
        assert!(!edge.connects(1, 3));
        assert!(edge.touches(2));
    }

    #[test]
    fn test_walk_parents() {
        let parent = vec![None, Some(0), Some(1), None];
        assert_eq!(walk_parents(&parent, 2), vec![0, 1, 2]);
        assert_eq!(walk_parents(&parent, 3), vec![3]);
    }

    #[test]
    fn test_route_hops() {
        assert_eq!(Route::new(vec![4], 0.0).hops(), 0);
        assert_eq!(Route::new(vec![0, 1, 2], 2.0).hops(), 2);
    }
}
