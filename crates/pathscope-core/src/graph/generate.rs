//! Random "city" graphs: scattered intersections joined by a spanning tree,
//! short local streets and a handful of long expressways. Every edge weight
//! is the straight-line length of the edge, so the Euclidean heuristic is
//! consistent on generated graphs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Graph, NodeId, Position};
use crate::config::GeneratorConfig;
use crate::error::Result;

/// Build a connected city graph from `config` using `rng`.
#[tracing::instrument(skip(config, rng), fields(nodes = config.nodes))]
pub fn city_graph<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<Graph> {
    config.validate()?;

    let mut graph = Graph::new();
    let span_x = config.width - 2.0 * config.margin;
    let span_y = config.height - 2.0 * config.margin;
    for _ in 0..config.nodes {
        let x = config.margin + rng.gen::<f64>() * span_x;
        let y = config.margin + rng.gen::<f64>() * span_y;
        graph.add_node(Position::new(x, y));
    }

    // Spanning tree: each node joins a random earlier one
    for node in 1..config.nodes {
        let earlier = rng.gen_range(0..node);
        add_straight_edge(&mut graph, node, earlier)?;
    }

    let radius = config.width.min(config.height) * config.street_radius;
    for u in 0..config.nodes {
        for v in (u + 1)..config.nodes {
            if straight_distance(&graph, u, v) < radius
                && rng.gen::<f64>() < config.street_probability
            {
                add_straight_edge(&mut graph, u, v)?;
            }
        }
    }

    if config.nodes > 1 {
        for _ in 0..config.long_edges {
            let u = rng.gen_range(0..config.nodes);
            let v = rng.gen_range(0..config.nodes);
            if u != v {
                add_straight_edge(&mut graph, u, v)?;
            }
        }
    }

    tracing::debug!(edges = graph.edge_count(), "city_graph_generated");
    Ok(graph)
}

/// City graph from a fixed seed, or from OS entropy when `seed` is `None`
pub fn seeded_city_graph(config: &GeneratorConfig, seed: Option<u64>) -> Result<Graph> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    city_graph(config, &mut rng)
}

fn straight_distance(graph: &Graph, u: NodeId, v: NodeId) -> f64 {
    match (graph.position(u), graph.position(v)) {
        (Some(a), Some(b)) => a.distance(&b),
        _ => f64::INFINITY,
    }
}

fn add_straight_edge(graph: &mut Graph, u: NodeId, v: NodeId) -> Result<()> {
    let weight = straight_distance(graph, u, v);
    graph.add_edge(u, v, weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            nodes: 40,
            long_edges: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_city_graph_is_connected() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = city_graph(&small_config(), &mut rng).unwrap();

        assert_eq!(graph.node_count(), 40);
        assert!(graph.edge_count() >= 39);
        assert_eq!(graph.component_count(), 1);
        assert!(graph.is_symmetric());
    }

    #[test]
    fn test_city_graph_weights_are_euclidean() {
        let mut rng = StdRng::seed_from_u64(11);
        let graph = city_graph(&small_config(), &mut rng).unwrap();

        for edge in graph.edges() {
            let a = graph.position(edge.u).unwrap();
            let b = graph.position(edge.v).unwrap();
            assert_eq!(edge.weight, a.distance(&b));
        }
    }

    #[test]
    fn test_city_graph_respects_margins() {
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(3);
        let graph = city_graph(&config, &mut rng).unwrap();

        for node in graph.nodes() {
            assert!(node.position.x >= config.margin);
            assert!(node.position.x <= config.width - config.margin);
            assert!(node.position.y >= config.margin);
            assert!(node.position.y <= config.height - config.margin);
        }
    }

    #[test]
    fn test_city_graph_same_seed_same_graph() {
        let a = city_graph(&small_config(), &mut StdRng::seed_from_u64(42)).unwrap();
        let b = city_graph(&small_config(), &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_city_graph_matches_explicit_rng() {
        let config = small_config();
        let seeded = seeded_city_graph(&config, Some(9)).unwrap();
        let explicit = city_graph(&config, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(seeded, explicit);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig {
            street_probability: 1.5,
            ..Default::default()
        };
        assert!(seeded_city_graph(&config, Some(1)).is_err());
    }

    #[test]
    fn test_single_node_city() {
        let config = GeneratorConfig {
            nodes: 1,
            ..Default::default()
        };
        let graph = city_graph(&config, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }
}
