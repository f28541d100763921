//! Human-readable rendering of trace events

use std::fmt::Write;

use pathscope_core::algos::{FrontierEntry, Side, Snapshot};
use pathscope_core::graph::{NodeId, Route};
use pathscope_core::{Event, Outcome};

/// One line describing `event`
pub fn event_line(event: &Event) -> String {
    match event {
        Event::Visit {
            node,
            side,
            snapshot,
        } => {
            let mut line = format!("visit {node}{}", side_tag(*side));
            if let Some(frontier) = frontier_summary(snapshot) {
                let _ = write!(line, "  {frontier}");
            }
            line
        }
        Event::Relax { from, to, side, .. } => format!("relax {from} -> {to}{}", side_tag(*side)),
        Event::Discover { from, to, .. } => format!("discover {from} -> {to}"),
        Event::Exit { node, .. } => format!("exit {node}"),
        Event::MstAdd { u, v, weight } => format!("mst add {u}-{v} ({weight:.2})"),
        Event::MstSkip { u, v, weight } => format!("mst skip {u}-{v} ({weight:.2})"),
        Event::PathFound { rank, route } => format!("path #{rank}: {}", route_text(route)),
        Event::Subsearch { message, event } => format!("[{message}] {}", event_line(event)),
        Event::Done { outcome } => format!("done: {}", outcome_text(outcome)),
    }
}

fn side_tag(side: Option<Side>) -> &'static str {
    match side {
        Some(Side::Forward) => " (forward)",
        Some(Side::Backward) => " (backward)",
        None => "",
    }
}

fn entries_text(entries: &[FrontierEntry]) -> String {
    let parts: Vec<String> = entries
        .iter()
        .map(|entry| format!("{}:{:.2}", entry.node, entry.key))
        .collect();
    format!("[{}]", parts.join(" "))
}

fn frontier_summary(snapshot: &Snapshot) -> Option<String> {
    match snapshot {
        Snapshot::Frontier { top } => Some(format!("frontier {}", entries_text(top))),
        Snapshot::Bidirectional { forward, backward } => Some(format!(
            "forward {} backward {}",
            entries_text(forward),
            entries_text(backward)
        )),
        _ => None,
    }
}

fn path_text(nodes: &[NodeId]) -> String {
    nodes
        .iter()
        .map(NodeId::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub fn route_text(route: &Route) -> String {
    format!("{} (cost {:.2})", path_text(&route.nodes), route.distance)
}

pub fn outcome_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Found { route } => format!("path {}", route_text(route)),
        Outcome::NoPath => "no path".to_string(),
        Outcome::Distances { distances } => {
            let reached = distances.iter().filter(|d| d.is_some()).count();
            format!("reached {reached} of {} nodes", distances.len())
        }
        Outcome::Levels { levels } => {
            let deepest = levels.iter().flatten().max().copied().unwrap_or(0);
            let levelled = levels.iter().flatten().count();
            format!("{levelled} nodes levelled, deepest level {deepest}")
        }
        Outcome::Timestamps { entry, .. } => {
            format!("{} nodes timestamped", entry.iter().flatten().count())
        }
        Outcome::SpanningTree {
            edges,
            total_weight,
        } => format!(
            "spanning forest with {} edges, total weight {total_weight:.2}",
            edges.len()
        ),
        Outcome::Ranked { count, .. } => format!("found {count} paths"),
    }
}
