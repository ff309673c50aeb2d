use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::State;
use crate::routing::graph::TransitGraph;
use crate::routing::index::{PathEntry, Predecessor};

/// Single-source Dijkstra over the routing graph.
///
/// Returns, for every vertex of the graph, the minimal weight from `source`
/// and the last edge of one optimal path, or `None` if the vertex cannot be
/// reached. A label is only replaced by a strictly better one, so among
/// equal-weight paths the first one relaxed wins.
pub(crate) fn dijkstra_paths(graph: &TransitGraph, source: NodeIndex) -> Vec<Option<PathEntry>> {
    let vertex_count = graph.vertex_count();
    let mut entries: Vec<Option<PathEntry>> = vec![None; vertex_count];
    let mut settled = FixedBitSet::with_capacity(vertex_count);
    let mut heap = BinaryHeap::with_capacity(vertex_count / 4 + 1);

    entries[source.index()] = Some(PathEntry {
        weight: 0.0,
        predecessor: None,
    });
    heap.push(State {
        cost: 0.0,
        node: source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Stale heap entry
        if settled.put(node.index()) {
            continue;
        }

        for edge in graph.graph.edges(node) {
            let next = edge.target();
            if settled.contains(next.index()) {
                continue;
            }

            let next_cost = cost + edge.weight().weight;
            let slot = &mut entries[next.index()];
            if slot.is_none_or(|entry| next_cost < entry.weight) {
                *slot = Some(PathEntry {
                    weight: next_cost,
                    predecessor: Some(Predecessor {
                        edge: edge.id(),
                        from: node,
                    }),
                });
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    entries
}
