//! Precomputed shortest paths between all pairs of routing graph vertices

use std::time::Instant;

use fixedbitset::FixedBitSet;
use itertools::Itertools;
use log::info;
use petgraph::graph::{EdgeIndex, NodeIndex};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::dijkstra::dijkstra_paths;
use super::graph::TransitGraph;
use crate::{Error, Minutes};

/// Last hop of an optimal path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predecessor {
    pub edge: EdgeIndex,
    /// Source vertex of `edge`
    pub from: NodeIndex,
}

/// Best known way to reach a vertex from a fixed source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathEntry {
    pub weight: Minutes,
    /// `None` only for the source itself
    pub predecessor: Option<Predecessor>,
}

/// Optimal path between two vertices
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    pub weight: Minutes,
    /// Edges from source to target
    pub edges: Vec<EdgeIndex>,
}

/// (source, target) -> optimal weight and last edge, for every vertex pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortestPathIndex {
    table: Vec<Vec<Option<PathEntry>>>,
}

impl ShortestPathIndex {
    /// Runs one Dijkstra search per vertex, in parallel
    pub fn build(graph: &TransitGraph) -> Self {
        let started = Instant::now();
        let sources = graph.graph.node_indices().collect_vec();

        let table = sources
            .into_par_iter()
            .map(|source| dijkstra_paths(graph, source))
            .collect::<Vec<_>>();

        info!(
            "Shortest path index over {} vertices built in {:.2?}",
            table.len(),
            started.elapsed()
        );
        Self { table }
    }

    pub fn vertex_count(&self) -> usize {
        self.table.len()
    }

    /// Minimal weight from one vertex to another, `None` if unreachable
    ///
    /// # Panics
    ///
    /// If either vertex does not belong to the indexed graph
    pub fn weight(&self, from: NodeIndex, to: NodeIndex) -> Option<Minutes> {
        self.entry(from, to).map(|entry| entry.weight)
    }

    /// Edges of an optimal path, `None` if `to` cannot be reached from `from`
    ///
    /// # Panics
    ///
    /// If either vertex does not belong to the indexed graph
    pub fn find_path(&self, from: NodeIndex, to: NodeIndex) -> Option<RouteInfo> {
        let row = self.row(from);
        let target = self.entry(from, to)?;

        let mut edges = Vec::new();
        let mut current = target;
        while let Some(predecessor) = current.predecessor {
            edges.push(predecessor.edge);
            current = row[predecessor.from.index()].unwrap_or_else(|| {
                panic!(
                    "vertex {} is on a path from {} but has no entry",
                    predecessor.from.index(),
                    from.index()
                )
            });
        }
        edges.reverse();

        Some(RouteInfo {
            weight: target.weight,
            edges,
        })
    }

    /// Checks that a deserialized index belongs to `graph`: one full row per
    /// vertex, predecessors that are real edges of the graph, and
    /// predecessor chains that end at their source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] describing the first inconsistency found
    pub(crate) fn validate(&self, graph: &TransitGraph) -> Result<(), Error> {
        let vertex_count = graph.vertex_count();
        if self.table.len() != vertex_count {
            return Err(Error::InvalidData(format!(
                "index covers {} vertices, graph has {vertex_count}",
                self.table.len()
            )));
        }

        let mut resolved = FixedBitSet::with_capacity(vertex_count);
        let mut on_chain = FixedBitSet::with_capacity(vertex_count);
        let mut chain = Vec::new();

        for (source, row) in self.table.iter().enumerate() {
            if row.len() != vertex_count {
                return Err(Error::InvalidData(format!(
                    "index row {source} has {} entries, graph has {vertex_count} vertices",
                    row.len()
                )));
            }

            for (target, entry) in row.iter().enumerate() {
                let Some(entry) = entry else { continue };
                match entry.predecessor {
                    None if target != source => {
                        return Err(Error::InvalidData(format!(
                            "path {source} -> {target} has no last edge"
                        )));
                    }
                    Some(_) if target == source => {
                        return Err(Error::InvalidData(format!(
                            "path {source} -> {source} is not empty"
                        )));
                    }
                    None => {}
                    Some(predecessor) => {
                        let endpoints = graph.edge_endpoints(predecessor.edge);
                        if endpoints != Some((predecessor.from, NodeIndex::new(target))) {
                            return Err(Error::InvalidData(format!(
                                "path {source} -> {target} ends with edge {} which is not an edge from {} to {target}",
                                predecessor.edge.index(),
                                predecessor.from.index()
                            )));
                        }
                        if row[predecessor.from.index()].is_none() {
                            return Err(Error::InvalidData(format!(
                                "path {source} -> {target} passes unreachable vertex {}",
                                predecessor.from.index()
                            )));
                        }
                    }
                }
            }

            // Every chain of predecessors must reach the source without looping
            resolved.clear();
            resolved.insert(source);
            for target in 0..vertex_count {
                let mut current = target;
                while row[current].is_some() && !resolved.contains(current) {
                    if on_chain.put(current) {
                        return Err(Error::InvalidData(format!(
                            "index row {source} has a cycle through vertex {current}"
                        )));
                    }
                    chain.push(current);
                    current = match row[current].and_then(|entry| entry.predecessor) {
                        Some(predecessor) => predecessor.from.index(),
                        None => break,
                    };
                }
                for vertex in chain.drain(..) {
                    on_chain.set(vertex, false);
                    resolved.insert(vertex);
                }
            }
        }
        Ok(())
    }

    fn entry(&self, from: NodeIndex, to: NodeIndex) -> Option<PathEntry> {
        let row = self.row(from);
        match row.get(to.index()) {
            Some(entry) => *entry,
            None => panic!(
                "vertex {} is out of range for an index over {} vertices",
                to.index(),
                row.len()
            ),
        }
    }

    fn row(&self, from: NodeIndex) -> &[Option<PathEntry>] {
        match self.table.get(from.index()) {
            Some(row) => row,
            None => panic!(
                "vertex {} is out of range for an index over {} vertices",
                from.index(),
                self.table.len()
            ),
        }
    }
}
