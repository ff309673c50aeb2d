use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

use crate::Minutes;

#[derive(Copy, Clone, Debug)]
pub(super) struct State {
    pub(super) cost: Minutes,
    pub(super) node: NodeIndex,
}

// Min-heap by cost, ties popped in vertex order so that runs are reproducible
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}
