// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BinaryHeap;

use crate::NodeId;

#[derive(Debug, Clone, Copy)]
pub(super) struct QueueItem {
    pub(super) at: NodeId,
    pub(super) cost: f64,
    seq: u64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower costs (and earlier insertions) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue of nodes keyed by tentative cost.
/// Items with equal costs are popped in insertion order.
#[derive(Debug, Default)]
pub(super) struct Queue {
    heap: BinaryHeap<QueueItem>,
    counter: u64,
}

impl Queue {
    pub(super) fn push(&mut self, at: NodeId, cost: f64) {
        self.heap.push(QueueItem {
            at,
            cost,
            seq: self.counter,
        });
        self.counter += 1;
    }

    pub(super) fn pop(&mut self) -> Option<QueueItem> {
        self.heap.pop()
    }
}
