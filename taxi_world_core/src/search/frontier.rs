use ordered_float::OrderedFloat;
use std::{
    cmp::Ordering,
    collections::{BinaryHeap, VecDeque},
};

use crate::environment::AgentStep;

/// Candidate steps waiting to be expanded, each with its accumulated cost.
pub(crate) trait Frontier {
    fn push(&mut self, step: AgentStep, cost: f64);
    fn pop(&mut self) -> Option<(AgentStep, f64)>;
    fn clear(&mut self);
    fn len(&self) -> usize;
}

/// First in, first out. Costs are carried along but ignored for ordering.
#[derive(Debug, Default)]
pub(crate) struct FifoFrontier {
    queue: VecDeque<(AgentStep, f64)>,
}

impl Frontier for FifoFrontier {
    fn push(&mut self, step: AgentStep, cost: f64) {
        self.queue.push_back((step, cost));
    }

    fn pop(&mut self) -> Option<(AgentStep, f64)> {
        self.queue.pop_front()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[derive(Debug, Clone)]
struct PrioritizedStep {
    priority: OrderedFloat<f64>,
    /// Insertion order, breaks ties first come first served.
    sequence: usize,
    step: AgentStep,
}

impl Ord for PrioritizedStep {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for PrioritizedStep {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PrioritizedStep {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PrioritizedStep {}

/// Lowest priority first.
#[derive(Debug, Default)]
pub(crate) struct PriorityFrontier {
    heap: BinaryHeap<PrioritizedStep>,
    next_sequence: usize,
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, step: AgentStep, cost: f64) {
        self.heap.push(PrioritizedStep {
            priority: OrderedFloat(cost),
            sequence: self.next_sequence,
            step,
        });
        self.next_sequence += 1;
    }

    fn pop(&mut self) -> Option<(AgentStep, f64)> {
        self.heap
            .pop()
            .map(|item| (item.step, item.priority.into_inner()))
    }

    fn clear(&mut self) {
        self.heap.clear();
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
