//! Uniform cost search

use std::collections::HashSet;
use tracing::{debug, warn};

use super::{
    SearchResult, SearchStatistics, SearchStrategy,
    frontier::{Frontier, PriorityFrontier},
    two_phase::search_two_phases,
};
use crate::{environment::Environment, perception::perceive};

const ROOT_PRIORITY: f64 = 1.0;
const CHILD_PRIORITY: f64 = 2.0;

/// How far [`UniformCostSearch`] goes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UcsMode {
    /// Pops the root, pushes its neighbours with a constant priority and gives
    /// up. Never reports a solution.
    #[default]
    SingleIteration,
    /// Two-phase search ordered by accumulated path cost.
    Complete,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UniformCostSearch {
    mode: UcsMode,
}

impl UniformCostSearch {
    pub fn new(mode: UcsMode) -> Self {
        Self { mode }
    }

    fn single_iteration(&self, environment: &mut Environment) -> SearchResult {
        let mut statistics = SearchStatistics::new(self.name());
        let mut frontier = PriorityFrontier::default();
        let mut visited = HashSet::new();
        frontier.push(environment.agent.step, ROOT_PRIORITY);

        if let Some((step, _)) = frontier.pop() {
            visited.insert(step);
            environment.agent.step = step;
            statistics.increment_expanded_nodes();
            for mv in perceive(&step, environment.grid) {
                let child = step.child(mv.direction, mv.position);
                if !visited.contains(&child) {
                    frontier.push(child, CHILD_PRIORITY);
                    statistics.increment_generated_nodes(1);
                }
            }
            debug!(frontier = frontier.len(), "first expansion done");
        }

        warn!("single-iteration uniform cost search stops after one expansion");
        statistics.finalise_search(false);
        SearchResult::empty()
    }

    fn complete(&self, environment: &mut Environment) -> SearchResult {
        let mut statistics = SearchStatistics::new(self.name());
        let mut frontier = PriorityFrontier::default();
        let solution = search_two_phases(environment, &mut frontier, &mut statistics);
        statistics.finalise_search(solution.is_some());

        match solution {
            Some(solution) => SearchResult {
                path: solution.path,
                solution_found: true,
                expanded_nodes: statistics.expanded_nodes(),
                tree_depth: solution.goal.depth,
                cost: solution.cost,
                elapsed: statistics.elapsed(),
                passenger: environment.passenger_position,
            },
            None => SearchResult::exhausted(&statistics),
        }
    }
}

impl SearchStrategy for UniformCostSearch {
    fn name(&self) -> &'static str {
        "uniform-cost"
    }

    fn look_for_goal(&self, environment: &mut Environment) -> SearchResult {
        match self.mode {
            UcsMode::SingleIteration => self.single_iteration(environment),
            UcsMode::Complete => self.complete(environment),
        }
    }
}
