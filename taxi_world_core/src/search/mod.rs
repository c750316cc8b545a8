//! Blind search strategies over an [`Environment`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{Position, environment::Environment};

mod bfs;
mod dfs;
mod frontier;
mod path;
mod statistics;
mod two_phase;
mod ucs;

pub use bfs::{BFS_REPORTED_COST, BreadthFirstSearch};
pub use dfs::DepthFirstSearch;
pub use path::{ParentMap, is_valid_path, reconstruct_path, remove_duplicates};
pub use statistics::SearchStatistics;
pub use ucs::{UcsMode, UniformCostSearch};

/// Outcome of one search invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Cells from the initial position to the satisfied goal.
    pub path: Vec<Position>,
    pub solution_found: bool,
    pub expanded_nodes: usize,
    /// Depth of the node that satisfied the final goal.
    pub tree_depth: usize,
    pub cost: f64,
    pub elapsed: Duration,
    /// Passenger cell picked up along `path`. `None` without a solution.
    pub passenger: Option<Position>,
}

impl SearchResult {
    /// Unsuccessful result with every metric zeroed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Unsuccessful result carrying the metrics gathered so far.
    pub(crate) fn exhausted(statistics: &SearchStatistics) -> Self {
        SearchResult {
            expanded_nodes: statistics.expanded_nodes(),
            elapsed: statistics.elapsed(),
            ..Self::default()
        }
    }
}

/// A strategy able to find the passenger and then the goal.
pub trait SearchStrategy {
    fn name(&self) -> &'static str;

    /// Runs the search to completion on `environment`.
    fn look_for_goal(&self, environment: &mut Environment) -> SearchResult;
}

/// Which sub-goal a two-phase search is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    LocatePassenger,
    LocateGoal,
}
