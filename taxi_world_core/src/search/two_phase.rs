use std::collections::HashSet;
use tracing::debug;

use super::{Phase, SearchStatistics, frontier::Frontier, path::{ParentMap, reconstruct_path}};
use crate::{
    Position,
    environment::{AgentStep, CellType, Environment},
    perception::successors,
};

/// A route that picked up the passenger and reached the goal.
#[derive(Debug, Clone)]
pub(crate) struct Solution {
    pub path: Vec<Position>,
    pub goal: AgentStep,
    pub cost: f64,
}

/// Finds the passenger, then the goal, expanding nodes in `frontier` order.
///
/// When the passenger is dequeued the rest of the frontier is dropped and the
/// search restarts from the passenger node. Each phase keeps its own closed
/// set and parent map keyed by `(current, previous)`, which is all that
/// decides a node's successors, so revisiting a cell through a longer cycle
/// stays possible while the search still terminates.
pub(crate) fn search_two_phases<F: Frontier>(
    environment: &mut Environment,
    frontier: &mut F,
    statistics: &mut SearchStatistics,
) -> Option<Solution> {
    let initial = environment.agent.step;
    frontier.push(initial, 0.0);

    let mut phase = Phase::LocatePassenger;
    let mut parents = ParentMap::with_root(&initial);
    let mut closed = HashSet::new();
    let mut path_to_passenger = Vec::new();
    let mut passenger_cost = 0.0;

    while let Some((step, cost)) = frontier.pop() {
        match (phase, environment.cell(step.current)) {
            (Phase::LocatePassenger, CellType::Passenger) => {
                environment.pick_up_passenger(step.current);
                environment.agent.step = step;
                path_to_passenger = reconstruct_path(&parents, &step);
                passenger_cost = cost;
                statistics.phase_completed(phase, step.depth);
                debug!(discarded = frontier.len(), "restarting from passenger");

                phase = Phase::LocateGoal;
                frontier.clear();
                closed.clear();
                parents = ParentMap::with_root(&step);
                frontier.push(step, 0.0);
                continue;
            }
            (Phase::LocateGoal, CellType::Goal) => {
                environment.total_goal += 1;
                environment.agent.step = step;
                statistics.phase_completed(phase, step.depth);
                let path_to_goal = reconstruct_path(&parents, &step);
                return Some(Solution {
                    path: join_paths(path_to_passenger, path_to_goal),
                    goal: step,
                    cost: passenger_cost + cost,
                });
            }
            _ => {}
        }

        if !closed.insert(step.state()) {
            statistics.increment_skipped_nodes();
            continue;
        }

        environment.agent.step = step;
        let children = successors(&step, environment.grid);
        statistics.increment_expanded_nodes();
        statistics.increment_generated_nodes(children.len());
        for child in children {
            parents.record(&child, &step);
            let child_cost = cost + environment.cell(child.current).step_cost();
            frontier.push(child, child_cost);
        }
    }

    debug!(?phase, "frontier exhausted");
    None
}

/// Appends `tail` to `head`, dropping the cell they share.
fn join_paths(mut head: Vec<Position>, tail: Vec<Position>) -> Vec<Position> {
    let shared = usize::from(head.last().is_some() && head.last() == tail.first());
    head.extend(tail.into_iter().skip(shared));
    head
}
