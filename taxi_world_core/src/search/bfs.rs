//! Breadth first search

use super::{
    SearchResult, SearchStatistics, SearchStrategy, frontier::FifoFrontier,
    two_phase::search_two_phases,
};
use crate::environment::Environment;

/// Cost reported by breadth-first search; it does not track path cost.
pub const BFS_REPORTED_COST: f64 = 1.333;

/// Two-phase breadth-first search over a FIFO frontier.
///
/// Finds a path with the fewest moves to the passenger, then from there the
/// fewest moves to the goal, never stepping straight back to the cell it
/// just left.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirstSearch;

impl BreadthFirstSearch {
    pub fn new() -> Self {
        Self
    }
}

impl SearchStrategy for BreadthFirstSearch {
    fn name(&self) -> &'static str {
        "breadth-first"
    }

    fn look_for_goal(&self, environment: &mut Environment) -> SearchResult {
        let mut statistics = SearchStatistics::new(self.name());
        let mut frontier = FifoFrontier::default();
        let solution = search_two_phases(environment, &mut frontier, &mut statistics);
        statistics.finalise_search(solution.is_some());

        match solution {
            Some(solution) => SearchResult {
                path: solution.path,
                solution_found: true,
                expanded_nodes: statistics.expanded_nodes(),
                tree_depth: solution.goal.depth,
                cost: BFS_REPORTED_COST,
                elapsed: statistics.elapsed(),
                passenger: environment.passenger_position,
            },
            None => SearchResult::exhausted(&statistics),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Position,
        environment::{AgentStep, CellType},
        map::Grid,
    };

    fn grid(rows: &[&[i32]]) -> Grid<CellType> {
        Grid::from_generator(rows[0].len(), rows.len(), |x, y| CellType::from(rows[y][x]))
    }

    #[test]
    fn walks_around_the_wall() {
        let g = grid(&[&[0, 0, 0], &[0, 1, 0], &[5, 0, 6]]);
        let mut env = Environment::new(AgentStep::root(Position::new(0, 0)), &g);
        let result = BreadthFirstSearch.look_for_goal(&mut env);

        let p = |x, y| Position::new(x, y);
        assert!(result.solution_found);
        assert_eq!(result.path, vec![p(0, 0), p(0, 1), p(0, 2), p(1, 2), p(2, 2)]);
        assert_eq!(result.expanded_nodes, 6);
        assert_eq!(result.tree_depth, 4);
        assert_eq!(result.cost, BFS_REPORTED_COST);
        assert_eq!(env.passenger_position, Some(p(0, 2)));
        assert_eq!(result.passenger, Some(p(0, 2)));
        assert!(env.agent.has_passenger);
        assert_eq!(env.total_goal, 2);
    }

    #[test]
    fn passenger_on_start_cell() {
        let g = grid(&[&[5, 0, 6]]);
        let mut env = Environment::new(AgentStep::root(Position::new(0, 0)), &g);
        let result = BreadthFirstSearch.look_for_goal(&mut env);
        assert!(result.solution_found);
        assert_eq!(result.path.len(), 3);
        assert_eq!(result.expanded_nodes, 2);
    }

    #[test]
    fn missing_passenger_exhausts_frontier() {
        // The open 2x2 block has cycles; the search must still stop.
        let g = grid(&[&[0, 0, 1], &[0, 0, 1], &[1, 1, 5]]);
        let mut env = Environment::new(AgentStep::root(Position::new(0, 0)), &g);
        let result = BreadthFirstSearch.look_for_goal(&mut env);
        assert!(!result.solution_found);
        assert!(result.path.is_empty());
        assert!(result.expanded_nodes > 0);
        assert_eq!(env.passenger_position, None);
    }

    #[test]
    fn dead_end_passenger_cannot_turn_back() {
        // The only way out of the passenger cell is the way in.
        let g = grid(&[&[0, 0, 5], &[6, 1, 1]]);
        let mut env = Environment::new(AgentStep::root(Position::new(1, 0)), &g);
        let result = BreadthFirstSearch.look_for_goal(&mut env);
        assert_eq!(env.passenger_position, Some(Position::new(2, 0)));
        assert!(!result.solution_found);
        assert!(result.path.is_empty());
    }
}
