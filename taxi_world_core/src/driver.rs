//! Maps strategy codes to strategies and runs them on a loaded map.

use tracing::{debug, info};

use crate::{
    environment::{AgentStep, Environment, GridMap, INIT_LANDMARK},
    search::{
        BreadthFirstSearch, DepthFirstSearch, SearchResult, SearchStrategy, UcsMode,
        UniformCostSearch, is_valid_path,
    },
};

/// Reasons a search was not run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Unknown strategy code {0}.")]
    UnknownStrategy(i32),
    #[error("Map has no \"init\" landmark, cannot place the agent.")]
    MissingInit,
    #[error("Init landmark ({x}, {y}) lies outside the grid.")]
    InitOutOfBounds { x: usize, y: usize },
}

/// The strategies a driver can choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BreadthFirst,
    UniformCost(UcsMode),
    DepthFirst,
}

impl Strategy {
    /// Decodes a menu code: 1 and 4 select breadth-first, 2 uniform cost.
    pub fn from_code(code: i32) -> Result<Strategy, SearchError> {
        match code {
            1 | 4 => Ok(Strategy::BreadthFirst),
            2 => Ok(Strategy::UniformCost(UcsMode::default())),
            other => Err(SearchError::UnknownStrategy(other)),
        }
    }

    /// Replaces the uniform cost mode; other strategies are left untouched.
    pub fn with_ucs_mode(self, mode: UcsMode) -> Strategy {
        match self {
            Strategy::UniformCost(_) => Strategy::UniformCost(mode),
            other => other,
        }
    }

    pub fn build(self) -> Box<dyn SearchStrategy> {
        match self {
            Strategy::BreadthFirst => Box::new(BreadthFirstSearch::new()),
            Strategy::UniformCost(mode) => Box::new(UniformCostSearch::new(mode)),
            Strategy::DepthFirst => Box::new(DepthFirstSearch),
        }
    }
}

/// Runs `strategy` from the map's `init` landmark.
pub fn run_search(map: &GridMap, strategy: Strategy) -> Result<SearchResult, SearchError> {
    let init = map.landmark(INIT_LANDMARK).ok_or(SearchError::MissingInit)?;
    if !map.grid.contains(init) {
        return Err(SearchError::InitOutOfBounds {
            x: init.x,
            y: init.y,
        });
    }
    let searcher = strategy.build();
    let mut environment = Environment::new(AgentStep::root(init), &map.grid);

    let result = searcher.look_for_goal(&mut environment);
    info!(
        strategy = searcher.name(),
        solution_found = result.solution_found,
        path_length = result.path.len(),
        expanded_nodes = result.expanded_nodes,
        "search finished"
    );
    debug!(
        passenger = ?environment.passenger_position,
        valid_path = is_valid_path(&map.grid, &result.path),
    );
    Ok(result)
}

/// Decodes `code` and runs the matching strategy. An unknown code never
/// builds an environment.
pub fn run_search_with_code(
    map: &GridMap,
    code: i32,
    ucs_mode: UcsMode,
) -> Result<SearchResult, SearchError> {
    let strategy = Strategy::from_code(code)?.with_ucs_mode(ucs_mode);
    run_search(map, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, environment::CellType, map::Grid};

    fn passenger_then_goal() -> GridMap {
        GridMap::new(Grid::from_generator(2, 1, |x, _| {
            if x == 0 {
                CellType::Passenger
            } else {
                CellType::Goal
            }
        }))
    }

    #[test]
    fn init_outside_the_grid_is_rejected() {
        let map = passenger_then_goal().with_landmark(INIT_LANDMARK, Position::new(5, 5));
        assert_eq!(
            run_search(&map, Strategy::BreadthFirst),
            Err(SearchError::InitOutOfBounds { x: 5, y: 5 })
        );
        assert_eq!(
            run_search(&map, Strategy::UniformCost(UcsMode::Complete)),
            Err(SearchError::InitOutOfBounds { x: 5, y: 5 })
        );
    }

    #[test]
    fn init_inside_the_grid_runs() {
        let map = passenger_then_goal().with_landmark(INIT_LANDMARK, Position::new(0, 0));
        let result = run_search(&map, Strategy::BreadthFirst).unwrap();
        assert!(result.solution_found);
        assert_eq!(result.path, vec![Position::new(0, 0), Position::new(1, 0)]);
    }

    #[test]
    fn codes_map_to_strategies() {
        assert_eq!(Strategy::from_code(1), Ok(Strategy::BreadthFirst));
        assert_eq!(Strategy::from_code(4), Ok(Strategy::BreadthFirst));
        assert_eq!(
            Strategy::from_code(2),
            Ok(Strategy::UniformCost(UcsMode::SingleIteration))
        );
        assert_eq!(Strategy::from_code(3), Err(SearchError::UnknownStrategy(3)));
        assert_eq!(Strategy::from_code(-1), Err(SearchError::UnknownStrategy(-1)));
    }

    #[test]
    fn ucs_mode_only_touches_uniform_cost() {
        assert_eq!(
            Strategy::BreadthFirst.with_ucs_mode(UcsMode::Complete),
            Strategy::BreadthFirst
        );
        assert_eq!(
            Strategy::UniformCost(UcsMode::SingleIteration).with_ucs_mode(UcsMode::Complete),
            Strategy::UniformCost(UcsMode::Complete)
        );
    }

    #[test]
    fn built_strategies_report_their_names() {
        assert_eq!(Strategy::BreadthFirst.build().name(), "breadth-first");
        assert_eq!(
            Strategy::UniformCost(UcsMode::Complete).build().name(),
            "uniform-cost"
        );
        assert_eq!(Strategy::DepthFirst.build().name(), "depth-first");
    }
}
