use taxi_world_core::{
    Position,
    driver::{SearchError, Strategy, run_search, run_search_with_code},
    environment::{
        CellType, GOAL_LANDMARK, GridMap, INIT_LANDMARK, PASSENGER_LANDMARK, load_map_from_string,
    },
    generator::generate_random_map,
    search::{BFS_REPORTED_COST, SearchResult, UcsMode, is_valid_path},
};

const EXAMPLE: &str = "
    2 0 0
    0 1 0
    5 0 6
";

fn p(x: usize, y: usize) -> Position {
    Position::new(x, y)
}

#[test]
fn example_scenario_goes_around_the_wall() {
    let map = load_map_from_string(EXAMPLE).unwrap();
    let result = run_search_with_code(&map, 1, UcsMode::default()).unwrap();

    assert!(result.solution_found);
    assert_eq!(result.path, vec![p(0, 0), p(0, 1), p(0, 2), p(1, 2), p(2, 2)]);
    assert_eq!(result.expanded_nodes, 6);
    assert_eq!(result.cost, BFS_REPORTED_COST);
    assert!(is_valid_path(&map.grid, &result.path));
}

#[test]
fn code_four_is_breadth_first_too() {
    let map = load_map_from_string(EXAMPLE).unwrap();
    let one = run_search_with_code(&map, 1, UcsMode::default()).unwrap();
    let four = run_search_with_code(&map, 4, UcsMode::default()).unwrap();
    assert_eq!(one.path, four.path);
    assert_eq!(one.expanded_nodes, four.expanded_nodes);
}

#[test]
fn code_two_runs_the_single_iteration_search() {
    let map = load_map_from_string(EXAMPLE).unwrap();
    let result = run_search_with_code(&map, 2, UcsMode::default()).unwrap();
    assert_eq!(result, SearchResult::empty());
}

#[test]
fn unknown_code_is_rejected_before_init_is_checked() {
    let map = load_map_from_string("0 5 6").unwrap();
    assert_eq!(
        run_search_with_code(&map, 9, UcsMode::default()),
        Err(SearchError::UnknownStrategy(9))
    );
    assert_eq!(
        run_search_with_code(&map, 1, UcsMode::default()),
        Err(SearchError::MissingInit)
    );
}

#[test]
fn enclosed_goal_is_unreachable() {
    let map = load_map_from_string(
        "
        2 0 0 1 0
        0 0 0 1 0
        5 0 0 1 6
        ",
    )
    .unwrap();
    let result = run_search(&map, Strategy::BreadthFirst).unwrap();
    assert!(!result.solution_found);
    assert!(result.path.is_empty());
}

#[test]
fn breadth_first_finds_the_fewest_moves() {
    // The passenger sits behind a wall: 7 moves to reach it, 2 more to the goal.
    let map = load_map_from_string(
        "
        2 0 0 0
        1 1 1 0
        0 5 0 0
        6 1 1 1
        ",
    )
    .unwrap();
    let result = run_search(&map, Strategy::BreadthFirst).unwrap();
    assert!(result.solution_found);
    assert_eq!(result.path.len() - 1, 9);
    assert_eq!(result.tree_depth, 9);
    assert_eq!(result.path.first(), Some(&p(0, 0)));
    assert_eq!(result.path.last(), Some(&p(0, 3)));
    assert!(is_valid_path(&map.grid, &result.path));
}

#[test]
fn complete_uniform_cost_agrees_on_the_example() {
    let map = load_map_from_string(EXAMPLE).unwrap();
    let bfs = run_search(&map, Strategy::BreadthFirst).unwrap();
    let ucs = run_search(&map, Strategy::UniformCost(UcsMode::Complete)).unwrap();
    assert_eq!(bfs.path, ucs.path);
    assert_eq!(ucs.cost, (ucs.path.len() - 1) as f64);
}

#[test]
fn depth_first_placeholder_finds_nothing() {
    let map = load_map_from_string(EXAMPLE).unwrap();
    let result = run_search(&map, Strategy::DepthFirst).unwrap();
    assert_eq!(result, SearchResult::empty());
}

#[test]
fn hand_built_map_without_loader() {
    let grid = taxi_world_core::map::Grid::from_generator(3, 1, |x, _| match x {
        1 => CellType::Passenger,
        2 => CellType::Goal,
        _ => CellType::Free,
    });
    let map = GridMap::new(grid).with_landmark(INIT_LANDMARK, p(0, 0));
    let result = run_search(&map, Strategy::BreadthFirst).unwrap();
    assert_eq!(result.path, vec![p(0, 0), p(1, 0), p(2, 0)]);
}

#[test]
fn random_maps_yield_valid_paths() {
    let mut solved = 0;
    for seed in 0..200 {
        let map = generate_random_map(7, 6, 0.25, seed).unwrap();
        for strategy in [Strategy::BreadthFirst, Strategy::UniformCost(UcsMode::Complete)] {
            let result = run_search(&map, strategy).unwrap();
            if !result.solution_found {
                assert!(result.path.is_empty());
                continue;
            }
            solved += 1;
            let path = &result.path;
            assert!(is_valid_path(&map.grid, path), "seed {seed}: {path:?}");
            assert_eq!(path.first().copied(), map.landmark(INIT_LANDMARK));
            assert_eq!(path.last().copied(), map.landmark(GOAL_LANDMARK));
            let passenger = map.landmark(PASSENGER_LANDMARK).unwrap();
            assert!(path.contains(&passenger));
            assert_eq!(result.tree_depth, path.len() - 1);
        }
    }
    assert!(solved > 0);
}
