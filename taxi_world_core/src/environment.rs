use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path};

use crate::{Direction, Position, map::Grid};

/// Landmark holding the agent's starting coordinate.
pub const INIT_LANDMARK: &str = "init";
/// Landmark holding the first passenger cell found while loading.
pub const PASSENGER_LANDMARK: &str = "passenger";
/// Landmark holding the first goal cell found while loading.
pub const GOAL_LANDMARK: &str = "goal";

/// Represents the static type of a cell, decoded from its integer code.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    /// Code 0.
    #[default]
    Free,
    /// Code 1.
    Wall,
    /// Code 2. Traversable, marks the agent's starting cell.
    Start,
    /// Code 5.
    Passenger,
    /// Code 6.
    Goal,
    /// Any other code. Traversable.
    Reserved(i32),
}

impl From<i32> for CellType {
    fn from(code: i32) -> Self {
        match code {
            0 => CellType::Free,
            1 => CellType::Wall,
            2 => CellType::Start,
            5 => CellType::Passenger,
            6 => CellType::Goal,
            other => CellType::Reserved(other),
        }
    }
}

impl CellType {
    /// Integer code of this cell.
    pub fn code(self) -> i32 {
        match self {
            CellType::Free => 0,
            CellType::Wall => 1,
            CellType::Start => 2,
            CellType::Passenger => 5,
            CellType::Goal => 6,
            CellType::Reserved(code) => code,
        }
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self == CellType::Wall
    }

    /// Cost of moving into a cell of this type.
    pub fn step_cost(self) -> f64 {
        1.0
    }
}

/// A node of the search tree.
///
/// The tree is implicit: a node only remembers the coordinate it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentStep {
    pub current: Position,
    /// `None` for the root.
    pub previous: Option<Position>,
    /// Move taken to reach `current`; `None` for the root.
    pub action: Option<Direction>,
    pub depth: usize,
}

impl AgentStep {
    /// Root step at `position`.
    pub fn root(position: Position) -> Self {
        AgentStep {
            current: position,
            previous: None,
            action: None,
            depth: 0,
        }
    }

    /// Child step reached from `self` by `direction`, landing on `position`.
    pub fn child(&self, direction: Direction, position: Position) -> Self {
        AgentStep {
            current: position,
            previous: Some(self.current),
            action: Some(direction),
            depth: self.depth + 1,
        }
    }

    /// The part of a step that determines its successors.
    pub fn state(&self) -> (Position, Option<Position>) {
        (self.current, self.previous)
    }
}

/// Holds the state of the agent within the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    pub step: AgentStep,
    pub has_passenger: bool,
}

/// Everything a search strategy works on for one invocation.
#[derive(Debug)]
pub struct Environment<'a> {
    pub agent: AgentState,
    /// Unknown until the passenger cell is first dequeued.
    pub passenger_position: Option<Position>,
    pub grid: &'a Grid<CellType>,
    /// Number of phase goals satisfied so far.
    pub total_goal: usize,
}

impl<'a> Environment<'a> {
    pub fn new(initial_step: AgentStep, grid: &'a Grid<CellType>) -> Self {
        Environment {
            agent: AgentState {
                step: initial_step,
                has_passenger: false,
            },
            passenger_position: None,
            grid,
            total_goal: 0,
        }
    }

    /// Records the passenger pickup. Only the first call has an effect.
    pub fn pick_up_passenger(&mut self, position: Position) {
        if self.agent.has_passenger {
            return;
        }
        self.passenger_position = Some(position);
        self.agent.has_passenger = true;
        self.total_goal += 1;
    }

    /// Cell type under `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is outside the grid. The driver checks the root
    /// and perception only yields in-bounds children.
    #[inline]
    pub fn cell(&self, position: Position) -> CellType {
        self.grid[position]
    }
}

/// A grid of cells plus its named coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridMap {
    pub grid: Grid<CellType>,
    pub landmarks: HashMap<String, Position>,
}

impl GridMap {
    pub fn new(grid: Grid<CellType>) -> Self {
        GridMap {
            grid,
            landmarks: HashMap::new(),
        }
    }

    pub fn landmark(&self, name: &str) -> Option<Position> {
        self.landmarks.get(name).copied()
    }

    pub fn with_landmark(mut self, name: &str, position: Position) -> Self {
        self.landmarks.insert(name.to_string(), position);
        self
    }
}

/// Represents errors raised while building a map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Map is empty.")]
    Empty,
    #[error("Inconsistent width at row {row}: expected {expected}, found {found}")]
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid cell code '{token}' at position ({x}, {y}).")]
    InvalidCode { token: String, x: usize, y: usize },
    #[error("Multiple start cells found; second one at ({x}, {y}).")]
    MultipleStarts { x: usize, y: usize },
    #[error("Map of {width}x{height} is too small, at least 3 cells are needed.")]
    TooSmall { width: usize, height: usize },
    #[error("Wall density {0} is not a finite number.")]
    InvalidWallDensity(f64),
    #[error("Failed to read map file: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads a map from rows of whitespace-separated integer cell codes.
///
/// Codes 2, 5 and 6 register the `init`, `passenger` and `goal` landmarks.
pub fn load_map_from_string(map_string: &str) -> Result<GridMap, MapError> {
    let lines: Vec<&str> = map_string
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(MapError::Empty);
    }

    let height = lines.len();
    let mut width = 0;
    let mut parsed_rows: Vec<Vec<i32>> = Vec::with_capacity(height);

    for (y, line) in lines.iter().enumerate() {
        let row = line
            .split_whitespace()
            .enumerate()
            .map(|(x, token)| {
                token.parse::<i32>().map_err(|_| MapError::InvalidCode {
                    token: token.to_string(),
                    x,
                    y,
                })
            })
            .collect::<Result<Vec<i32>, MapError>>()?;
        if y == 0 {
            width = row.len();
        } else if row.len() != width {
            return Err(MapError::InconsistentWidth {
                row: y,
                expected: width,
                found: row.len(),
            });
        }
        parsed_rows.push(row);
    }

    let grid = Grid::from_generator(width, height, |x, y| CellType::from(parsed_rows[y][x]));
    let mut map = GridMap::new(grid);

    for (pos, cell) in map.grid.enumerate() {
        let name = match cell {
            CellType::Start => {
                if map.landmarks.contains_key(INIT_LANDMARK) {
                    return Err(MapError::MultipleStarts { x: pos.x, y: pos.y });
                }
                INIT_LANDMARK
            }
            CellType::Passenger => PASSENGER_LANDMARK,
            CellType::Goal => GOAL_LANDMARK,
            _ => continue,
        };
        map.landmarks.entry(name.to_string()).or_insert(pos);
    }

    Ok(map)
}

/// Reads and parses a map file.
pub fn load_map_from_path(path: impl AsRef<Path>) -> Result<GridMap, MapError> {
    let contents = std::fs::read_to_string(path)?;
    load_map_from_string(&contents)
}
