use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::{
    Position,
    environment::{AgentStep, CellType},
    map::Grid,
};

/// Node state: current cell plus the cell it was entered from.
type NodeState = (Position, Option<Position>);

/// Parent links of a search tree, keyed by node state.
///
/// Only the first parent recorded for a state is kept. Strategies record
/// children as they push them, so in breadth or cost order that parent is
/// the one whose expansion actually produced the node.
#[derive(Debug, Clone, Default)]
pub struct ParentMap {
    parents: HashMap<NodeState, Option<AgentStep>>,
}

impl ParentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new tree at `root`. Walking back stops there.
    pub fn with_root(root: &AgentStep) -> Self {
        let mut parents = Self::new();
        parents.parents.insert(root.state(), None);
        parents
    }

    /// Links each step to the first step in `steps` standing on its
    /// previous cell. Steps whose previous cell is absent stay unlinked.
    pub fn from_steps<'a>(steps: impl IntoIterator<Item = &'a AgentStep>) -> Self {
        let steps: Vec<&AgentStep> = steps.into_iter().collect();
        let mut by_position: HashMap<Position, &AgentStep> = HashMap::new();
        for step in &steps {
            by_position.entry(step.current).or_insert(*step);
        }

        let mut parents = Self::new();
        for step in steps {
            match step.previous {
                None => {
                    parents.parents.entry(step.state()).or_insert(None);
                }
                Some(previous) => {
                    if let Some(parent) = by_position.get(&previous) {
                        parents.record(step, parent);
                    }
                }
            }
        }
        parents
    }

    /// Records `parent` for `child` unless the child's state is already known.
    pub fn record(&mut self, child: &AgentStep, parent: &AgentStep) {
        self.parents.entry(child.state()).or_insert(Some(*parent));
    }

    /// `None` when `step` is unknown, `Some(None)` for a root.
    pub fn parent_of(&self, step: &AgentStep) -> Option<Option<AgentStep>> {
        self.parents.get(&step.state()).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.parents.len()
    }
}

/// Rebuilds the coordinates leading to `end`, root first.
///
/// Walks backwards through `parents` until a step without a previous cell,
/// a recorded root, or a step with no recorded parent. In the last case the
/// path starts at the oldest step that could be recovered.
pub fn reconstruct_path(parents: &ParentMap, end: &AgentStep) -> Vec<Position> {
    let mut path = vec![end.current];
    let mut current = *end;

    while current.previous.is_some() {
        if path.len() > parents.len() + 1 {
            warn!(position = ?current.current, "parent links form a cycle, truncating path");
            break;
        }
        match parents.parent_of(&current) {
            Some(Some(parent)) => {
                path.push(parent.current);
                current = parent;
            }
            Some(None) => break,
            None => {
                warn!(position = ?current.current, "no parent recorded, path starts mid-way");
                break;
            }
        }
    }

    path.reverse();
    path
}

/// Keeps the first occurrence of every coordinate, preserving order.
pub fn remove_duplicates(positions: &[Position]) -> Vec<Position> {
    let mut seen = HashSet::new();
    positions
        .iter()
        .filter(|position| seen.insert(**position))
        .copied()
        .collect()
}

/// True when every cell is a passable in-bounds cell and consecutive cells
/// are one orthogonal step apart.
pub fn is_valid_path(grid: &Grid<CellType>, path: &[Position]) -> bool {
    let cells_ok = path
        .iter()
        .all(|p| matches!(grid.get_at(*p), Some(cell) if !cell.is_wall()));
    cells_ok && path.windows(2).all(|pair| pair[0].is_adjacent(&pair[1]))
}
