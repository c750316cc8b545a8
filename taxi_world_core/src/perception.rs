use crate::{
    Direction, DirectionalMove,
    environment::{AgentStep, CellType},
    map::Grid,
};

/// Computes the legal moves from the agent's current cell.
///
/// A move is legal when it stays inside the grid and does not enter a wall.
/// Moves are returned in [`Direction::ALL`] order. The move back to the
/// previous cell is *not* filtered here; see [`successors`].
pub fn perceive(agent: &AgentStep, grid: &Grid<CellType>) -> Vec<DirectionalMove> {
    Direction::ALL
        .iter()
        .filter_map(|&direction| {
            let position = agent.current.step(direction)?;
            match grid.get_at(position) {
                Some(cell) if !cell.is_wall() => Some(DirectionalMove {
                    direction,
                    position,
                }),
                _ => None,
            }
        })
        .collect()
}

/// Child steps of `agent`, excluding the immediate reversal to its previous cell.
///
/// This only guards against single-step backtracking; longer cycles are left
/// to the strategies.
pub fn successors(agent: &AgentStep, grid: &Grid<CellType>) -> Vec<AgentStep> {
    perceive(agent, grid)
        .into_iter()
        .filter(|mv| Some(mv.position) != agent.previous)
        .map(|mv| agent.child(mv.direction, mv.position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn grid(rows: &[&[i32]]) -> Grid<CellType> {
        Grid::from_generator(rows[0].len(), rows.len(), |x, y| CellType::from(rows[y][x]))
    }

    #[test]
    fn corner_sees_only_in_bounds_free_cells() {
        let g = grid(&[&[0, 0], &[1, 0]]);
        let moves = perceive(&AgentStep::root(Position::new(0, 0)), &g);
        assert_eq!(
            moves,
            vec![DirectionalMove {
                direction: Direction::Right,
                position: Position::new(1, 0)
            }]
        );
    }

    #[test]
    fn moves_follow_direction_order() {
        let g = grid(&[&[0, 0, 0], &[0, 0, 0], &[0, 0, 0]]);
        let moves = perceive(&AgentStep::root(Position::new(1, 1)), &g);
        let directions: Vec<_> = moves.iter().map(|m| m.direction).collect();
        assert_eq!(directions, Direction::ALL.to_vec());
    }

    #[test]
    fn reserved_codes_are_passable() {
        let g = grid(&[&[0, 3, 5]]);
        let moves = perceive(&AgentStep::root(Position::new(1, 0)), &g);
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn successors_drop_the_way_back() {
        let g = grid(&[&[0, 0, 0]]);
        let root = AgentStep::root(Position::new(0, 0));
        let middle = root.child(Direction::Right, Position::new(1, 0));
        let next = successors(&middle, &g);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].current, Position::new(2, 0));
        assert_eq!(next[0].previous, Some(Position::new(1, 0)));
        assert_eq!(next[0].action, Some(Direction::Right));
        assert_eq!(next[0].depth, 2);
    }
}
