use rand::{Rng, SeedableRng, rngs::StdRng, seq::index::sample};
use tracing::debug;

use crate::{
    Position,
    environment::{CellType, GOAL_LANDMARK, GridMap, INIT_LANDMARK, MapError, PASSENGER_LANDMARK},
    map::Grid,
};

/// Builds a reproducible random map.
///
/// Start, passenger and goal land on three distinct cells; every other cell
/// becomes a wall with probability `wall_density` (clamped to `[0, 1]`).
/// A NaN or infinite density is rejected. Nothing guarantees the landmarks
/// are connected.
pub fn generate_random_map(
    width: usize,
    height: usize,
    wall_density: f64,
    seed: u64,
) -> Result<GridMap, MapError> {
    if !wall_density.is_finite() {
        return Err(MapError::InvalidWallDensity(wall_density));
    }
    let cell_count = width.saturating_mul(height);
    if cell_count < 3 {
        return Err(MapError::TooSmall { width, height });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let density = wall_density.clamp(0.0, 1.0);
    let mut grid: Grid<CellType> = Grid::from_generator(width, height, |_, _| {
        if rng.random_bool(density) {
            CellType::Wall
        } else {
            CellType::Free
        }
    });

    let mut landmarks = Vec::with_capacity(3);
    let picks = sample(&mut rng, cell_count, 3);
    for (index, (name, cell)) in picks.iter().zip([
        (INIT_LANDMARK, CellType::Start),
        (PASSENGER_LANDMARK, CellType::Passenger),
        (GOAL_LANDMARK, CellType::Goal),
    ]) {
        let position = Position::new(index % width, index / width);
        grid[position] = cell;
        landmarks.push((name, position));
    }

    let mut map = GridMap::new(grid);
    for (name, position) in landmarks {
        map.landmarks.insert(name.to_string(), position);
    }
    debug!(width, height, density, seed, "generated random map");
    Ok(map)
}
