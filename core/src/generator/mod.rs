use crate::*;
pub use random::*;

mod random;

pub trait GridGenerator {
    fn generate(self, config: GameConfig) -> Grid;
}

/// Generates a `size_x` by `size_y` grid with up to `desired_mines` mines, keeping [`START_CELL`] safe.
pub fn generate(size_x: Coord, size_y: Coord, desired_mines: CellCount, seed: u64) -> Grid {
    RandomGridGenerator::new(seed).generate(GameConfig::new((size_x, size_y), desired_mines))
}
