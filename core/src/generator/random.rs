use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Uniform mine placement over every cell except the start cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: GameConfig) -> Grid {
        use rand::prelude::*;

        let size = config.size;
        let total_cells = config.total_cells();
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        if total_cells == 0 {
            log::debug!("Empty {}x{} grid requested, no mines placed", size.0, size.1);
            return Grid::from_valid_mask(mine_mask, START_CELL);
        }

        let mines = config.mines.min(config.max_mines());
        if mines != config.mines {
            log::warn!(
                "Clamped mine count from {} to {} to keep the start cell safe",
                config.mines,
                mines
            );
        }

        let start_index = flat_index(START_CELL, size);
        let mut candidates: Vec<CellCount> =
            (0..total_cells).filter(|&index| index != start_index).collect();

        // partial Fisher-Yates, the first `mines` slots become a uniform sample without replacement
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mines = usize::from(mines);
        for i in 0..mines {
            let j = rng.random_range(i..candidates.len());
            candidates.swap(i, j);
        }

        for &index in &candidates[..mines] {
            mine_mask[coords_of(index, size).to_nd_index()] = true;
        }

        // start cell is safe regardless of the draw
        mine_mask[START_CELL.to_nd_index()] = false;

        let grid = Grid::from_valid_mask(mine_mask, START_CELL);

        // double check mine count
        if usize::from(grid.mine_count()) != mines {
            log::warn!(
                "Generated grid count mismatch, actual: {}, requested: {}",
                grid.mine_count(),
                mines
            );
        }
        log::debug!(
            "Generated {}x{} grid with {} mines, seed {}",
            size.0,
            size.1,
            grid.mine_count(),
            self.seed
        );
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_count_and_keeps_start_safe() {
        for seed in 0..64 {
            let grid = RandomGridGenerator::new(seed).generate(GameConfig::new((4, 4), 4));

            assert_eq!(grid.mine_count(), 4);
            assert_eq!(grid.mine_coords().count(), 4);
            assert!(!grid[START_CELL].mine);
            assert!(grid[START_CELL].start);
        }
    }

    #[test]
    fn same_seed_same_grid() {
        let config = GameConfig::new((9, 9), 10);

        let first = RandomGridGenerator::new(42).generate(config);
        let second = RandomGridGenerator::new(42).generate(config);

        assert_eq!(first, second);
    }

    #[test]
    fn full_request_fills_everything_but_start() {
        let grid = RandomGridGenerator::new(7).generate(GameConfig::new((3, 3), 100));

        assert_eq!(grid.mine_count(), 8);
        assert_eq!(grid.safe_cell_count(), 1);
        assert_eq!(grid[START_CELL].adjacent_mines, 3);
    }

    #[test]
    fn unchecked_oversized_request_is_still_clamped() {
        let grid = RandomGridGenerator::new(1).generate(GameConfig::new_unchecked((2, 2), 9));

        assert_eq!(grid.mine_count(), 3);
        assert!(!grid[START_CELL].mine);
    }

    #[test]
    fn zero_sized_grid_is_empty() {
        let grid = generate(0, 0, 4, 3);

        assert!(grid.is_empty());
        assert_eq!(grid.mine_count(), 0);
        assert_eq!(grid.start(), None);
    }

    #[test]
    fn zero_width_grid_is_empty() {
        let grid = generate(0, 5, 2, 3);

        assert!(grid.is_empty());
        assert_eq!(grid.size(), (0, 5));
    }
}
