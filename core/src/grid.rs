use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Arena of cells addressed by `(x, y)` or by flat index `x * size_y + y`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    start: Option<Coord2>,
}

impl Grid {
    /// Builds a grid from a mine mask, `start` is forced safe if it lies inside the mask.
    ///
    /// Masks longer than [`Coord::MAX`] on either axis are rejected.
    pub fn from_mine_mask(mine_mask: Array2<bool>, start: Coord2) -> Result<Self> {
        let (size_x, size_y) = mine_mask.dim();
        let _: Coord = size_x.try_into().map_err(|_| GameError::GridTooLarge)?;
        let _: Coord = size_y.try_into().map_err(|_| GameError::GridTooLarge)?;

        Ok(Self::from_valid_mask(mine_mask, start))
    }

    /// Same as [`Grid::from_mine_mask`] for masks already known to fit [`Coord`] axes.
    pub(crate) fn from_valid_mask(mut mine_mask: Array2<bool>, start: Coord2) -> Self {
        let (size_x, size_y) = mine_mask.dim();
        let inside = usize::from(start.0) < size_x && usize::from(start.1) < size_y;
        let start = inside.then_some(start);

        if let Some(start) = start {
            if mine_mask[start.to_nd_index()] {
                log::warn!("Mine requested on start cell {:?}, keeping it safe", start);
                mine_mask[start.to_nd_index()] = false;
            }
        }

        let cells = Array2::from_shape_fn(mine_mask.dim(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            let mine = mine_mask[[x, y]];
            let adjacent_mines = if mine {
                0
            } else {
                mine_mask
                    .iter_neighbors(coords)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8
            };
            Cell {
                mine,
                adjacent_mines,
                start: start == Some(coords),
                revealed: false,
            }
        });
        let mine_count = cells.iter().filter(|cell| cell.mine).count() as CellCount;

        Self {
            cells,
            mine_count,
            start,
        }
    }

    pub fn from_mine_coords(size: Coord2, start: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            if coords == start {
                return Err(GameError::MineOnStart);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_valid_mask(mine_mask, start))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (size_x, size_y) = self.cells.dim();
        (size_x as Coord, size_y as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// The guaranteed-safe start cell, `None` only for an empty grid.
    pub fn start(&self) -> Option<Coord2> {
        self.start
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn cell_at_index(&self, index: CellCount) -> Option<Cell> {
        if index >= self.total_cells() {
            return None;
        }
        Some(self[coords_of(index, self.size())])
    }

    /// All cells with their coordinates, in flat-index order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_cells()
            .filter(|(_, cell)| cell.mine)
            .map(|(coords, _)| coords)
    }

    /// Counts neighboring mines from the stored mine flags.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].mine)
            .count() as u8
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| !cell.mine && cell.revealed)
            .count() as CellCount
    }

    /// Reveals a single cell and reports whether it holds a mine.
    ///
    /// Revealing an already revealed cell changes nothing and reports the same flag.
    pub fn reveal(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if !cell.revealed {
            cell.revealed = true;
            log::trace!("Revealed cell {:?}, mine: {}", coords, cell.mine);
        }

        Ok(cell.mine)
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.cells[(x as usize, y as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_counts_clip_at_edges() {
        let grid = Grid::from_mine_coords((3, 3), (0, 0), &[(1, 1), (2, 2)]).unwrap();

        assert_eq!(grid[(0, 0)].adjacent_mines, 1);
        assert_eq!(grid[(2, 1)].adjacent_mines, 2);
        assert_eq!(grid[(0, 2)].adjacent_mines, 1);
        assert_eq!(grid[(1, 2)].adjacent_mines, 2);
        assert_eq!(grid.mine_count(), 2);
        assert_eq!(grid.safe_cell_count(), 7);
    }

    #[test]
    fn stored_counts_match_recomputed_counts() {
        let grid = Grid::from_mine_coords((4, 3), (0, 0), &[(1, 0), (3, 2), (2, 1)]).unwrap();

        for (coords, cell) in grid.iter_cells().filter(|(_, cell)| !cell.mine) {
            assert_eq!(cell.adjacent_mines, grid.adjacent_mine_count(coords));
        }
    }

    #[test]
    fn duplicate_mines_collapse() {
        let grid = Grid::from_mine_coords((2, 2), (0, 0), &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(grid.mine_count(), 1);
    }

    #[test]
    fn rejects_mine_on_start_and_out_of_range() {
        assert_eq!(
            Grid::from_mine_coords((2, 2), (0, 0), &[(0, 0)]),
            Err(GameError::MineOnStart)
        );
        assert_eq!(
            Grid::from_mine_coords((2, 2), (0, 0), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn mask_with_mine_on_start_is_cleared() {
        let mask = Array2::from_elem([2, 2], true);

        let grid = Grid::from_mine_mask(mask, (0, 0)).unwrap();

        assert!(!grid[(0, 0)].mine);
        assert!(grid[(0, 0)].start);
        assert_eq!(grid.mine_count(), 3);
        assert_eq!(grid.start(), Some((0, 0)));
    }

    #[test]
    fn oversized_mask_is_rejected() {
        let wide = Array2::from_elem([256, 1], false);
        let tall = Array2::from_elem([2, 300], true);

        assert_eq!(Grid::from_mine_mask(wide, (0, 0)), Err(GameError::GridTooLarge));
        assert_eq!(Grid::from_mine_mask(tall, (0, 0)), Err(GameError::GridTooLarge));
    }

    #[test]
    fn largest_mask_keeps_its_size() {
        let grid = Grid::from_mine_mask(Array2::from_elem([255, 255], true), (0, 0)).unwrap();

        assert_eq!(grid.size(), (255, 255));
        assert_eq!(grid.total_cells(), 65_025);
        assert_eq!(grid.safe_cell_count(), 1);
        assert_eq!(grid[(254, 254)].adjacent_mines, 0);
        assert_eq!(grid.adjacent_mine_count((254, 254)), 3);
    }

    #[test]
    fn empty_grid_has_no_start() {
        let grid = Grid::from_mine_coords((0, 0), (0, 0), &[]).unwrap();

        assert!(grid.is_empty());
        assert_eq!(grid.start(), None);
        assert_eq!(grid.safe_cell_count(), 0);
        assert_eq!(grid.cell((0, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn flat_index_addresses_the_same_cell() {
        let grid = Grid::from_mine_coords((3, 2), (0, 0), &[(2, 1)]).unwrap();

        assert_eq!(grid.cell_at_index(5), Some(grid[(2, 1)]));
        assert!(grid.cell_at_index(5).unwrap().mine);
        assert_eq!(grid.cell_at_index(6), None);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut grid = Grid::from_mine_coords((2, 1), (0, 0), &[(1, 0)]).unwrap();

        assert_eq!(grid.reveal((1, 0)), Ok(true));
        let after_first = grid.clone();
        assert_eq!(grid.reveal((1, 0)), Ok(true));

        assert_eq!(grid, after_first);
        assert!(grid[(1, 0)].revealed);
        assert_eq!(grid.revealed_safe_count(), 0);
    }
}
