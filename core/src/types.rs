use ndarray::Array2;

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Flat index of `coords` in a grid of `size`, `x * size_y + y`.
pub const fn flat_index(coords: Coord2, size: Coord2) -> CellCount {
    coords.0 as CellCount * size.1 as CellCount + coords.1 as CellCount
}

/// Inverse of [`flat_index`], `size.1` must be non-zero.
pub const fn coords_of(index: CellCount, size: Coord2) -> Coord2 {
    let size_y = size.1 as CellCount;
    ((index / size_y) as Coord, (index % size_y) as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (size_x, size_y) = self.dim();
        // grids never exceed Coord::MAX on either axis
        let size = (size_x as Coord, size_y as Coord);
        NeighborIter::new(index, size)
    }
}

/// Iterates the in-bounds cells at Chebyshev distance 1, edges clip rather than wrap.
///
/// Scans the clipped 3x3 window row by row (`y` outer, `x` inner) and skips the center. A center
/// outside `bounds` has no neighbors.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    x_span: (Coord, Coord),
    y_last: Coord,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        let (x, y) = center;
        let (size_x, size_y) = bounds;
        let cursor = (x < size_x && y < size_y).then(|| (x.saturating_sub(1), y.saturating_sub(1)));

        Self {
            center,
            x_span: (
                x.saturating_sub(1),
                x.saturating_add(1).min(size_x.saturating_sub(1)),
            ),
            y_last: y.saturating_add(1).min(size_y.saturating_sub(1)),
            cursor,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(pos) = self.cursor {
            let (first_x, last_x) = self.x_span;
            self.cursor = if pos.0 < last_x {
                Some((pos.0 + 1, pos.1))
            } else if pos.1 < self.y_last {
                Some((first_x, pos.1 + 1))
            } else {
                None
            };

            if pos != self.center {
                return Some(pos);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (4, 4)).collect();

        assert_eq!(neighbors, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((1, 2), (4, 4)).count(), 8);
    }

    #[test]
    fn edges_do_not_wrap() {
        let neighbors: Vec<_> = NeighborIter::new((3, 0), (4, 2)).collect();

        assert_eq!(neighbors, [(2, 0), (2, 1), (3, 1)]);
    }

    #[test]
    fn far_corner_of_max_grid_stays_in_bounds() {
        let neighbors: Vec<_> = NeighborIter::new((254, 254), (255, 255)).collect();

        assert_eq!(neighbors, [(253, 253), (254, 253), (253, 254)]);
    }

    #[test]
    fn center_outside_bounds_has_no_neighbors() {
        assert_eq!(NeighborIter::new((4, 0), (4, 4)).count(), 0);
        assert_eq!(NeighborIter::new((0, 0), (0, 0)).count(), 0);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn flat_index_is_row_major_over_x() {
        let size = (3, 4);

        assert_eq!(flat_index((0, 0), size), 0);
        assert_eq!(flat_index((0, 3), size), 3);
        assert_eq!(flat_index((1, 0), size), 4);
        assert_eq!(flat_index((2, 3), size), 11);
        assert_eq!(coords_of(7, size), (1, 3));
    }
}
