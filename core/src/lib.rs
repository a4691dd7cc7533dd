#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod session;
mod types;

/// The cell every grid keeps free of mines.
pub const START_CELL: Coord2 = (0, 0);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord2 = (4, 4);
    pub const DEFAULT_MINES: CellCount = 4;

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps `mines` so at least the start cell stays safe.
    pub fn new(size: Coord2, mines: CellCount) -> Self {
        let max_mines = mult(size.0, size.1).saturating_sub(1);
        if mines > max_mines {
            log::warn!(
                "Requested {} mines but a {}x{} grid only fits {}",
                mines,
                size.0,
                size.1,
                max_mines
            );
        }
        Self::new_unchecked(size, mines.min(max_mines))
    }

    /// Builds a config from raw signed values, negatives clamp to zero.
    pub fn from_signed((size_x, size_y): (i64, i64), mines: i64) -> Self {
        let size_x = size_x.clamp(0, Coord::MAX.into()) as Coord;
        let size_y = size_y.clamp(0, Coord::MAX.into()) as Coord;
        let mines = mines.clamp(0, CellCount::MAX.into()) as CellCount;
        Self::new((size_x, size_y), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn max_mines(&self) -> CellCount {
        self.total_cells().saturating_sub(1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, Self::DEFAULT_MINES)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}
