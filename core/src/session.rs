use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl SessionStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Reveal every remaining mine once one is hit.
    pub reveal_mines_on_loss: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            reveal_mines_on_loss: true,
        }
    }
}

/// One playthrough: owns the grid and decides when the game is won or lost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    grid: Grid,
    status: SessionStatus,
    total_safe: CellCount,
    revealed_safe: CellCount,
    triggered_mine: Option<Coord2>,
    options: SessionOptions,
}

impl Session {
    pub fn new(grid: Grid) -> Self {
        Self::with_options(grid, SessionOptions::default())
    }

    pub fn with_options(grid: Grid, options: SessionOptions) -> Self {
        let total_safe = grid.safe_cell_count();
        let revealed_safe = grid.revealed_safe_count();
        let triggered_mine = grid
            .iter_cells()
            .find(|(_, cell)| cell.mine && cell.revealed)
            .map(|(coords, _)| coords);

        let mut session = Self {
            grid,
            status: SessionStatus::InProgress,
            total_safe,
            revealed_safe,
            triggered_mine,
            options,
        };
        if session.triggered_mine.is_some() {
            session.status = SessionStatus::Lost;
        } else if session.is_cleared() {
            session.status = SessionStatus::Won;
        }
        session
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.grid.mine_count()
    }

    pub fn total_safe(&self) -> CellCount {
        self.total_safe
    }

    pub fn revealed_safe(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn safe_cells_left(&self) -> CellCount {
        self.total_safe.saturating_sub(self.revealed_safe)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        self.grid.cell(coords)
    }

    /// Symbol of a revealed cell, `None` while hidden or out of range.
    pub fn visible_symbol(&self, coords: Coord2) -> Option<Symbol> {
        self.grid
            .cell(coords)
            .ok()
            .filter(|cell| cell.revealed)
            .map(Cell::symbol)
    }

    /// Reveals one cell and advances the session.
    ///
    /// An already revealed cell is a [`RevealOutcome::NoChange`] even after the game ended, a hidden
    /// cell on a finished game is rejected with [`GameError::AlreadyEnded`].
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.grid[coords].revealed {
            log::debug!("Cell {:?} already revealed", coords);
            return Ok(RevealOutcome::NoChange);
        }
        self.check_not_finished()?;

        let was_mine = self.grid.reveal(coords)?;
        log::debug!("Reveal cell at {:?}, mine: {}", coords, was_mine);

        Ok(if was_mine {
            self.triggered_mine = Some(coords);
            self.end_game(false);
            RevealOutcome::HitMine
        } else {
            self.revealed_safe = self.revealed_safe.saturating_add(1);
            if self.is_cleared() {
                self.end_game(true);
                RevealOutcome::Won
            } else {
                RevealOutcome::Revealed
            }
        })
    }

    fn is_cleared(&self) -> bool {
        self.total_safe > 0 && self.revealed_safe >= self.total_safe
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        if won {
            self.status = SessionStatus::Won;
            log::info!("All {} safe cells revealed, game won", self.total_safe);
        } else {
            self.status = SessionStatus::Lost;
            log::info!("Mine hit at {:?}, game lost", self.triggered_mine);
            if self.options.reveal_mines_on_loss {
                self.reveal_mines();
            }
        }
    }

    /// Reveals hidden mines only, safe cells keep their state.
    fn reveal_mines(&mut self) {
        let (x_end, y_end) = self.grid.size();
        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                let cell = self.grid[coords];
                if cell.mine && !cell.revealed {
                    // coords come from the grid's own bounds
                    let _ = self.grid.reveal(coords);
                    log::trace!("Revealed mine at {:?} after loss", coords);
                }
            }
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
