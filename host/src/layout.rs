use gridsweep_core::{Coord, Coord2};
use serde::{Deserialize, Serialize};

use crate::WorldPos;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Minimum distance between cell centers.
    pub spacing: f32,
    /// Gap kept between neighboring tiles.
    pub extra_padding: f32,
    /// Side length of a tile's square footprint.
    pub tile_size: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            spacing: 200.0,
            extra_padding: 2.0,
            tile_size: 198.0,
        }
    }
}

/// Places the cells of a grid on the board plane, cell `(0, 0)` centered on `origin`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoardLayout {
    origin: WorldPos,
    size: Coord2,
    step: (f32, f32),
    tile_size: f32,
}

impl BoardLayout {
    pub fn new(origin: WorldPos, size: Coord2, settings: LayoutSettings) -> Self {
        let tile_size = settings.tile_size.max(0.0);
        // tiles never overlap, whatever the configured spacing
        let step = settings.spacing.max(tile_size + settings.extra_padding.max(0.0));
        Self {
            origin,
            size,
            step: (step, step),
            tile_size,
        }
    }

    pub fn origin(&self) -> WorldPos {
        self.origin
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    /// Distance between neighboring cell centers along x and y.
    pub fn step(&self) -> (f32, f32) {
        self.step
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Center of the cell at `coords`.
    pub fn position_of(&self, (x, y): Coord2) -> WorldPos {
        WorldPos::new(
            self.origin.x + f32::from(x) * self.step.0,
            self.origin.y + f32::from(y) * self.step.1,
        )
    }

    /// The cell whose footprint contains `pos`, `None` over gaps or off the board.
    pub fn cell_under(&self, pos: WorldPos) -> Option<Coord2> {
        let x = Self::axis_cell(pos.x - self.origin.x, self.step.0, self.size.0)?;
        let y = Self::axis_cell(pos.y - self.origin.y, self.step.1, self.size.1)?;

        let center = self.position_of((x, y));
        let half = self.tile_size / 2.0;
        if (pos.x - center.x).abs() <= half && (pos.y - center.y).abs() <= half {
            Some((x, y))
        } else {
            None
        }
    }

    fn axis_cell(offset: f32, step: f32, len: Coord) -> Option<Coord> {
        if step <= 0.0 || !offset.is_finite() {
            return None;
        }
        let index = (offset / step).round();
        if index < 0.0 || index >= f32::from(len) {
            return None;
        }
        Some(index as Coord)
    }
}
