//! Host-side collaborators around a [`gridsweep_core::Session`]: where cells sit in the world, how the
//! player moves across them, and the trigger that reveals the cell under the player.

pub use layout::*;
pub use motion::*;
pub use trigger::*;

mod layout;
mod motion;
mod trigger;

use serde::{Deserialize, Serialize};

/// A point on the board plane, in world units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

pub(crate) fn is_nearly_zero(value: f32) -> bool {
    value.abs() <= 1e-8
}
