use core::fmt;
use serde::{Deserialize, Serialize};

/// State of one grid cell.
///
/// `mine` and `start` never change after generation, `revealed` flips to `true` at most once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mine: bool,
    /// Mines among the in-bounds neighbors, left at 0 for mine cells.
    pub adjacent_mines: u8,
    pub start: bool,
    pub revealed: bool,
}

impl Cell {
    pub const fn symbol(self) -> Symbol {
        if self.mine {
            Symbol::Mine
        } else if self.start {
            Symbol::Start
        } else if self.adjacent_mines == 0 {
            Symbol::Empty
        } else {
            Symbol::Count(self.adjacent_mines)
        }
    }
}

/// What a presentation layer shows for a revealed cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    Mine,
    Start,
    Empty,
    Count(u8),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mine => f.write_str("X"),
            Self::Start => f.write_str("-"),
            Self::Empty => f.write_str("_"),
            Self::Count(count) => write!(f, "{count}"),
        }
    }
}
