use core::fmt;

use gridsweep_core::{Coord2, RevealOutcome, Session, Symbol};

use crate::{BoardLayout, WorldPos};

/// Feedback that is not tied to a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    NoTile,
    AlreadyRevealed,
    SessionOver,
    Lost,
    Won,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoTile => "No tile under player to reveal.",
            Self::AlreadyRevealed => "Tile already revealed.",
            Self::SessionOver => "The game is over, no more tiles can be revealed.",
            Self::Lost => "You revealed a mine! You lose.",
            Self::Won => "You revealed all safe tiles! You win!",
        })
    }
}

/// Renders what the player learns from a reveal.
pub trait Presenter {
    fn cell_revealed(&mut self, coords: Coord2, symbol: Symbol);

    fn notice(&mut self, notice: Notice);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The session was not touched.
    Ignored(Notice),
    Revealed(RevealOutcome),
}

/// Reveals the cell under `position`, if any, and reports the result to `presenter`.
pub fn reveal_under<P: Presenter + ?Sized>(
    session: &mut Session,
    layout: &BoardLayout,
    position: WorldPos,
    presenter: &mut P,
) -> TriggerOutcome {
    let ignore = |presenter: &mut P, notice: Notice| {
        presenter.notice(notice);
        TriggerOutcome::Ignored(notice)
    };

    if session.is_finished() {
        return ignore(presenter, Notice::SessionOver);
    }

    let Some(coords) = layout.cell_under(position) else {
        log::debug!("Nothing under {:?}", position);
        return ignore(presenter, Notice::NoTile);
    };

    match session.cell(coords) {
        Ok(cell) if cell.revealed => return ignore(presenter, Notice::AlreadyRevealed),
        Ok(_) => {}
        Err(err) => {
            log::warn!("Layout resolved {:?} outside the grid: {}", coords, err);
            return ignore(presenter, Notice::NoTile);
        }
    }

    let outcome = match session.reveal(coords) {
        Ok(outcome) => outcome,
        Err(err) => {
            log::warn!("Reveal at {:?} rejected: {}", coords, err);
            return ignore(presenter, Notice::SessionOver);
        }
    };

    if let Some(symbol) = session.visible_symbol(coords) {
        presenter.cell_revealed(coords, symbol);
    }

    match outcome {
        RevealOutcome::HitMine => {
            let mines = session
                .grid()
                .iter_cells()
                .filter(|&(pos, cell)| cell.mine && cell.revealed && pos != coords);
            for (pos, cell) in mines {
                presenter.cell_revealed(pos, cell.symbol());
            }
            presenter.notice(Notice::Lost);
        }
        RevealOutcome::Won => presenter.notice(Notice::Won),
        RevealOutcome::Revealed | RevealOutcome::NoChange => {}
    }

    TriggerOutcome::Revealed(outcome)
}
