use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::bail;
use gridsweep_core::{Coord2, Session, SessionStatus, Symbol};
use gridsweep_host::{
    Axis, BoardLayout, Motion, Notice, Presenter, TriggerOutcome, WorldPos, reveal_under,
};
use serde::Serialize;

use crate::settings::{PlaySettings, Settings};

const HELP: &str = "w/a/s/d: move, r: reveal under you, p: show board, h: help, q: quit";

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Move(Axis, f32),
    Reveal,
    Print,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "w" | "up" => Self::Move(Axis::Y, -1.0),
            "s" | "down" => Self::Move(Axis::Y, 1.0),
            "a" | "left" => Self::Move(Axis::X, -1.0),
            "d" | "right" => Self::Move(Axis::X, 1.0),
            "r" | "e" | "space" | "reveal" => Self::Reveal,
            "p" | "print" => Self::Print,
            "h" | "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command {other:?}"),
        })
    }
}

/// Collects presenter output as text lines.
#[derive(Debug, Default)]
pub struct TextFeed {
    lines: Vec<String>,
}

impl TextFeed {
    pub fn drain(&mut self) -> impl Iterator<Item = String> + '_ {
        self.lines.drain(..)
    }
}

impl Presenter for TextFeed {
    fn cell_revealed(&mut self, (x, y): Coord2, symbol: Symbol) {
        self.lines.push(format!("({x}, {y}): {symbol}"));
    }

    fn notice(&mut self, notice: Notice) {
        self.lines.push(notice.to_string());
    }
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub status: SessionStatus,
    pub revealed_safe: u16,
    pub total_safe: u16,
    pub mines: u16,
    pub seed: u64,
}

/// A terminal playthrough: the session plus the player walking over the board.
pub struct Game {
    session: Session,
    layout: BoardLayout,
    motion: Motion,
    position: WorldPos,
    play: PlaySettings,
    feed: TextFeed,
}

impl Game {
    pub fn new(session: Session, settings: &Settings) -> Self {
        let layout = BoardLayout::new(WorldPos::default(), session.size(), settings.layout);
        let position = session
            .grid()
            .start()
            .map(|start| layout.position_of(start))
            .unwrap_or_default();

        Self {
            session,
            layout,
            motion: Motion::new(settings.motion.into()),
            position,
            play: settings.play.clone(),
            feed: TextFeed::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn position(&self) -> WorldPos {
        self.position
    }

    pub fn summary(&self, seed: u64) -> Summary {
        Summary {
            status: self.session.status(),
            revealed_safe: self.session.revealed_safe(),
            total_safe: self.session.total_safe(),
            mines: self.session.total_mines(),
            seed,
        }
    }

    /// Reads commands line by line until quit, end of input, or the game ends.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        writeln!(out, "{HELP}")?;
        self.render(out)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            };
            log::trace!("Command {:?}", command);

            match command {
                Command::Move(axis, value) => {
                    self.walk(axis, value);
                    self.render(out)?;
                }
                Command::Reveal => {
                    let outcome = self.reveal();
                    for line in self.feed.drain() {
                        writeln!(out, "{line}")?;
                    }
                    if matches!(outcome, TriggerOutcome::Revealed(_)) {
                        self.render(out)?;
                    }
                }
                Command::Print => self.render(out)?,
                Command::Help => writeln!(out, "{HELP}")?,
                Command::Quit => break,
            }

            if self.session.is_finished() {
                break;
            }
        }

        Ok(())
    }

    /// Holds `axis` for the configured time, then lets the player settle.
    pub fn walk(&mut self, axis: Axis, value: f32) {
        let dt = self.play.dt();
        for _ in 0..self.play.hold_ticks() {
            self.motion.apply_axis(axis, value);
            self.position = self.motion.tick(self.position, dt);
        }
        // without deceleration the player would drift forever
        for _ in 0..self.play.settle_ticks() {
            if self.motion.is_at_rest() {
                break;
            }
            self.position = self.motion.tick(self.position, dt);
        }
        self.motion.stop();
        log::debug!(
            "Player at {:?}, over {:?}",
            self.position,
            self.layout.cell_under(self.position)
        );
    }

    pub fn reveal(&mut self) -> TriggerOutcome {
        reveal_under(&mut self.session, &self.layout, self.position, &mut self.feed)
    }

    pub fn render<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let (size_x, size_y) = self.session.size();
        let player = self.layout.cell_under(self.position);

        for y in 0..size_y {
            let mut row = String::with_capacity(usize::from(size_x) * 3);
            for x in 0..size_x {
                let shown = self
                    .session
                    .visible_symbol((x, y))
                    .map_or_else(|| "#".to_string(), |symbol| symbol.to_string());
                if player == Some((x, y)) {
                    row.push_str(&format!("[{shown}]"));
                } else {
                    row.push_str(&format!(" {shown} "));
                }
            }
            writeln!(out, "{}", row.trim_end())?;
        }

        match player {
            Some((x, y)) => writeln!(out, "You stand on ({x}, {y})."),
            None => writeln!(
                out,
                "You stand between tiles at ({:.0}, {:.0}).",
                self.position.x, self.position.y
            ),
        }
    }
}
