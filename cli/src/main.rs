use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gridsweep_core::{GridGenerator, RandomGridGenerator, Session};

mod play;
mod settings;

use settings::Settings;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Walk a minefield and reveal the tiles under your feet",
    long_about = None
)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width, overrides the settings file
    #[arg(long, allow_negative_numbers = true)]
    size_x: Option<i64>,

    /// Grid height, overrides the settings file
    #[arg(long, allow_negative_numbers = true)]
    size_y: Option<i64>,

    /// Desired number of mines, clamped so the start tile stays safe
    #[arg(short, long, allow_negative_numbers = true)]
    mines: Option<i64>,

    /// Force a seed instead of the clock
    #[arg(short, long)]
    seed: Option<u64>,

    /// Leave the other mines hidden after losing
    #[arg(long)]
    keep_mines_hidden: bool,

    /// Print a JSON summary when the game ends
    #[arg(long)]
    summary_json: bool,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        let grid = &mut settings.grid;
        grid.size_x = self.size_x.unwrap_or(grid.size_x);
        grid.size_y = self.size_y.unwrap_or(grid.size_y);
        grid.mines = self.mines.unwrap_or(grid.mines);
        grid.seed = self.seed.or(grid.seed);
        if self.keep_mines_hidden {
            settings.session.reveal_mines_on_loss = false;
        }
    }
}

fn init_logging(filter: log::LevelFilter) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match filter {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Seed from the wall clock, like rolling a fresh board each launch.
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    args.apply(&mut settings);
    log::debug!("settings: {:?}", settings);

    let seed = settings.grid.seed.unwrap_or_else(clock_seed);
    log::debug!("seed: {}", seed);

    let grid = RandomGridGenerator::new(seed).generate(settings.grid.game_config());
    let session = Session::with_options(grid, settings.session);
    let mut game = play::Game::new(session, &settings);

    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    game.run(stdin, &mut stdout).context("playing the game")?;

    if args.summary_json {
        let summary = serde_json::to_string_pretty(&game.summary(seed))?;
        writeln!(stdout, "{summary}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let args = Args::parse_from([
            "gridsweep",
            "--size-x",
            "9",
            "--mines",
            "-2",
            "--seed",
            "5",
            "--keep-mines-hidden",
        ]);
        let mut settings = Settings::default();

        args.apply(&mut settings);

        assert_eq!(settings.grid.size_x, 9);
        assert_eq!(settings.grid.size_y, 4);
        assert_eq!(settings.grid.mines, -2);
        assert_eq!(settings.grid.game_config().mines, 0);
        assert_eq!(settings.grid.seed, Some(5));
        assert!(!settings.session.reveal_mines_on_loss);
    }

    #[test]
    fn args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
