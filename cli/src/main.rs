use anyhow::Context;
use clap::{Parser, ValueEnum};
use mines_core::*;
use std::io::{self, BufRead, Write};

use command::{Command, HELP};

mod command;
mod render;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::beginner(),
            Self::Intermediate => GameConfig::intermediate(),
            Self::Expert => GameConfig::expert(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board to start from, --width, --height and --mines override parts of it
    #[arg(short, long, value_enum, default_value_t = Preset::Beginner)]
    preset: Preset,

    #[arg(long, value_parser = clap::value_parser!(u8).range(
        i64::from(*WIDTH_RANGE.start())..=i64::from(*WIDTH_RANGE.end())
    ))]
    width: Option<Coord>,

    #[arg(long, value_parser = clap::value_parser!(u8).range(
        i64::from(*HEIGHT_RANGE.start())..=i64::from(*HEIGHT_RANGE.end())
    ))]
    height: Option<Coord>,

    #[arg(short, long, value_parser = clap::value_parser!(u16).range(
        i64::from(*MINES_RANGE.start())..=i64::from(*MINES_RANGE.end())
    ))]
    mines: Option<CellCount>,

    /// Force a seed instead of the clock
    #[arg(short, long)]
    seed: Option<u64>,

    /// Also keep the neighbors of the first revealed tile free of mines
    #[arg(long)]
    safe_zero: bool,

    /// Print every frame as a JSON line instead of a drawn board
    #[arg(long)]
    json: bool,
}

impl Args {
    fn game_config(&self) -> mines_core::Result<GameConfig> {
        let preset = self.preset.config();
        let size = (
            self.width.unwrap_or(preset.size.0),
            self.height.unwrap_or(preset.size.1),
        );
        GameConfig::new(size, self.mines.unwrap_or(preset.mines))
    }

    fn generator(&self) -> RandomMinefieldGenerator {
        let start_tile = if self.safe_zero {
            StartTile::AlwaysZero
        } else {
            StartTile::SimpleSafe
        };
        match self.seed {
            Some(seed) => RandomMinefieldGenerator::new(seed, start_tile),
            None => RandomMinefieldGenerator::from_clock(start_tile),
        }
    }
}

fn draw(out: &mut impl Write, board: &Board, json: bool) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", render::render_json(board)?)?;
    } else {
        write!(out, "{}", render::render_text(board))?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("args: {args:?}");

    let config = args.game_config().context("invalid board configuration")?;
    let mut board = Board::with_generator(config, args.generator());

    let mut out = io::stdout().lock();
    if !args.json {
        writeln!(out, "{HELP}")?;
    }
    draw(&mut out, &board, args.json)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("could not read input")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            command => match command.apply(&mut board) {
                Ok(outcome) => {
                    log::debug!("{command:?}: {outcome:?}");
                    if outcome.has_update() {
                        draw(&mut out, &board, args.json)?;
                    }
                }
                Err(err) => {
                    log::warn!("{command:?} rejected: {err}");
                    writeln!(out, "{err}")?;
                }
            },
        }
    }

    Ok(())
}
