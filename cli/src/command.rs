use anyhow::{Context, anyhow, bail};
use mines_core::*;
use std::str::{FromStr, SplitWhitespace};

pub(crate) const HELP: &str = "\
commands:
  c X Y        click (press and release) a tile
  f X Y        flag a closed tile, or clear around an open one
  p X Y        press a tile and hold
  r X Y        release over the held tile
  o X Y        release away from the held tile
  n            new game
  s W H M      new game with another size and mine count
  h            this help
  q            quit";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Tile(Coord2, TileInput),
    Click(Coord2),
    NewGame,
    Resize(GameConfig),
    Help,
    Quit,
}

impl Command {
    /// Feeds the command to the board as the matching pointer events.
    pub(crate) fn apply(self, board: &mut Board) -> mines_core::Result<InputOutcome> {
        Ok(match self {
            Self::Tile(coords, input) => board.handle_input(coords, input)?,
            Self::Click(coords) => {
                board.handle_input(coords, TileInput::PrimaryPress)?;
                board.handle_input(coords, TileInput::PrimaryRelease)?
            }
            Self::NewGame => {
                board.handle_button(ButtonInput::Press);
                board.handle_button(ButtonInput::Release)
            }
            Self::Resize(config) => {
                board.restart_with(config);
                InputOutcome::Restarted
            }
            Self::Help | Self::Quit => InputOutcome::NoChange,
        })
    }
}

fn parse_num<T: FromStr>(word: Option<&str>, what: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    word.ok_or_else(|| anyhow!("missing {what}"))?
        .parse()
        .with_context(|| format!("invalid {what}"))
}

fn parse_coords(words: &mut SplitWhitespace) -> anyhow::Result<Coord2> {
    Ok((parse_num(words.next(), "x")?, parse_num(words.next(), "y")?))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("empty command, try `h`");
        };

        let command = match name {
            "c" | "click" => Self::Click(parse_coords(&mut words)?),
            "f" | "flag" => Self::Tile(parse_coords(&mut words)?, TileInput::SecondaryOrLongPress),
            "p" | "press" => Self::Tile(parse_coords(&mut words)?, TileInput::PrimaryPress),
            "r" | "release" => Self::Tile(parse_coords(&mut words)?, TileInput::PrimaryRelease),
            "o" | "outside" => Self::Tile(parse_coords(&mut words)?, TileInput::ReleaseOutside),
            "n" | "new" => Self::NewGame,
            "s" | "size" => {
                let (width, height) = parse_coords(&mut words)?;
                let mines = parse_num(words.next(), "mine count")?;
                Self::Resize(GameConfig::new((width, height), mines)?)
            }
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" => Self::Quit,
            other => bail!("unknown command `{other}`, try `h`"),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tile_commands() {
        assert_eq!("c 3 4".parse::<Command>().unwrap(), Command::Click((3, 4)));
        assert_eq!(
            "flag 0 8".parse::<Command>().unwrap(),
            Command::Tile((0, 8), TileInput::SecondaryOrLongPress)
        );
        assert_eq!(
            "  o 1 1 ".parse::<Command>().unwrap(),
            Command::Tile((1, 1), TileInput::ReleaseOutside)
        );
    }

    #[test]
    fn parses_resize_through_config_validation() {
        assert_eq!(
            "s 16 16 40".parse::<Command>().unwrap(),
            Command::Resize(GameConfig::intermediate())
        );
        assert!("s 3 3 9".parse::<Command>().is_err());
    }

    #[test]
    fn rejects_bad_input() {
        assert!("".parse::<Command>().is_err());
        assert!("c 1".parse::<Command>().is_err());
        assert!("c 1 -2".parse::<Command>().is_err());
        assert!("jump 1 2".parse::<Command>().is_err());
    }

    #[test]
    fn click_reveals_through_board_input() {
        let layout = MineLayout::from_mine_coords((3, 1), &[(2, 0)]).unwrap();
        let mut board = Board::with_layout(layout);

        let outcome = Command::Click((1, 0)).apply(&mut board).unwrap();

        assert_eq!(outcome, InputOutcome::Reveal(RevealOutcome::Revealed));
        assert!(board.tile_at((1, 0)).open);
    }

    #[test]
    fn new_game_goes_through_button() {
        let layout = MineLayout::from_mine_coords((2, 1), &[(0, 0)]).unwrap();
        let mut board = Board::with_layout(layout);
        Command::Click((0, 0)).apply(&mut board).unwrap();
        assert_eq!(board.state(), GameState::Lost);

        assert_eq!(Command::NewGame.apply(&mut board).unwrap(), InputOutcome::Restarted);
        assert_eq!(board.state(), GameState::Waiting);
    }
}
