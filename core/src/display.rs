use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::{GameState, Tile};

/// Lowest value the three digit counters can show.
pub const COUNTER_MIN: i32 = -99;

/// Highest value the three digit counters can show.
pub const COUNTER_MAX: i32 = 999;

/// Artwork a presentation layer should draw for a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    /// Opened tile with its adjacent mine count, 0 is drawn empty.
    Open(u8),
    Closed,
    /// Closed tile held down under the pointer, drawn like an empty open tile.
    Pressed,
    Flag,
    /// Unflagged mine shown after losing.
    Bomb,
    /// Flag on a tile without a mine, shown after losing.
    WrongFlag,
    /// The mine that lost the game.
    Exploded,
}

impl Icon {
    /// Picks the icon for `tile` given the overall game state.
    pub const fn select(tile: Tile, state: GameState) -> Self {
        use Icon::*;

        if tile.open {
            return if tile.bomb { Exploded } else { Open(tile.number) };
        }

        match state {
            GameState::Waiting | GameState::Playing => {
                if tile.marked {
                    Flag
                } else if tile.pressed {
                    Pressed
                } else {
                    Closed
                }
            }
            GameState::Won => {
                if tile.marked || tile.bomb {
                    Flag
                } else {
                    Closed
                }
            }
            GameState::Lost => match (tile.marked, tile.bomb) {
                (true, true) => Flag,
                (true, false) => WrongFlag,
                (false, true) => Bomb,
                (false, false) => Closed,
            },
        }
    }

    /// Frame index in the classic sprite sheet: numbers 0-8, then closed, opened, bomb, flag,
    /// wrong flag and exploded bomb.
    pub const fn frame(self) -> u8 {
        use Icon::*;
        match self {
            Open(count) => count,
            Closed => 9,
            Pressed => 0,
            Bomb => 11,
            Flag => 12,
            WrongFlag => 13,
            Exploded => 14,
        }
    }
}

/// Formats a value for a three digit counter, clamping to what fits.
pub fn format_counter(num: i32) -> String {
    match num {
        ..COUNTER_MIN => format!("{COUNTER_MIN}"),
        COUNTER_MIN..0 => format!("-{:02}", -num),
        0..=COUNTER_MAX => format!("{num:03}"),
        _ => format!("{COUNTER_MAX}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(open: bool, marked: bool, bomb: bool) -> Tile {
        Tile {
            open,
            marked,
            bomb,
            ..Default::default()
        }
    }

    #[test]
    fn counter_formatting_clamps() {
        assert_eq!(format_counter(-150), "-99");
        assert_eq!(format_counter(-99), "-99");
        assert_eq!(format_counter(-7), "-07");
        assert_eq!(format_counter(0), "000");
        assert_eq!(format_counter(42), "042");
        assert_eq!(format_counter(999), "999");
        assert_eq!(format_counter(1234), "999");
    }

    #[test]
    fn playing_icons() {
        let state = GameState::Playing;
        assert_eq!(Icon::select(tile(false, false, true), state), Icon::Closed);
        assert_eq!(Icon::select(tile(false, true, false), state), Icon::Flag);
        assert_eq!(
            Icon::select(Tile { number: 3, ..tile(true, false, false) }, state),
            Icon::Open(3)
        );
        assert_eq!(
            Icon::select(Tile { pressed: true, ..tile(false, false, false) }, state),
            Icon::Pressed
        );
        assert_eq!(
            Icon::select(Tile { pressed: true, ..tile(false, true, false) }, state),
            Icon::Flag
        );
    }

    #[test]
    fn lost_icons_reveal_answers() {
        let state = GameState::Lost;
        assert_eq!(Icon::select(tile(true, false, true), state), Icon::Exploded);
        assert_eq!(Icon::select(tile(false, false, true), state), Icon::Bomb);
        assert_eq!(Icon::select(tile(false, true, true), state), Icon::Flag);
        assert_eq!(Icon::select(tile(false, true, false), state), Icon::WrongFlag);
        assert_eq!(Icon::select(tile(false, false, false), state), Icon::Closed);
    }

    #[test]
    fn won_icons_flag_every_mine() {
        let state = GameState::Won;
        assert_eq!(Icon::select(tile(false, false, true), state), Icon::Flag);
        assert_eq!(Icon::select(tile(false, true, true), state), Icon::Flag);
    }

    #[test]
    fn frames_match_sprite_sheet() {
        assert_eq!(Icon::Open(0).frame(), Icon::Pressed.frame());
        assert_eq!(Icon::Open(8).frame(), 8);
        assert_eq!(Icon::Closed.frame(), 9);
        assert_eq!(Icon::Exploded.frame(), 14);
    }
}
