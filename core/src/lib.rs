#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use display::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod display;
mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Board dimensions and mine count, validated so mine placement always terminates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// At least one tile must stay free of mines, otherwise the first reveal has nowhere safe to land.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize(size));
        }
        let max = mult(size.0, size.1) - 1;
        if mines == 0 || mines > max {
            return Err(GameError::InvalidMineCount { mines, max });
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn contains(&self, coords: Coord2) -> bool {
        coords.0 < self.size.0 && coords.1 < self.size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Where the mines of one game are, before they are applied to a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (
            x.try_into().unwrap_or(Coord::MAX),
            y.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        NeighborIter::new(coords, self.size())
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Merges the outcomes of opening several tiles in one move.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// What a single input event did to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    NoChange,
    /// Only pressed highlighting or the button indicator changed.
    Visual,
    Mark(MarkOutcome),
    Reveal(RevealOutcome),
    Restarted,
}

impl InputOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Visual => true,
            Self::Mark(outcome) => outcome.has_update(),
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Restarted => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn config_rejects_degenerate_mine_counts() {
        assert_eq!(
            GameConfig::new((3, 3), 9),
            Err(GameError::InvalidMineCount { mines: 9, max: 8 })
        );
        assert_eq!(
            GameConfig::new((3, 3), 0),
            Err(GameError::InvalidMineCount { mines: 0, max: 8 })
        );
        assert_eq!(GameConfig::new((0, 3), 1), Err(GameError::InvalidSize((0, 3))));
        assert_eq!(GameConfig::new((3, 3), 8).map(|c| c.mines), Ok(8));
    }

    #[test]
    fn presets_are_valid() {
        for preset in [GameConfig::beginner(), GameConfig::intermediate(), GameConfig::expert()] {
            assert_eq!(GameConfig::new(preset.size, preset.mines), Ok(preset));
        }
    }

    #[test]
    fn layout_counts_adjacent_mines() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(2, 2), (0, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((1, 2)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 0)), 0);
        assert_eq!(layout.iter_mines().collect::<Vec<_>>(), vec![(0, 2), (2, 2)]);
    }

    #[test]
    fn layout_rejects_out_of_bounds_mines() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn hit_mine_dominates_merged_outcomes() {
        use RevealOutcome::*;
        assert_eq!(Revealed | HitMine, HitMine);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(NoChange | NoChange, NoChange);
        assert_eq!([NoChange, Revealed].into_iter().reduce(BitOr::bitor), Some(Revealed));
    }
}
