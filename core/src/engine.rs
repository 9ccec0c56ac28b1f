use alloc::boxed::Box;
use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - Waiting -> Playing
/// - Playing -> Won
/// - Playing -> Lost
///
/// Only a restart goes back to Waiting.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// No tile revealed yet, mines are not placed
    #[default]
    Waiting,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_waiting(self) -> bool {
        matches!(self, Self::Waiting)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Face shown on the restart button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonState {
    #[default]
    Playing,
    /// A tile is held down and will be evaluated on release.
    Evaluating,
    Lost,
    Won,
    /// The button itself is held down.
    Pressed,
}

impl ButtonState {
    /// Frame index in the classic sprite sheet.
    pub const fn frame(self) -> u8 {
        self as u8
    }
}

/// Pointer events a presentation layer forwards for the tile under the pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileInput {
    PrimaryPress,
    /// Right click or a held touch, flags closed tiles and clears around open ones.
    SecondaryOrLongPress,
    PrimaryRelease,
    /// The primary button was released after the pointer left the pressed tile.
    ReleaseOutside,
}

/// Pointer events on the restart button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonInput {
    Press,
    Release,
    ReleaseOutside,
}

/// Whether mines exist yet; they are placed by the first reveal of each game.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Minefield {
    Unseeded,
    Seeded { started_at: Instant },
}

/// The game board from restart to win or loss.
#[derive(Debug)]
pub struct Board {
    config: GameConfig,
    tiles: Array2<Tile>,
    remaining_flags: i32,
    closed_count: CellCount,
    state: GameState,
    button: ButtonState,
    minefield: Minefield,
    ended_at: Option<Instant>,
    /// Tile the primary button went down on, until it is released anywhere.
    held: Option<Coord2>,
    generator: Box<dyn MinefieldGenerator>,
}

impl Board {
    /// Board with clock-seeded random mines that only protect the first revealed tile.
    pub fn new(config: GameConfig) -> Self {
        Self::with_generator(config, RandomMinefieldGenerator::default())
    }

    pub fn with_generator(config: GameConfig, generator: impl MinefieldGenerator + 'static) -> Self {
        let mut board = Self {
            config,
            tiles: Array2::default(config.size.to_nd_index()),
            remaining_flags: 0,
            closed_count: 0,
            state: GameState::Waiting,
            button: ButtonState::Playing,
            minefield: Minefield::Unseeded,
            ended_at: None,
            held: None,
            generator: Box::new(generator),
        };
        board.restart();
        board
    }

    /// Board whose mines are exactly `layout`, the first reveal is not protected.
    pub fn with_layout(layout: MineLayout) -> Self {
        Self::with_generator(layout.game_config(), FixedMinefieldGenerator::new(layout))
    }

    /// Starts over with the current configuration.
    pub fn restart(&mut self) {
        let config = self.config;
        self.tiles = Array2::default(config.size.to_nd_index());
        self.remaining_flags = config.mines.into();
        self.closed_count = config.total_tiles();
        self.state = GameState::Waiting;
        self.button = ButtonState::Playing;
        self.minefield = Minefield::Unseeded;
        self.ended_at = None;
        self.held = None;
        log::debug!("restart {:?} with {} mines", config.size, config.mines);
    }

    /// Starts over with a different size or mine count.
    pub fn restart_with(&mut self, config: GameConfig) {
        self.config = config;
        self.restart();
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn button_state(&self) -> ButtonState {
        self.button
    }

    pub fn closed_count(&self) -> CellCount {
        self.closed_count
    }

    /// Mines minus flags placed, negative when over-flagged.
    pub fn remaining_flags(&self) -> i32 {
        self.remaining_flags
    }

    /// # Panics
    ///
    /// If `coords` is outside the board.
    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.tiles[coords.to_nd_index()]
    }

    /// # Panics
    ///
    /// If `coords` is outside the board.
    pub fn icon_at(&self, coords: Coord2) -> Icon {
        Icon::select(self.tile_at(coords), self.state)
    }

    /// Value for the mines-left counter, 0 once the game is won.
    pub fn flags_display(&self) -> i32 {
        if matches!(self.state, GameState::Won) {
            0
        } else {
            self.remaining_flags.clamp(COUNTER_MIN, COUNTER_MAX)
        }
    }

    /// Seconds since the first reveal, frozen when the game ends.
    pub fn elapsed_secs(&self) -> u32 {
        match self.minefield {
            Minefield::Unseeded => 0,
            Minefield::Seeded { started_at } => {
                let end = self.ended_at.unwrap_or_else(Instant::now);
                let secs = end.duration_since(started_at).as_secs();
                secs.min(COUNTER_MAX as u64) as u32
            }
        }
    }

    /// Dispatches a pointer event on the tile at `coords`.
    pub fn handle_input(&mut self, coords: Coord2, input: TileInput) -> Result<InputOutcome> {
        let coords = self.config.validate_coords(coords)?;
        self.check_not_finished()?;
        log::trace!("{input:?} at {coords:?}");

        Ok(match input {
            TileInput::PrimaryPress => {
                if self.tiles[coords.to_nd_index()].marked {
                    InputOutcome::NoChange
                } else {
                    self.button = ButtonState::Evaluating;
                    self.release_preview(coords);
                    self.held = Some(coords);
                    self.press_preview(coords);
                    InputOutcome::Visual
                }
            }
            TileInput::SecondaryOrLongPress => {
                self.release_preview(coords);
                self.chord(coords)?
            }
            TileInput::PrimaryRelease => {
                self.button = ButtonState::Playing;
                let tile = self.tiles[coords.to_nd_index()];
                self.release_preview(coords);
                if tile.open {
                    InputOutcome::Reveal(self.auto_clear(coords)?)
                } else if tile.pressed {
                    InputOutcome::Reveal(self.reveal(coords)?)
                } else {
                    InputOutcome::Visual
                }
            }
            TileInput::ReleaseOutside => {
                self.button = ButtonState::Playing;
                self.release_preview(coords);
                InputOutcome::Visual
            }
        })
    }

    /// Dispatches a pointer event on the restart button.
    pub fn handle_button(&mut self, input: ButtonInput) -> InputOutcome {
        match input {
            ButtonInput::Press => {
                self.button = ButtonState::Pressed;
                InputOutcome::Visual
            }
            ButtonInput::Release | ButtonInput::ReleaseOutside
                if matches!(self.button, ButtonState::Pressed) =>
            {
                self.restart();
                InputOutcome::Restarted
            }
            ButtonInput::Release | ButtonInput::ReleaseOutside => InputOutcome::NoChange,
        }
    }

    /// Flags a closed tile or clears around an open one, depending on the tile.
    pub fn chord(&mut self, coords: Coord2) -> Result<InputOutcome> {
        let coords = self.begin_move(coords)?;

        let outcome = if self.tiles[coords.to_nd_index()].open {
            InputOutcome::Reveal(self.clear_neighbors(coords))
        } else {
            InputOutcome::Mark(self.flip_flag(coords))
        };

        Ok(match (outcome, self.settle()) {
            (InputOutcome::Reveal(_), true) => InputOutcome::Reveal(RevealOutcome::Won),
            (outcome, _) => outcome,
        })
    }

    /// Plain reveal, with flood fill through tiles without adjacent mines.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.begin_move(coords)?;
        let outcome = self.open_tiles(coords);
        Ok(self.settle_reveal(outcome))
    }

    /// Reveals every unflagged neighbor of an open tile once its flag count is satisfied.
    pub fn auto_clear(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.begin_move(coords)?;
        let outcome = self.clear_neighbors(coords);
        Ok(self.settle_reveal(outcome))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.begin_move(coords)?;
        let outcome = self.flip_flag(coords);
        self.settle();
        Ok(outcome)
    }

    /// Shared entry for every move, places mines on the first one.
    fn begin_move(&mut self, coords: Coord2) -> Result<Coord2> {
        let coords = self.config.validate_coords(coords)?;
        self.check_not_finished()?;

        if let Minefield::Unseeded = self.minefield {
            let layout = self.generator.generate(self.config, coords)?;
            self.place_mines(&layout)?;
            let started_at = Instant::now();
            self.minefield = Minefield::Seeded { started_at };
            self.state = GameState::Playing;
            log::debug!("started at {coords:?}");
        }

        Ok(coords)
    }

    fn place_mines(&mut self, layout: &MineLayout) -> Result<()> {
        if layout.game_config() != self.config {
            return Err(GameError::LayoutMismatch);
        }

        for coords in layout.iter_mines() {
            self.tiles[coords.to_nd_index()].bomb = true;
        }
        for coords in layout.iter_mines() {
            for pos in self.neighbors(coords) {
                let tile = &mut self.tiles[pos.to_nd_index()];
                if !tile.bomb {
                    tile.number += 1;
                }
            }
        }
        Ok(())
    }

    fn flip_flag(&mut self, coords: Coord2) -> MarkOutcome {
        let tile = &mut self.tiles[coords.to_nd_index()];
        if tile.open {
            return MarkOutcome::NoChange;
        }

        tile.marked = !tile.marked;
        if tile.marked {
            self.remaining_flags -= 1;
            MarkOutcome::Flagged
        } else {
            self.remaining_flags += 1;
            MarkOutcome::Unflagged
        }
    }

    fn clear_neighbors(&mut self, coords: Coord2) -> RevealOutcome {
        let tile = self.tiles[coords.to_nd_index()];
        if !tile.open {
            return RevealOutcome::NoChange;
        }

        let flagged = self
            .neighbors(coords)
            .filter(|&pos| self.tiles[pos.to_nd_index()].marked)
            .count();
        if flagged != usize::from(tile.number) {
            return RevealOutcome::NoChange;
        }

        let mut outcome = RevealOutcome::NoChange;
        for pos in self.neighbors(coords) {
            outcome = outcome | self.open_tiles(pos);
            if matches!(outcome, RevealOutcome::HitMine) {
                break;
            }
        }
        outcome
    }

    /// Opens `coords` and floods outward through zero tiles using a work-list.
    fn open_tiles(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.tiles[coords.to_nd_index()].is_openable() {
            return RevealOutcome::NoChange;
        }

        let mut to_visit = VecDeque::from([coords]);
        while let Some(visit_coords) = to_visit.pop_front() {
            let tile = &mut self.tiles[visit_coords.to_nd_index()];
            // queued twice from different zero tiles, or flagged
            if !tile.is_openable() {
                continue;
            }

            tile.open = true;
            let Tile { bomb, number, .. } = *tile;
            self.closed_count -= 1;

            if bomb {
                self.lose(visit_coords);
                return RevealOutcome::HitMine;
            }

            log::trace!("opened {visit_coords:?}, mine count: {number}");
            if number == 0 {
                let neighbors = self.neighbors(visit_coords);
                to_visit.extend(neighbors.filter(|&pos| self.tiles[pos.to_nd_index()].is_openable()));
            }
        }

        RevealOutcome::Revealed
    }

    fn press_preview(&mut self, coords: Coord2) {
        let open = self.tiles[coords.to_nd_index()].open;
        self.tiles[coords.to_nd_index()].pressed = true;
        if open {
            for pos in self.neighbors(coords) {
                let tile = &mut self.tiles[pos.to_nd_index()];
                if !tile.marked {
                    tile.pressed = true;
                }
            }
        }
    }

    fn clear_preview(&mut self, coords: Coord2) {
        for pos in NeighborIter::with_center(coords, self.config.size) {
            self.tiles[pos.to_nd_index()].pressed = false;
        }
    }

    /// Clears the highlight around the held tile and around `coords`.
    fn release_preview(&mut self, coords: Coord2) {
        if let Some(held) = self.held.take() {
            self.clear_preview(held);
        }
        self.clear_preview(coords);
    }

    fn lose(&mut self, coords: Coord2) {
        log::debug!("hit mine at {coords:?}");
        self.state = GameState::Lost;
        self.button = ButtonState::Lost;
        self.ended_at = Some(Instant::now());
    }

    /// Moves to Won once only mines remain closed.
    fn settle(&mut self) -> bool {
        if matches!(self.state, GameState::Playing) && self.closed_count == self.config.mines {
            log::debug!("won with {} flags left", self.remaining_flags);
            self.state = GameState::Won;
            self.button = ButtonState::Won;
            self.ended_at = Some(Instant::now());
            true
        } else {
            false
        }
    }

    fn settle_reveal(&mut self, outcome: RevealOutcome) -> RevealOutcome {
        if self.settle() {
            RevealOutcome::Won
        } else {
            outcome
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.config.size)
    }
}
