use super::*;

/// Hands out the same predetermined layout every game, for replays and tests.
///
/// The start tile is not protected: revealing a predetermined mine first loses immediately.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    layout: MineLayout,
}

impl FixedMinefieldGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(&mut self, config: GameConfig, start: Coord2) -> Result<MineLayout> {
        if self.layout.game_config() != config {
            return Err(GameError::LayoutMismatch);
        }
        if self.layout.contains_mine(config.validate_coords(start)?) {
            log::warn!("fixed layout has a mine on start tile {start:?}");
        }
        Ok(self.layout.clone())
    }
}
