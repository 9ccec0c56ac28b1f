use serde::{Deserialize, Serialize};

/// One cell of the board as the engine tracks it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub open: bool,
    /// Flagged by the player.
    pub marked: bool,
    pub bomb: bool,
    /// Held down under the pointer, only affects how a closed tile is drawn.
    pub pressed: bool,
    /// Adjacent bombs, always 0 on bomb tiles.
    pub number: u8,
}

impl Tile {
    pub const fn is_closed(self) -> bool {
        !self.open
    }

    /// Closed and not flagged, the only tiles a plain reveal will open.
    pub const fn is_openable(self) -> bool {
        !self.open && !self.marked
    }
}
