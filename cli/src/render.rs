use mines_core::*;
use serde::Serialize;
use std::fmt::Write;

pub(crate) const fn glyph(icon: Icon) -> char {
    use Icon::*;
    match icon {
        Open(0) | Pressed => '.',
        Open(count) => (b'0' + count) as char,
        Closed => '#',
        Flag => 'F',
        Bomb => '*',
        WrongFlag => 'X',
        Exploded => '@',
    }
}

pub(crate) const fn face(button: ButtonState) -> &'static str {
    match button {
        ButtonState::Playing => ":)",
        ButtonState::Evaluating => ":o",
        ButtonState::Lost => "x(",
        ButtonState::Won => "B)",
        ButtonState::Pressed => "(:",
    }
}

/// Everything a frame shows, in a form other programs can consume.
#[derive(Debug, Serialize)]
pub(crate) struct Frame {
    state: GameState,
    button: ButtonState,
    flags: i32,
    elapsed: u32,
    /// Sprite frame per tile, one row per `y`.
    tiles: Vec<Vec<u8>>,
}

impl Frame {
    pub(crate) fn capture(board: &Board) -> Self {
        let (width, height) = board.size();
        let tiles = (0..height)
            .map(|y| (0..width).map(|x| board.icon_at((x, y)).frame()).collect())
            .collect();
        Self {
            state: board.state(),
            button: board.button_state(),
            flags: board.flags_display(),
            elapsed: board.elapsed_secs(),
            tiles,
        }
    }
}

/// Counter, face and timer on top, then the grid with axis labels every 5 tiles.
pub(crate) fn render_text(board: &Board) -> String {
    let (width, height) = board.size();
    let mut out = String::new();

    let flags = format_counter(board.flags_display());
    let elapsed = format_counter(board.elapsed_secs() as i32);
    let gap = (usize::from(width) * 2).saturating_sub(6).max(2);
    let _ = writeln!(out, "    {flags}{face:^gap$}{elapsed}", face = face(board.button_state()));

    out.push_str("   ");
    for x in 0..width {
        if x % 5 == 0 {
            let _ = write!(out, "{x:<2}");
        } else {
            out.push_str("  ");
        }
    }
    out.push('\n');

    for y in 0..height {
        let _ = write!(out, "{y:>3}");
        for x in 0..width {
            out.push(' ');
            out.push(glyph(board.icon_at((x, y))));
        }
        out.push('\n');
    }
    out
}

pub(crate) fn render_json(board: &Board) -> serde_json::Result<String> {
    serde_json::to_string(&Frame::capture(board))
}
