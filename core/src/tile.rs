use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2};

/// What a tile holds, fixed when the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Mine,
    /// Count of adjacent mines, always in `1..=8`.
    Number(u8),
}

impl TileKind {
    /// Kind of a safe tile with `adjacent_mines` mined neighbors.
    pub const fn safe(adjacent_mines: u8) -> Self {
        if adjacent_mines == 0 {
            Self::Empty
        } else {
            Self::Number(adjacent_mines)
        }
    }
}

impl Default for TileKind {
    fn default() -> Self {
        Self::Empty
    }
}

/// One cell of the board.
///
/// `revealed` only ever goes from `false` to `true`. `flagged` is only toggled while the tile is hidden, and
/// `exploded` marks the mine that lost the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x: Coord,
    pub y: Coord,
    pub kind: TileKind,
    pub revealed: bool,
    pub flagged: bool,
    pub exploded: bool,
}

impl Tile {
    pub const fn new((x, y): Coord2) -> Self {
        Self {
            x,
            y,
            kind: TileKind::Empty,
            revealed: false,
            flagged: false,
            exploded: false,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.kind, TileKind::Mine)
    }

    pub const fn is_hidden(&self) -> bool {
        !self.revealed
    }

    /// Adjacent mine count, zero for empty tiles and mines.
    pub const fn adjacent_mines(&self) -> u8 {
        match self.kind {
            TileKind::Number(count) => count,
            TileKind::Empty | TileKind::Mine => 0,
        }
    }

    pub const fn view(&self) -> TileView {
        if !self.revealed {
            return if self.flagged {
                TileView::Flagged
            } else {
                TileView::Hidden
            };
        }

        match self.kind {
            TileKind::Mine if self.exploded => TileView::Exploded,
            TileKind::Mine => TileView::Mine,
            TileKind::Empty => TileView::Empty,
            TileKind::Number(count) => TileView::Number(count),
        }
    }
}

/// Visual category of a tile, for whatever draws the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Exploded,
    Empty,
    Number(u8),
    Mine,
}

impl TileView {
    /// Whether the tile is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}
