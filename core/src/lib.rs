#![no_std]

extern crate alloc;

use alloc::string::ToString;
use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod layout;
mod tile;
mod types;

/// Side length and mine count of a square board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Requires `size >= 1` and `0 < mines < size * size`.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidBoardSize);
        }
        if mines == 0 || mines >= mult(size, size) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    /// Repairs out of range values into the closest playable config, leaving at least one safe tile.
    pub fn clamped(size: Coord, mines: CellCount) -> Self {
        let clamped_size = size.max(1);
        let max_mines = mult(clamped_size, clamped_size) - 1;
        let clamped_mines = mines.max(1).min(max_mines);

        if (clamped_size, clamped_mines) != (size, mines) {
            log::warn!(
                "Board config {}x{} with {} mines is not playable, using {}x{} with {} mines",
                size,
                size,
                mines,
                clamped_size,
                clamped_size,
                clamped_mines
            );
        }
        Self::new_unchecked(clamped_size, clamped_mines)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| GameError::MalformedConfig(err.to_string()))?;
        Self::new(config.size, config.mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 40)
    }

    pub const fn classic() -> Self {
        Self::new_unchecked(20, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(24, 99)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// What a reveal did, the board predicates stay authoritative.
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

/// Merges outcomes of a multi-tile reveal, hitting a mine wins over everything.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_bounds() {
        assert_eq!(BoardConfig::new(4, 1), Ok(BoardConfig::new_unchecked(4, 1)));
        assert_eq!(BoardConfig::new(4, 15), Ok(BoardConfig::new_unchecked(4, 15)));
        assert_eq!(BoardConfig::new(0, 1), Err(GameError::InvalidBoardSize));
        assert_eq!(BoardConfig::new(4, 0), Err(GameError::TooManyMines));
        assert_eq!(BoardConfig::new(4, 16), Err(GameError::TooManyMines));
    }

    #[test]
    fn clamped_keeps_one_safe_tile() {
        assert_eq!(BoardConfig::clamped(3, 100), BoardConfig::new_unchecked(3, 8));
        assert_eq!(BoardConfig::clamped(0, 5), BoardConfig::new_unchecked(1, 0));
        assert_eq!(BoardConfig::clamped(5, 0), BoardConfig::new_unchecked(5, 1));
        assert_eq!(BoardConfig::clamped(9, 10), BoardConfig::beginner());
    }

    #[test]
    fn presets_are_valid() {
        for preset in [
            BoardConfig::beginner(),
            BoardConfig::intermediate(),
            BoardConfig::classic(),
            BoardConfig::expert(),
        ] {
            assert_eq!(BoardConfig::new(preset.size, preset.mines), Ok(preset));
        }
        assert_eq!(BoardConfig::default().safe_cells(), 360);
    }

    #[test]
    fn from_json_parses_and_validates() {
        assert_eq!(
            BoardConfig::from_json(r#"{"size": 9, "mines": 10}"#),
            Ok(BoardConfig::beginner())
        );
        assert_eq!(
            BoardConfig::from_json(r#"{"size": 2, "mines": 4}"#),
            Err(GameError::TooManyMines)
        );
        assert!(matches!(
            BoardConfig::from_json(r#"{"size": 9}"#),
            Err(GameError::MalformedConfig(_))
        ));
    }

    #[test]
    fn reveal_outcomes_merge_by_priority() {
        use RevealOutcome::*;

        assert_eq!(NoChange | NoChange, NoChange);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(Won | HitMine, HitMine);
        assert!(!NoChange.has_update());
        assert!(MarkOutcome::Changed.has_update());
    }
}
