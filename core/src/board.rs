use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Game state as observed through [`Board::check_win`] and [`Board::check_lose`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    Playing,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Square grid of tiles for one game, indexed by `(x, y)`.
///
/// The board never refuses a move, callers check [`Board::state`] after each mutation and stop forwarding input
/// once the game is over.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    tiles: Array2<Tile>,
    size: Coord,
    mine_count: CellCount,
    flagged_count: CellCount,
    revealed_safe_count: CellCount,
    revealed_mine_count: CellCount,
}

impl Board {
    /// New board with `mines` randomly placed mines.
    ///
    /// `size` must be at least 1 and `mines` in `1..size * size`; other values are clamped into a playable board.
    pub fn create(size: Coord, mines: CellCount) -> Self {
        Self::with_generator(
            BoardConfig::new_unchecked(size, mines),
            RandomMinefieldGenerator::from_entropy(),
        )
    }

    pub fn with_generator(config: BoardConfig, generator: impl MinefieldGenerator) -> Self {
        Self::from_layout(&generator.generate(config))
    }

    pub fn from_layout(layout: &MineLayout) -> Self {
        let size = layout.size();
        let tiles = Array2::from_shape_fn(square(size).to_nd_index(), |(x, y)| {
            // shape comes from a `Coord` sized layout
            let coords = (x as Coord, y as Coord);
            Tile {
                kind: layout.kind_at(coords),
                ..Tile::new(coords)
            }
        });
        log::debug!(
            "Created {0}x{0} board with {1} mines",
            size,
            layout.mine_count()
        );

        Self {
            tiles,
            size,
            mine_count: layout.mine_count(),
            flagged_count: 0,
            revealed_safe_count: 0,
            revealed_mine_count: 0,
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines not yet accounted for by a flag, negative when there are more flags than mines.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count as isize)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        mult(self.size, self.size) - self.mine_count
    }

    pub fn tile(&self, coords: Coord2) -> Option<&Tile> {
        self.tiles.get(coords.to_nd_index())
    }

    pub fn view_at(&self, coords: Coord2) -> Option<TileView> {
        self.tile(coords).map(Tile::view)
    }

    /// Every tile, `x` major.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, square(self.size))
    }

    pub fn state(&self) -> BoardState {
        if self.check_lose() {
            BoardState::Lost
        } else if self.check_win() {
            BoardState::Won
        } else {
            BoardState::Playing
        }
    }

    /// Every tile that is not a mine has been revealed, flags are not considered.
    pub fn check_win(&self) -> bool {
        self.revealed_safe_count == self.safe_cell_count()
    }

    /// At least one mine has been revealed.
    pub fn check_lose(&self) -> bool {
        self.revealed_mine_count > 0
    }

    /// Reveals a hidden tile, flood filling through tiles without adjacent mines.
    ///
    /// A flagged tile is revealed all the same and loses its flag.
    pub fn reveal_tile(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        let Some(tile) = self.tile(coords) else {
            log::warn!("Ignoring reveal outside the board at {:?}", coords);
            return NoChange;
        };
        if tile.revealed {
            return NoChange;
        }

        let mut outcome = NoChange;
        let mut to_visit = Vec::from([coords]);
        while let Some(visit_coords) = to_visit.pop() {
            let tile = &mut self.tiles[visit_coords.to_nd_index()];
            if tile.revealed {
                continue;
            }

            tile.revealed = true;
            if tile.flagged {
                tile.flagged = false;
                self.flagged_count -= 1;
            }

            match tile.kind {
                TileKind::Mine => {
                    if self.revealed_mine_count == 0 {
                        tile.exploded = true;
                        log::debug!("Mine hit at {:?}, game lost", visit_coords);
                    }
                    self.revealed_mine_count += 1;
                    outcome = outcome | HitMine;
                }
                TileKind::Number(count) => {
                    self.revealed_safe_count += 1;
                    log::trace!("Revealed tile at {:?}, mine count: {}", visit_coords, count);
                    outcome = outcome | Revealed;
                }
                TileKind::Empty => {
                    self.revealed_safe_count += 1;
                    log::trace!("Flood fill through {:?}", visit_coords);
                    outcome = outcome | Revealed;

                    let tiles = &self.tiles;
                    to_visit.extend(
                        self.iter_neighbors(visit_coords)
                            .filter(|&pos| !tiles[pos.to_nd_index()].revealed),
                    );
                }
            }
        }

        if outcome == Revealed && self.check_win() {
            log::debug!("All safe tiles revealed, game won");
            Won
        } else {
            outcome
        }
    }

    /// Toggles the flag on a hidden tile.
    pub fn flag_tile(&mut self, coords: Coord2) -> MarkOutcome {
        let Some(tile) = self.tiles.get_mut(coords.to_nd_index()) else {
            log::warn!("Ignoring flag outside the board at {:?}", coords);
            return MarkOutcome::NoChange;
        };
        if tile.revealed {
            return MarkOutcome::NoChange;
        }

        tile.flagged = !tile.flagged;
        if tile.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        MarkOutcome::Changed
    }

    /// Chord: reveals every hidden, unflagged neighbor of a revealed number tile once exactly that many neighbors
    /// are flagged.
    ///
    /// Flags are trusted, a misplaced flag can make this reveal a mine.
    pub fn reveal_adjacent(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(tile) = self.tile(coords) else {
            log::warn!("Ignoring chord outside the board at {:?}", coords);
            return RevealOutcome::NoChange;
        };
        let (true, TileKind::Number(count)) = (tile.revealed, tile.kind) else {
            return RevealOutcome::NoChange;
        };

        let flagged = self.count_flagged_neighbors(coords);
        if flagged != count {
            log::trace!(
                "Chord at {:?} skipped, {} flags around a {}",
                coords,
                flagged,
                count
            );
            return RevealOutcome::NoChange;
        }

        let mut outcome = RevealOutcome::NoChange;
        for pos in self.iter_neighbors(coords) {
            let neighbor = &self.tiles[pos.to_nd_index()];
            // earlier neighbors may have flooded into this one
            if neighbor.revealed || neighbor.flagged {
                continue;
            }
            outcome = outcome | self.reveal_tile(pos);
        }
        outcome
    }

    /// After a loss, clears every flag and reveals all mines. Only the mine that lost the game stays exploded.
    pub fn reveal_mines(&mut self) -> MarkOutcome {
        if !self.check_lose() {
            return MarkOutcome::NoChange;
        }

        let mut updated = false;
        for tile in self.tiles.iter_mut() {
            if tile.flagged {
                tile.flagged = false;
                updated = true;
            }
            if tile.is_mine() && !tile.revealed {
                tile.revealed = true;
                self.revealed_mine_count += 1;
                updated = true;
            }
        }
        self.flagged_count = 0;

        if updated {
            MarkOutcome::Changed
        } else {
            MarkOutcome::NoChange
        }
    }

    /// After a win, flags every mine that is still unflagged.
    pub fn flag_mines(&mut self) -> MarkOutcome {
        if self.state() != BoardState::Won {
            return MarkOutcome::NoChange;
        }

        let mut updated = false;
        for tile in self.tiles.iter_mut() {
            if tile.is_mine() && !tile.revealed && !tile.flagged {
                tile.flagged = true;
                self.flagged_count += 1;
                updated = true;
            }
        }

        if updated {
            MarkOutcome::Changed
        } else {
            MarkOutcome::NoChange
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        // at most 8
        self.iter_neighbors(coords)
            .filter(|&pos| self.tiles[pos.to_nd_index()].flagged)
            .count() as u8
    }
}
