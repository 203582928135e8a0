use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Where the mines are on a square board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    size: Coord,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (dim_x, dim_y) = mine_mask.dim();
        if dim_x != dim_y || dim_x == 0 {
            return Err(GameError::InvalidBoardSize);
        }
        let size = Coord::try_from(dim_x).map_err(|_| GameError::InvalidBoardSize)?;

        // bounded by mult(size, size)
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        Ok(Self {
            mine_mask,
            size,
            mine_count,
        })
    }

    /// `mine_mask` must be `size`x`size` and hold exactly `mine_count` mines.
    pub(crate) fn new_unchecked(mine_mask: Array2<bool>, size: Coord, mine_count: CellCount) -> Self {
        Self {
            mine_mask,
            size,
            mine_count,
        }
    }

    /// Builds a layout with mines at exactly `mine_coords`, duplicates count once.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidBoardSize);
        }

        let mut mine_mask: Array2<bool> = Array2::default(square(size).to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn board_config(&self) -> BoardConfig {
        BoardConfig::new_unchecked(self.size, self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size && coords.1 < self.size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    /// Kind of the tile at `coords`, derived from the mask.
    pub fn kind_at(&self, coords: Coord2) -> TileKind {
        if self[coords] {
            TileKind::Mine
        } else {
            TileKind::safe(self.adjacent_mine_count(coords))
        }
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_mine_coords_counts_unique_mines() {
        let layout = MineLayout::from_mine_coords(3, &[(0, 0), (2, 1), (0, 0)]).unwrap();

        assert_eq!(layout.size(), 3);
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.safe_cell_count(), 7);
        assert_eq!(layout.board_config(), BoardConfig::new_unchecked(3, 2));
        assert!(layout.contains_mine((2, 1)));
        assert!(!layout.contains_mine((1, 2)));
    }

    #[test]
    fn from_mine_coords_rejects_out_of_bounds() {
        assert_eq!(
            MineLayout::from_mine_coords(3, &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            MineLayout::from_mine_coords(0, &[]),
            Err(GameError::InvalidBoardSize)
        );
    }

    #[test]
    fn from_mine_mask_requires_square() {
        let mask: Array2<bool> = Array2::default([2, 3]);
        assert_eq!(
            MineLayout::from_mine_mask(mask),
            Err(GameError::InvalidBoardSize)
        );
    }

    #[test]
    fn kinds_follow_adjacency() {
        let layout = MineLayout::from_mine_coords(4, &[(2, 2)]).unwrap();

        assert_eq!(layout.kind_at((2, 2)), TileKind::Mine);
        assert_eq!(layout.kind_at((1, 1)), TileKind::Number(1));
        assert_eq!(layout.kind_at((3, 3)), TileKind::Number(1));
        assert_eq!(layout.kind_at((0, 0)), TileKind::Empty);
        assert_eq!(layout.kind_at((0, 3)), TileKind::Empty);
    }

    #[test]
    fn adjacent_count_sees_all_eight() {
        let mines: alloc::vec::Vec<Coord2> = NeighborIter::new((1, 1), (3, 3)).collect();
        let layout = MineLayout::from_mine_coords(3, &mines).unwrap();

        assert_eq!(layout.adjacent_mine_count((1, 1)), 8);
        assert_eq!(layout.kind_at((1, 1)), TileKind::Number(8));
    }

    #[test]
    fn validate_coords_checks_both_axes() {
        let layout = MineLayout::from_mine_coords(2, &[(0, 0)]).unwrap();

        assert_eq!(layout.validate_coords((1, 1)), Ok((1, 1)));
        assert_eq!(layout.validate_coords((1, 2)), Err(GameError::InvalidCoords));
    }
}
