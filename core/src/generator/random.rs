use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Uniform placement: draws positions one at a time and redraws whenever a position already holds a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: BoardConfig) -> MineLayout {
        use rand::prelude::*;

        let config = BoardConfig::clamped(config.size, config.mines);
        log::debug!(
            "Generating {0}x{0} minefield with {1} mines, seed: {2}",
            config.size,
            config.mines,
            self.seed
        );

        let mut mines: Array2<bool> = Array2::default(square(config.size).to_nd_index());
        let mut placed: Vec<Coord2> = Vec::with_capacity(config.mines.into());
        let mut rejected = 0usize;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while placed.len() < usize::from(config.mines) {
            let coords = (
                rng.random_range(0..config.size),
                rng.random_range(0..config.size),
            );
            let tile = &mut mines[coords.to_nd_index()];
            if *tile {
                rejected += 1;
                continue;
            }
            *tile = true;
            placed.push(coords);
        }
        log::trace!("Placed mines at {:?}, {} draws rejected", placed, rejected);

        MineLayout::new_unchecked(mines, config.size, config.mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(size: Coord, mines: CellCount, seed: u64) -> MineLayout {
        RandomMinefieldGenerator::new(seed).generate(BoardConfig::new_unchecked(size, mines))
    }

    #[test]
    fn places_exact_mine_count() {
        for seed in 0..32 {
            let layout = generate(9, 10, seed);
            assert_eq!(layout.size(), 9);
            assert_eq!(layout.mine_count(), 10);
        }
    }

    #[test]
    fn nearly_full_board_terminates() {
        let layout = generate(4, 15, 7);

        assert_eq!(layout.mine_count(), 15);
        assert_eq!(layout.safe_cell_count(), 1);
    }

    #[test]
    fn same_seed_same_layout() {
        assert_eq!(generate(16, 40, 1234), generate(16, 40, 1234));
    }

    #[test]
    fn different_seeds_usually_differ() {
        let first = generate(16, 40, 1);
        let differs = (2..10).any(|seed| generate(16, 40, seed) != first);
        assert!(differs);
    }

    #[test]
    fn overfull_config_is_clamped() {
        let layout = generate(3, 50, 0);

        assert_eq!(layout.mine_count(), 8);
        assert_eq!(layout.safe_cell_count(), 1);
    }
}
