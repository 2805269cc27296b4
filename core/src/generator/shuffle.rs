use super::*;

/// Purely random generation: every arrangement of the requested bombs is equally likely.
///
/// The bomb markers are laid out first and then shuffled, so the result only depends on
/// the seed and the config.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffleMinefieldGenerator {
    seed: u64,
}

impl ShuffleMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for ShuffleMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield> {
        use rand::prelude::*;

        let total_cells = config.total_cells();
        if config.bombs > total_cells {
            log::warn!(
                "Refusing to generate minefield, requested {} bombs but only {} cells fit",
                config.bombs,
                total_cells
            );
            return Err(GameError::TooManyMines);
        }

        let mut markers: Vec<bool> = (0..total_cells).map(|i| i < config.bombs).collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        markers.shuffle(&mut rng);

        let mask = Grid::from_shape_vec(config.size, markers)?;
        log::debug!(
            "Generated {}x{} minefield with {} bombs (seed {})",
            config.rows(),
            config.columns(),
            config.bombs,
            self.seed
        );
        Ok(minefield_from_mask(&mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bomb_positions(minefield: &Minefield) -> Vec<Pos> {
        minefield
            .indexed_iter()
            .filter(|(_, cell)| cell.is_bomb())
            .map(|(pos, _)| pos)
            .collect()
    }

    #[test]
    fn places_exactly_the_requested_bombs() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            for seed in 0..50 {
                let minefield = ShuffleMinefieldGenerator::new(seed).generate(config).unwrap();

                assert_eq!(minefield.size(), config.size);
                assert_eq!(bomb_positions(&minefield).len(), usize::from(config.bombs));
            }
        }
    }

    #[test]
    fn neighbor_counts_are_consistent() {
        let config = Difficulty::Hard.config();
        for seed in 0..50 {
            let minefield = ShuffleMinefieldGenerator::new(seed).generate(config).unwrap();

            for (pos, cell) in minefield.indexed_iter() {
                let bombs_around = minefield
                    .iter_neighbor_cells(pos)
                    .filter(|(_, neighbor)| neighbor.is_bomb())
                    .count() as u8;
                match *cell {
                    Cell::Bomb { exploded } => assert!(!exploded),
                    Cell::BombNeighbor(count) => {
                        assert!((1..=8).contains(&count));
                        assert_eq!(count, bombs_around, "at {pos:?}");
                    }
                    Cell::Empty => assert_eq!(bombs_around, 0, "at {pos:?}"),
                }
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = Difficulty::Medium.config();

        let a = ShuffleMinefieldGenerator::new(42).generate(config).unwrap();
        let b = ShuffleMinefieldGenerator::new(42).generate(config).unwrap();
        let c = ShuffleMinefieldGenerator::new(43).generate(config).unwrap();

        assert_eq!(a, b);
        assert_ne!(bomb_positions(&a), bomb_positions(&c));
    }

    #[test]
    fn single_cell_without_bombs_is_empty() {
        let minefield = ShuffleMinefieldGenerator::new(7)
            .generate(GameConfig::new_unchecked((1, 1), 0))
            .unwrap();

        assert_eq!(minefield.iter().copied().collect::<Vec<_>>(), vec![Cell::Empty]);
    }

    #[test]
    fn full_board_is_allowed_but_overfull_is_not() {
        let full = ShuffleMinefieldGenerator::new(1)
            .generate(GameConfig::new_unchecked((2, 3), 6))
            .unwrap();
        assert!(full.iter().all(|cell| cell.is_bomb()));

        let overfull = ShuffleMinefieldGenerator::new(1).generate(GameConfig::new_unchecked((2, 3), 7));
        assert_eq!(overfull, Err(GameError::TooManyMines));
    }

    #[test]
    fn every_position_can_hold_the_bomb() {
        let config = GameConfig::new_unchecked((2, 2), 1);
        let mut seen = [false; 4];

        for seed in 0..200 {
            let minefield = ShuffleMinefieldGenerator::new(seed).generate(config).unwrap();
            let (row, col) = bomb_positions(&minefield)[0];
            seen[usize::from(row) * 2 + usize::from(col)] = true;
        }

        assert_eq!(seen, [true; 4]);
    }
}
