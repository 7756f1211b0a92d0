use ndarray::Array2;

use super::*;

/// Marks each cell as a mine by an independent Bernoulli trial at the
/// configured probability. There is no fixed mine count; mine-free and
/// all-mine boards are legal outcomes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BernoulliGenerator {
    seed: u64,
}

impl BernoulliGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for BernoulliGenerator {
    fn generate(self, config: &BoardConfig) -> Board {
        use rand::prelude::*;

        let side = config.size() as usize;
        let probability = config.mine_probability();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mines: Array2<bool> =
            Array2::from_shape_simple_fn([side, side], || rng.random_bool(probability));

        let board = Board::derive(mines);
        log::debug!(
            "generated {size}x{size} board at p={probability}: {mines} mines",
            size = config.size(),
            mines = board.mine_count(),
        );
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: Coord, probability: f64) -> BoardConfig {
        BoardConfig::new(size, probability).unwrap()
    }

    #[test]
    fn zero_probability_yields_a_mine_free_board() {
        let board = BernoulliGenerator::new(7).generate(&config(4, 0.0));

        assert_eq!(board.mine_count(), 0);
        assert_eq!(board.safe_cell_count(), 16);
        assert_eq!(board.adjacent_mines((1, 2)), 0);
    }

    #[test]
    fn unit_probability_fills_the_board() {
        let board = BernoulliGenerator::new(7).generate(&config(3, 1.0));

        assert_eq!(board.mine_count(), 9);
        assert_eq!(board.safe_cell_count(), 0);
    }

    #[test]
    fn single_cell_board_with_zero_probability() {
        let board = BernoulliGenerator::new(0).generate(&config(1, 0.0));

        assert_eq!(board.size(), 1);
        assert!(!board.contains_mine((0, 0)));
        assert_eq!(board.adjacent_mines((0, 0)), 0);
    }

    #[test]
    fn same_seed_reproduces_the_same_board() {
        let config = config(12, 0.3);

        let first = BernoulliGenerator::new(42).generate(&config);
        let second = BernoulliGenerator::new(42).generate(&config);

        assert_eq!(first, second);
    }

    #[test]
    fn generated_counts_match_a_recount_of_the_mask() {
        let board = BernoulliGenerator::new(3).generate(&config(8, 0.25));

        for row in 0..8 {
            for col in 0..8 {
                let coords = (row, col);
                if board.contains_mine(coords) {
                    continue;
                }
                let expected = board
                    .iter_neighbors(coords)
                    .filter(|&pos| board.contains_mine(pos))
                    .count() as u8;
                assert_eq!(board.adjacent_mines(coords), expected);
            }
        }
    }
}
