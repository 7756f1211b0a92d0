use std::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine layout plus derived adjacency counts, fixed for the lifetime of one
/// game. Only the engine's per-cell [`CellState`] grid changes during play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mines: Array2<bool>,
    counts: Array2<u8>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from a square mine mask, deriving the adjacency count
    /// of every non-mine cell.
    pub fn from_mine_mask(mines: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mines.dim();
        if rows != cols || rows == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self::derive(mines))
    }

    /// Builds a board with mines at exactly the given coordinates.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize);
        }

        let mut mines: Array2<bool> = Array2::default([size as usize; 2]);
        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidMinePlacement);
            }
            mines[coords.to_index()] = true;
        }

        Ok(Self::derive(mines))
    }

    /// Mask is square by the caller's construction.
    pub(crate) fn derive(mines: Array2<bool>) -> Self {
        let mut counts: Array2<u8> = Array2::zeros(mines.raw_dim());
        for ((row, col), &is_mine) in mines.indexed_iter() {
            if is_mine {
                continue;
            }
            let center = (row as Coord, col as Coord);
            counts[(row, col)] = mines
                .iter_neighbors(center)
                .filter(|&pos| mines[pos.to_index()])
                .count()
                .try_into()
                .unwrap();
        }

        let mine_count = mines
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        log::debug!(
            "board layout ready: {:?} cells, {} mines",
            mines.dim(),
            mine_count
        );

        Self {
            mines,
            counts,
            mine_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate)
        }
    }

    pub fn size(&self) -> Coord {
        self.mines.dim().0.try_into().unwrap()
    }

    pub fn total_cells(&self) -> CellCount {
        self.mines.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Number of mine neighbors of a cell; zero on mine cells themselves.
    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.counts[coords.to_index()]
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mines.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mines[coords.to_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_counts_match_exact_neighborhood() {
        // . * .
        // . . .
        // * . .
        let board = Board::from_mine_coords(3, &[(0, 1), (2, 0)]).unwrap();

        assert_eq!(board.adjacent_mines((0, 0)), 1);
        assert_eq!(board.adjacent_mines((0, 2)), 1);
        assert_eq!(board.adjacent_mines((1, 0)), 2);
        assert_eq!(board.adjacent_mines((1, 1)), 2);
        assert_eq!(board.adjacent_mines((1, 2)), 1);
        assert_eq!(board.adjacent_mines((2, 1)), 1);
        assert_eq!(board.adjacent_mines((2, 2)), 0);
    }

    #[test]
    fn counts_clip_at_the_border() {
        let board = Board::from_mine_coords(2, &[(0, 0)]).unwrap();

        assert_eq!(board.adjacent_mines((0, 1)), 1);
        assert_eq!(board.adjacent_mines((1, 0)), 1);
        assert_eq!(board.adjacent_mines((1, 1)), 1);
    }

    #[test]
    fn center_surrounded_by_eight_mines() {
        let ring = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ];
        let board = Board::from_mine_coords(3, &ring).unwrap();

        assert_eq!(board.adjacent_mines((1, 1)), 8);
        assert_eq!(board.mine_count(), 8);
        assert_eq!(board.safe_cell_count(), 1);
    }

    #[test]
    fn mine_free_board_is_all_zeros() {
        let board = Board::from_mine_coords(4, &[]).unwrap();

        assert_eq!(board.mine_count(), 0);
        assert_eq!(board.safe_cell_count(), 16);
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(board.adjacent_mines((row, col)), 0);
            }
        }
    }

    #[test]
    fn out_of_bounds_mine_placement_is_rejected() {
        assert_eq!(
            Board::from_mine_coords(2, &[(2, 0)]),
            Err(GameError::InvalidMinePlacement)
        );
    }

    #[test]
    fn zero_size_and_non_square_masks_are_rejected() {
        assert_eq!(
            Board::from_mine_coords(0, &[]),
            Err(GameError::InvalidSize)
        );
        assert_eq!(
            Board::from_mine_mask(Array2::default([2, 3])),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn coordinate_validation_covers_both_axes() {
        let board = Board::from_mine_coords(3, &[]).unwrap();

        assert_eq!(board.validate_coords((2, 2)), Ok((2, 2)));
        assert_eq!(
            board.validate_coords((3, 0)),
            Err(GameError::InvalidCoordinate)
        );
        assert_eq!(
            board.validate_coords((0, 3)),
            Err(GameError::InvalidCoordinate)
        );
    }
}
