use std::fmt;

use minado_core as game;
use tracing::info;

const HIDDEN: char = '◼';
const FLAG: char = '◄';
const MINE: char = '◉';

/// Terminal display grid: rebuilt on every new game, patched per event.
/// Holds no reference into the engine.
pub(crate) struct TermRenderer {
    grid: Vec<Vec<char>>,
    finished: Option<bool>,
}

impl TermRenderer {
    pub(crate) fn new() -> Self {
        Self {
            grid: Vec::new(),
            finished: None,
        }
    }

    /// Outcome of the current game, once it ended.
    pub(crate) fn finished(&self) -> Option<bool> {
        self.finished
    }

    fn set(&mut self, (row, col): game::Coord2, glyph: char) {
        self.grid[row as usize][col as usize] = glyph;
    }
}

impl game::Renderer for TermRenderer {
    fn board_created(&mut self, board: &game::BoardEngine) {
        let side = board.size() as usize;
        self.grid = vec![vec![HIDDEN; side]; side];
        self.finished = None;
        info!("drawing a fresh {side}x{side} grid");
    }

    fn cell_revealed(&mut self, coords: game::Coord2, is_mine: bool, adjacent_mines: u8) {
        let glyph = if is_mine {
            MINE
        } else if adjacent_mines == 0 {
            ' '
        } else {
            char::from_digit(u32::from(adjacent_mines), 10).unwrap_or('?')
        };
        self.set(coords, glyph);
    }

    fn cell_flagged(&mut self, coords: game::Coord2, flagged: bool) {
        self.set(coords, if flagged { FLAG } else { HIDDEN });
    }

    fn game_ended(&mut self, won: bool) {
        self.finished = Some(won);
    }
}

impl fmt::Display for TermRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.grid.len() {
            write!(f, "{col:>2}")?;
        }
        writeln!(f)?;

        for (row, cells) in self.grid.iter().enumerate() {
            write!(f, "{row:>2} ")?;
            for &glyph in cells {
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::Renderer;

    fn renderer_with_board(size: game::Coord) -> TermRenderer {
        let board = game::Board::from_mine_coords(size, &[]).unwrap();
        let engine = game::BoardEngine::new(board);
        let mut renderer = TermRenderer::new();
        renderer.board_created(&engine);
        renderer
    }

    #[test]
    fn new_board_draws_all_hidden() {
        let renderer = renderer_with_board(2);

        assert_eq!(renderer.grid, vec![vec![HIDDEN; 2]; 2]);
        assert_eq!(renderer.finished(), None);
    }

    #[test]
    fn reveal_events_pick_the_matching_glyphs() {
        let mut renderer = renderer_with_board(2);

        renderer.cell_revealed((0, 0), false, 0);
        renderer.cell_revealed((0, 1), false, 3);
        renderer.cell_revealed((1, 0), true, 0);

        assert_eq!(renderer.grid[0][0], ' ');
        assert_eq!(renderer.grid[0][1], '3');
        assert_eq!(renderer.grid[1][0], MINE);
    }

    #[test]
    fn flag_events_toggle_the_glyph() {
        let mut renderer = renderer_with_board(2);

        renderer.cell_flagged((1, 1), true);
        assert_eq!(renderer.grid[1][1], FLAG);

        renderer.cell_flagged((1, 1), false);
        assert_eq!(renderer.grid[1][1], HIDDEN);
    }

    #[test]
    fn game_end_is_cleared_by_the_next_board() {
        let mut renderer = renderer_with_board(2);

        renderer.game_ended(false);
        assert_eq!(renderer.finished(), Some(false));

        let board = game::Board::from_mine_coords(2, &[]).unwrap();
        renderer.board_created(&game::BoardEngine::new(board));
        assert_eq!(renderer.finished(), None);
    }

    #[test]
    fn display_prefixes_row_and_column_indices() {
        let mut renderer = renderer_with_board(2);
        renderer.cell_revealed((0, 1), false, 1);

        let drawn = renderer.to_string();
        let lines: Vec<_> = drawn.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains('0') && lines[0].contains('1'));
        assert!(lines[1].starts_with(" 0"));
        assert!(lines[1].contains('1'));
    }
}
