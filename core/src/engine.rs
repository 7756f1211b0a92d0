use std::collections::{BTreeSet, VecDeque};
use std::num::Saturating;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// One game's position in the `Playing -> {Won, Lost}` machine. `Won` and
/// `Lost` are terminal: every later reveal or flag request is an inert
/// no-op.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
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

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// One cell transitioned to revealed, recorded in visit order.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealedCell {
    pub coords: Coord2,
    pub is_mine: bool,
    pub adjacent_mines: u8,
}

/// Everything a single reveal request changed.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    pub revealed: Vec<RevealedCell>,
}

impl RevealReport {
    const fn unchanged() -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            revealed: Vec::new(),
        }
    }
}

/// Gameplay engine owning one [`Board`] for the lifetime of one game.
/// Front-ends only ever hold `&BoardEngine`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardEngine {
    board: Board,
    cells: Array2<CellState>,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl BoardEngine {
    pub fn new(board: Board) -> Self {
        let side = board.size() as usize;
        Self {
            board,
            cells: Array2::default([side, side]),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.cells[coords.to_index()]
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// The mine whose reveal lost the game, if any.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Win predicate over the full board: every mine unrevealed and every
    /// non-mine revealed. The engine tracks the same condition through its
    /// revealed counter; the two always agree.
    pub fn is_cleared(&self) -> bool {
        self.cells.indexed_iter().all(|((row, col), &cell)| {
            let is_mine = self.board.contains_mine((row as Coord, col as Coord));
            cell.is_revealed() != is_mine
        })
    }

    /// Reveals a hidden cell, cascading through zero-count regions.
    ///
    /// Out-of-bounds coordinates are rejected. Revealing a flagged or
    /// already-revealed cell, or anything after the game ended, changes
    /// nothing and reports no cells.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_terminal() {
            return Ok(RevealReport::unchanged());
        }
        if self.cells[coords.to_index()] != CellState::Hidden {
            return Ok(RevealReport::unchanged());
        }

        Ok(self.reveal_hidden(coords))
    }

    fn reveal_hidden(&mut self, coords: Coord2) -> RevealReport {
        if self.board.contains_mine(coords) {
            self.cells[coords.to_index()] = CellState::Exploded;
            self.revealed_count += 1;
            self.triggered_mine = Some(coords);
            self.state = GameState::Lost;
            log::debug!("mine hit at {:?}", coords);
            return RevealReport {
                outcome: RevealOutcome::HitMine,
                revealed: vec![RevealedCell {
                    coords,
                    is_mine: true,
                    adjacent_mines: self.board.adjacent_mines(coords),
                }],
            };
        }

        let mut revealed = Vec::new();
        self.reveal_safe_cell(coords, &mut revealed);

        if self.board.adjacent_mines(coords) == 0 {
            // Iterative flood-fill; the region is bounded by nonzero counts,
            // mines, flags, and the board edge. Only zero-count cells enqueue
            // their neighbors, so no mine can enter the worklist.
            let mut visited = BTreeSet::from([coords]);
            let mut to_visit: VecDeque<_> = self
                .board
                .iter_neighbors(coords)
                .filter(|&pos| self.cells[pos.to_index()] == CellState::Hidden)
                .collect();

            while let Some(visit_coords) = to_visit.pop_front() {
                if !visited.insert(visit_coords) {
                    continue;
                }
                if self.cells[visit_coords.to_index()] != CellState::Hidden {
                    continue;
                }

                self.reveal_safe_cell(visit_coords, &mut revealed);

                if self.board.adjacent_mines(visit_coords) == 0 {
                    to_visit.extend(
                        self.board
                            .iter_neighbors(visit_coords)
                            .filter(|&pos| self.cells[pos.to_index()] == CellState::Hidden)
                            .filter(|pos| !visited.contains(pos)),
                    );
                }
            }
        }

        // One win check after the full cascade; revealed is monotonic, so
        // the condition can only become true on the closing cell.
        if self.revealed_count == Saturating(self.board.safe_cell_count()) {
            self.state = GameState::Won;
            log::debug!("board cleared after {} reveals", self.revealed_count.0);
            RevealReport {
                outcome: RevealOutcome::Won,
                revealed,
            }
        } else {
            RevealReport {
                outcome: RevealOutcome::Revealed,
                revealed,
            }
        }
    }

    fn reveal_safe_cell(&mut self, coords: Coord2, revealed: &mut Vec<RevealedCell>) {
        let adjacent_mines = self.board.adjacent_mines(coords);
        self.cells[coords.to_index()] = CellState::Revealed(adjacent_mines);
        self.revealed_count += 1;
        revealed.push(RevealedCell {
            coords,
            is_mine: false,
            adjacent_mines,
        });
        log::trace!("revealed {:?}, adjacent mines: {}", coords, adjacent_mines);
    }

    /// Flips a hidden cell's flag. Revealed cells and finished games are
    /// left untouched.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;

        let coords = self.board.validate_coords(coords)?;

        if self.state.is_terminal() {
            return Ok(FlagOutcome::NoChange);
        }

        Ok(match self.cells[coords.to_index()] {
            Hidden => {
                self.cells[coords.to_index()] = Flagged;
                self.flagged_count += 1;
                FlagOutcome::Changed
            }
            Flagged => {
                self.cells[coords.to_index()] = Hidden;
                self.flagged_count -= 1;
                FlagOutcome::Changed
            }
            Revealed(_) | Exploded => FlagOutcome::NoChange,
        })
    }
}
