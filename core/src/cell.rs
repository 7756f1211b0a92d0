use serde::{Deserialize, Serialize};

/// Player-visible state of a single board cell.
///
/// `Exploded` is the revealed form of a mine: it only appears on the cell
/// whose reveal lost the game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    Revealed(u8),
    Exploded,
}

impl CellState {
    /// Once true for a cell this never reverts for the rest of the game.
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::Exploded)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
