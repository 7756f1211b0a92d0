//! Minesweeper engine: board generation, adjacency computation, flood-fill
//! reveal, flagging, and win/loss detection.
//!
//! The engine is display-free. Front-ends implement [`Renderer`] and drive a
//! [`GameSession`], which translates every state change into ordered
//! renderer notifications.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod engine;
mod error;
mod generator;
mod session;
mod types;

/// Validated parameters for one generated board. Construction rejects bad
/// input instead of clamping it; the only sanctioned clamp is the
/// difficulty cap applied while drawing a probability
/// ([`DifficultyPreset::roll_probability`]).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    size: Coord,
    mine_probability: f64,
}

impl BoardConfig {
    pub fn new(size: Coord, mine_probability: f64) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize);
        }
        if !mine_probability.is_finite() || !(0.0..=1.0).contains(&mine_probability) {
            return Err(GameError::InvalidProbability(mine_probability));
        }
        Ok(Self {
            size,
            mine_probability,
        })
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn mine_probability(&self) -> f64 {
        self.mine_probability
    }

    pub const fn total_cells(&self) -> CellCount {
        cells(self.size, self.size)
    }
}
