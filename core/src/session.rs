use crate::*;

/// Display-side collaborator. Receives state-change notifications and holds
/// no mutable access to the board; everything it needs to draw arrives
/// through these calls.
pub trait Renderer {
    /// A new game started; rebuild the display grid from the engine.
    fn board_created(&mut self, board: &BoardEngine);

    /// Fired once per cell transitioned to revealed, in cascade visit order.
    fn cell_revealed(&mut self, coords: Coord2, is_mine: bool, adjacent_mines: u8);

    fn cell_flagged(&mut self, coords: Coord2, flagged: bool);

    /// Fired exactly once per game, after the closing reveal's cell events.
    fn game_ended(&mut self, won: bool);
}

/// One player's sequence of games. Owns the current engine and the renderer
/// it notifies; there is no other route into the board.
#[derive(Debug)]
pub struct GameSession<R> {
    engine: Option<BoardEngine>,
    renderer: R,
}

impl<R: Renderer> GameSession<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            engine: None,
            renderer,
        }
    }

    pub fn engine(&self) -> Option<&BoardEngine> {
        self.engine.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Starts a fresh game, discarding any previous board whether or not it
    /// reached a terminal state.
    pub fn request_new_game<G: BoardGenerator>(&mut self, generator: G, config: &BoardConfig) {
        let engine = BoardEngine::new(generator.generate(config));
        log::debug!(
            "new game: {size}x{size}, p={probability}",
            size = config.size(),
            probability = config.mine_probability(),
        );
        self.renderer.board_created(&engine);
        self.engine = Some(engine);
    }

    /// Reveals a cell and replays the resulting transitions to the renderer.
    /// Without an active game this changes nothing.
    pub fn request_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(RevealOutcome::NoChange);
        };

        let report = engine.reveal(coords)?;
        for cell in &report.revealed {
            self.renderer
                .cell_revealed(cell.coords, cell.is_mine, cell.adjacent_mines);
        }
        match report.outcome {
            RevealOutcome::HitMine => self.renderer.game_ended(false),
            RevealOutcome::Won => self.renderer.game_ended(true),
            RevealOutcome::Revealed | RevealOutcome::NoChange => {}
        }

        Ok(report.outcome)
    }

    /// Toggles a flag and notifies the renderer on change. Without an active
    /// game this changes nothing.
    pub fn request_toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(FlagOutcome::NoChange);
        };

        let outcome = engine.toggle_flag(coords)?;
        if outcome.has_update() {
            let flagged = engine.cell_at(coords).is_flagged();
            self.renderer.cell_flagged(coords, flagged);
        }

        Ok(outcome)
    }
}
