//! Solvability guarantee - keeps at least one move on the board
//!
//! After the board is built or refilled, the guarantee checks for a removable
//! group and, when there is none, throws the whole board away and draws a new
//! one. The number of redraws is capped; running out is an accepted outcome,
//! not an error.
//!
//! [`SolvabilityPass`] exposes the loop one attempt at a time so an
//! orchestrator can put a visible pause between redraws. The engine's
//! `ensure_solvable` simply runs a pass to completion.

use log::{debug, warn};

use crate::engine::GridEngine;
use crate::events::EventSink;
use crate::rng::RandomSource;

/// Result of one [`SolvabilityPass::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStep {
    /// The board has a move; the pass is over
    Solvable { attempts: u32 },
    /// No move was found and the board was redrawn; step again to re-check
    Regenerated { attempt: u32 },
    /// The attempt budget is spent and the board may still have no move
    Exhausted { attempts: u32 },
}

impl PassStep {
    pub fn is_finished(self) -> bool {
        !matches!(self, PassStep::Regenerated { .. })
    }
}

/// Summary of a finished pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolvabilityOutcome {
    /// Number of full-board regenerations performed
    pub attempts: u32,
    /// Whether the final board has a removable group
    pub solvable: bool,
}

/// One run of the bounded regeneration loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvabilityPass {
    min_group_size: usize,
    max_attempts: u32,
    attempts: u32,
    outcome: Option<SolvabilityOutcome>,
}

impl SolvabilityPass {
    pub fn new(min_group_size: usize, max_attempts: u32) -> Self {
        Self {
            min_group_size,
            max_attempts,
            attempts: 0,
            outcome: None,
        }
    }

    /// Pass using the engine's own rule parameters
    pub fn for_engine<S: EventSink>(engine: &GridEngine<S>) -> Self {
        let config = engine.config();
        Self::new(config.min_group_size, config.max_regen_attempts)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn outcome(&self) -> Option<SolvabilityOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Check the board once and redraw it if it has no move.
    ///
    /// Raises `on_no_moves_state(true)` before every redraw and
    /// `on_no_moves_state(false)` exactly once when the pass ends, whether or not
    /// the budget ran out. Stepping a finished pass repeats its final answer
    /// without touching the board.
    pub fn step<S: EventSink, R: RandomSource>(
        &mut self,
        engine: &mut GridEngine<S>,
        rng: &mut R,
    ) -> PassStep {
        if let Some(outcome) = self.outcome {
            return Self::final_step(outcome);
        }

        if engine.has_any_match(self.min_group_size) {
            return self.finish(engine, true);
        }

        if self.attempts >= self.max_attempts {
            warn!(
                "no group of {} after {} regenerations, giving up",
                self.min_group_size, self.attempts
            );
            return self.finish(engine, false);
        }

        engine.notify_no_moves(true);
        engine.regenerate_all(rng);
        self.attempts += 1;
        debug!("no moves left, regenerated board (attempt {})", self.attempts);
        PassStep::Regenerated {
            attempt: self.attempts,
        }
    }

    /// Step until the pass ends.
    pub fn run<S: EventSink, R: RandomSource>(
        &mut self,
        engine: &mut GridEngine<S>,
        rng: &mut R,
    ) -> SolvabilityOutcome {
        loop {
            if let PassStep::Solvable { attempts } | PassStep::Exhausted { attempts } =
                self.step(engine, rng)
            {
                return SolvabilityOutcome {
                    attempts,
                    solvable: self.outcome.is_some_and(|o| o.solvable),
                };
            }
        }
    }

    fn finish<S: EventSink>(&mut self, engine: &mut GridEngine<S>, solvable: bool) -> PassStep {
        engine.notify_no_moves(false);
        let outcome = SolvabilityOutcome {
            attempts: self.attempts,
            solvable,
        };
        self.outcome = Some(outcome);
        Self::final_step(outcome)
    }

    fn final_step(outcome: SolvabilityOutcome) -> PassStep {
        if outcome.solvable {
            PassStep::Solvable {
                attempts: outcome.attempts,
            }
        } else {
            PassStep::Exhausted {
                attempts: outcome.attempts,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;
    use crate::grid::Grid;
    use crate::rng::ScriptedRng;
    use crate::types::GridEvent;

    /// 2x2 board of four distinct colors: no group of 2 or more anywhere.
    fn stuck_engine() -> GridEngine<EventLog> {
        let grid = Grid::from_rows(vec![vec![Some(0), Some(1)], vec![Some(2), Some(3)]]).unwrap();
        GridEngine::from_grid(grid, 4, EventLog::new())
            .unwrap()
            .with_rules(2, 3)
            .unwrap()
    }

    fn no_moves_events(log: &EventLog) -> Vec<bool> {
        log.events()
            .iter()
            .filter_map(|e| match e {
                GridEvent::NoMovesState(active) => Some(*active),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn solvable_board_finishes_immediately() {
        let grid = Grid::from_rows(vec![vec![Some(1), Some(1)]]).unwrap();
        let mut engine = GridEngine::from_grid(grid, 3, EventLog::new())
            .unwrap()
            .with_rules(2, 50)
            .unwrap();
        let mut rng = ScriptedRng::new(vec![0]);
        let mut pass = SolvabilityPass::for_engine(&engine);

        assert_eq!(
            pass.step(&mut engine, &mut rng),
            PassStep::Solvable { attempts: 0 }
        );
        assert_eq!(rng.draws(), 0);
        assert_eq!(no_moves_events(engine.sink()), vec![false]);
    }

    #[test]
    fn regenerates_until_a_match_appears() {
        let mut engine = stuck_engine();
        // First redraw keeps four distinct colors, second redraw is all zeros.
        let mut rng = ScriptedRng::new(vec![0, 2, 1, 3, 0, 0, 0, 0]);
        let mut pass = SolvabilityPass::for_engine(&engine);

        assert_eq!(pass.step(&mut engine, &mut rng), PassStep::Regenerated { attempt: 1 });
        assert_eq!(pass.step(&mut engine, &mut rng), PassStep::Regenerated { attempt: 2 });
        assert_eq!(pass.step(&mut engine, &mut rng), PassStep::Solvable { attempts: 2 });
        assert_eq!(no_moves_events(engine.sink()), vec![true, true, false]);
    }

    #[test]
    fn budget_caps_regenerations() {
        let mut engine = stuck_engine();
        // Always redraws the same match-free 2x2 board.
        let mut rng = ScriptedRng::new(vec![0, 2, 1, 3]);
        let outcome = SolvabilityPass::for_engine(&engine).run(&mut engine, &mut rng);

        assert_eq!(
            outcome,
            SolvabilityOutcome {
                attempts: 3,
                solvable: false
            }
        );
        assert_eq!(rng.draws(), 12);
        assert_eq!(no_moves_events(engine.sink()), vec![true, true, true, false]);
    }

    #[test]
    fn finished_pass_does_not_touch_board() {
        let mut engine = stuck_engine();
        let mut rng = ScriptedRng::new(vec![0, 2, 1, 3]);
        let mut pass = SolvabilityPass::for_engine(&engine);
        pass.run(&mut engine, &mut rng);
        let draws = rng.draws();
        let events = engine.sink().len();

        assert_eq!(pass.step(&mut engine, &mut rng), PassStep::Exhausted { attempts: 3 });
        assert_eq!(rng.draws(), draws);
        assert_eq!(engine.sink().len(), events);
    }
}
