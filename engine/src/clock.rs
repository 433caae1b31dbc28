// ═══════════════════════════════════════════════════════════════════════
// Turn clock — wall-clock budget measured from the turn input
// ═══════════════════════════════════════════════════════════════════════

use std::time::{Duration, Instant};

/// Default per-turn compute budget in milliseconds, matching the
/// referee's response deadline.
pub const TURN_BUDGET_MS: u64 = 50;

/// Wall-clock budget for one turn. Deeper search stages poll `expired`
/// to stop early; the single unconditional evaluation pass only reads
/// `elapsed_ms` for the output annotation.
#[derive(Debug)]
pub struct TurnClock {
    started: Instant,
    budget: Duration,
}

impl TurnClock {
    pub fn start(budget_ms: u64) -> TurnClock {
        TurnClock {
            started: Instant::now(),
            budget: Duration::from_millis(budget_ms),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    pub fn expired(&self) -> bool {
        self.started.elapsed() >= self.budget
    }
}
