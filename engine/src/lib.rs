// ═══════════════════════════════════════════════════════════════════════
// splash-engine — rules, board model and wire protocol for the splash
// bomb skirmish game
// ═══════════════════════════════════════════════════════════════════════
//
// Everything agents need to reason about the game lives here: the static
// configuration built at setup, the per-turn state snapshot, distance
// fields, area control, the one-ply combat model and the referee
// protocol adapters. Decision making itself lives in splash-agents.

pub mod clock;
pub mod control;
pub mod grid;
pub mod pathing;
pub mod protocol;
pub mod setup;
pub mod sim;
pub mod types;

pub use grid::{Board, Cell};
pub use types::*;
