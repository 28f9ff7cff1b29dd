//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform code:
//! - Seeded RNG only
//! - Time only advances through `Session::update` / `Session::tick`
//! - Delayed work goes through the pending-action queue, never sleeps
//! - Side effects (sound, persistence) leave as `GameEvent`s

pub mod ease;
pub mod effects;
pub mod puzzle;
pub mod schedule;
pub mod solver;
pub mod state;
pub mod tick;
pub mod validate;

pub use ease::Easing;
pub use effects::{Effect, EffectKind, EffectSystem, Particle};
pub use puzzle::{generate, generate_kind};
pub use schedule::{Action, Schedule};
pub use solver::{Autoplayer, solve};
pub use state::{
    Constraint, ConstraintKind, GameEvent, Puzzle, RoundState, RoundStats, Session, SoundKind, Tile,
};
pub use tick::{Intent, SubmitOutcome, points_for};
pub use validate::is_correct;
