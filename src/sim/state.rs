//! Round state and core simulation types
//!
//! Everything a round needs lives in one owned [`Session`]; hosts drive it
//! through the operations in `tick.rs` and read it back for rendering.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::EffectSystem;
use super::schedule::Schedule;
use crate::consts::*;
use crate::palette;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundState {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Timer running, puzzle on the board
    Playing,
    /// Timer ran out, showing the summary
    GameOver,
}

/// Constraint families, without their target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintKind {
    Sum,
    Product,
    EvenCount,
    OddCount,
    GreaterThanCount,
    ConsecutiveRun,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 6] = [
        ConstraintKind::Sum,
        ConstraintKind::Product,
        ConstraintKind::EvenCount,
        ConstraintKind::OddCount,
        ConstraintKind::GreaterThanCount,
        ConstraintKind::ConsecutiveRun,
    ];

    /// Attach a target value
    pub fn with_target(self, target: u32) -> Constraint {
        match self {
            ConstraintKind::Sum => Constraint::Sum(target),
            ConstraintKind::Product => Constraint::Product(target),
            ConstraintKind::EvenCount => Constraint::EvenCount(target),
            ConstraintKind::OddCount => Constraint::OddCount(target),
            ConstraintKind::GreaterThanCount => Constraint::GreaterThanCount(target),
            ConstraintKind::ConsecutiveRun => Constraint::ConsecutiveRun(target),
        }
    }
}

/// The rule a selection must satisfy. The payload is the target value:
/// a sum, a product, a required count, a threshold, or a run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    Sum(u32),
    Product(u32),
    EvenCount(u32),
    OddCount(u32),
    /// Threshold every selected value must exceed (at least 3 tiles)
    GreaterThanCount(u32),
    ConsecutiveRun(u32),
}

impl Constraint {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Sum(_) => ConstraintKind::Sum,
            Constraint::Product(_) => ConstraintKind::Product,
            Constraint::EvenCount(_) => ConstraintKind::EvenCount,
            Constraint::OddCount(_) => ConstraintKind::OddCount,
            Constraint::GreaterThanCount(_) => ConstraintKind::GreaterThanCount,
            Constraint::ConsecutiveRun(_) => ConstraintKind::ConsecutiveRun,
        }
    }

    pub fn target(&self) -> u32 {
        match *self {
            Constraint::Sum(t)
            | Constraint::Product(t)
            | Constraint::EvenCount(t)
            | Constraint::OddCount(t)
            | Constraint::GreaterThanCount(t)
            | Constraint::ConsecutiveRun(t) => t,
        }
    }

    /// Instruction line shown above the grid
    pub fn describe(&self) -> String {
        match *self {
            Constraint::Sum(t) => format!("SELECT NUMBERS THAT SUM TO {t}"),
            Constraint::Product(t) => format!("SELECT NUMBERS THAT MULTIPLY TO {t}"),
            Constraint::EvenCount(t) => format!("SELECT {t} EVEN NUMBERS"),
            Constraint::OddCount(t) => format!("SELECT {t} ODD NUMBERS"),
            Constraint::GreaterThanCount(t) => format!("SELECT 3+ NUMBERS GREATER THAN {t}"),
            Constraint::ConsecutiveRun(t) => format!("SELECT {t} CONSECUTIVE NUMBERS"),
        }
    }

    /// Accent colour for the instruction line
    pub fn accent_color(&self) -> u32 {
        match self {
            Constraint::Sum(_) => palette::PRIMARY,
            Constraint::Product(_) | Constraint::GreaterThanCount(_) => palette::WARNING,
            Constraint::EvenCount(_) => palette::SUCCESS,
            Constraint::OddCount(_) => palette::ACCENT,
            Constraint::ConsecutiveRun(_) => palette::VIOLET,
        }
    }
}

/// A numbered tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub value: u32,
    pub pos: Vec2,
    pub selected: bool,
    /// Visual scale; 0 before pop-in, 1 at rest
    pub scale: f32,
    /// Idle pulse phase (radians)
    pub pulse_phase: f32,
}

impl Tile {
    pub fn new(value: u32, pos: Vec2, pulse_phase: f32) -> Self {
        Self {
            value,
            pos,
            selected: false,
            scale: 0.0,
            pulse_phase,
        }
    }

    /// Tiles can only be toggled once they have fully popped in
    pub fn is_interactive(&self) -> bool {
        self.scale >= 1.0
    }

    /// Layout position of grid slot `index` (row-major)
    pub fn slot_position(index: usize) -> Vec2 {
        let col = (index % GRID_COLS) as f32;
        let row = (index / GRID_COLS) as f32;
        Vec2::new(
            GRID_START_X + col * GRID_SPACING_X,
            GRID_START_Y + row * GRID_SPACING_Y,
        )
    }
}

/// One active rule plus its board. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct Puzzle {
    pub constraint: Constraint,
    pub tiles: [Tile; TILE_COUNT],
}

impl Puzzle {
    pub fn values(&self) -> [u32; TILE_COUNT] {
        self.tiles.map(|t| t.value)
    }

    pub fn selected_values(&self) -> Vec<u32> {
        self.tiles
            .iter()
            .filter(|t| t.selected)
            .map(|t| t.value)
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.selected).count()
    }

    pub fn clear_selection(&mut self) {
        for tile in &mut self.tiles {
            tile.selected = false;
        }
    }
}

/// Score, streak and timer for the current round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    pub score: u64,
    pub level: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub total_correct: u32,
    pub total_wrong: u32,
    /// Seconds remaining, always within [0, max_time]
    pub time_left: f32,
    pub max_time: f32,
}

impl Default for RoundStats {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            combo: 0,
            max_combo: 0,
            total_correct: 0,
            total_wrong: 0,
            time_left: START_TIME,
            max_time: START_TIME,
        }
    }
}

impl RoundStats {
    /// Whole-percent accuracy, 0 before any submission
    pub fn accuracy(&self) -> u32 {
        let total = self.total_correct + self.total_wrong;
        if total == 0 {
            return 0;
        }
        (self.total_correct as f32 / total as f32 * 100.0).round() as u32
    }

    /// Fraction of the timer remaining, for the HUD bar
    pub fn time_fraction(&self) -> f32 {
        if self.max_time <= 0.0 {
            0.0
        } else {
            (self.time_left / self.max_time).clamp(0.0, 1.0)
        }
    }
}

/// Sounds the core asks the host to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundKind {
    Success,
    Error,
    Click,
    LevelUp,
}

/// Side effects for the host, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound {
        kind: SoundKind,
        intensity: f32,
    },
    RoundStarted { seed: u64 },
    LevelUp { level: u32 },
    RoundOver { score: u64 },
    /// The high score was beaten; the host should persist it
    NewHighScore { score: u64 },
}

/// Complete state of one player's game
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the session RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: RoundState,
    pub stats: RoundStats,
    /// Present while Playing
    pub puzzle: Option<Puzzle>,
    /// Best score seen so far, including earlier sessions
    pub high_score: u64,
    /// Seconds of simulated time since the session was created
    pub clock: f64,
    pub effects: EffectSystem,
    pub(crate) schedule: Schedule,
    /// A correct answer is showing; the next puzzle is on its way
    pub(crate) awaiting_puzzle: bool,
    pub(crate) events: Vec<GameEvent>,
}

impl Session {
    /// Create a session sitting at the menu
    pub fn new(seed: u64, high_score: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RoundState::Menu,
            stats: RoundStats::default(),
            puzzle: None,
            high_score,
            clock: 0.0,
            effects: EffectSystem::default(),
            schedule: Schedule::default(),
            awaiting_puzzle: false,
            events: Vec::new(),
        }
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of scheduled actions not yet fired
    pub fn pending_actions(&self) -> usize {
        self.schedule.len()
    }

    pub fn is_awaiting_puzzle(&self) -> bool {
        self.awaiting_puzzle
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn play(&mut self, kind: SoundKind, intensity: f32) {
        self.emit(GameEvent::Sound { kind, intensity });
    }
}
