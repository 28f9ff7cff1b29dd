//! NeuroGrid - a real-time number-pattern arcade puzzle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (puzzles, validation, round state, effects)
//! - `platform`: Host abstraction (pointer intents, frame clock)
//! - `renderer`: Render adapter contract and a text HUD renderer
//! - `audio`: Fire-and-forget sound sink
//! - `highscores`: Single persisted high score
//! - `settings`: Player preferences

pub mod app;
pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::App;
pub use highscores::{HighScoreStore, MemoryStore};
pub use settings::{QualityPreset, Settings};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (pointer positions are in these units)
    pub const GAME_WIDTH: f32 = 960.0;
    pub const GAME_HEIGHT: f32 = 640.0;

    /// Largest frame step the simulation accepts (tab backgrounding etc.)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Nominal step rate the particle integrator is tuned for
    pub const BASE_STEPS_PER_SEC: f32 = 60.0;

    /// Tile grid layout
    pub const GRID_COLS: usize = 4;
    pub const GRID_ROWS: usize = 3;
    pub const TILE_COUNT: usize = GRID_COLS * GRID_ROWS;
    pub const GRID_START_X: f32 = 220.0;
    pub const GRID_START_Y: f32 = 220.0;
    pub const GRID_SPACING_X: f32 = 175.0;
    pub const GRID_SPACING_Y: f32 = 135.0;
    /// Hit radius of a tile circle
    pub const TILE_RADIUS: f32 = 50.0;

    /// Difficulty stops scaling at this level
    pub const MAX_DIFFICULTY: u32 = 15;

    /// Round timer
    pub const START_TIME: f32 = 60.0;
    pub const MIN_MAX_TIME: f32 = 45.0;
    pub const CORRECT_TIME_BONUS: f32 = 6.0;
    pub const WRONG_TIME_PENALTY: f32 = 5.0;

    /// Scoring
    pub const BASE_POINTS: u64 = 150;
    pub const COMBO_POINTS: u64 = 40;
    pub const SPEED_POINTS: f32 = 80.0;
    pub const LEVEL_POINTS: u64 = 10;
    pub const POINTS_PER_LEVEL: u64 = 800;

    /// Delay between a correct submit and the next puzzle (seconds)
    pub const REGENERATE_DELAY: f64 = 0.25;

    /// Level-up shower: bursts, spacing (seconds), particles per burst
    pub const LEVEL_UP_BURSTS: u32 = 80;
    pub const LEVEL_UP_SPACING: f64 = 0.015;
    /// New-high-score celebration
    pub const CELEBRATION_BURSTS: u32 = 100;
    pub const CELEBRATION_SPACING: f64 = 0.020;
    pub const SHOWER_BURST_SIZE: u32 = 5;
}

/// Packed 0xRRGGBB colours shared by effects and renderers
pub mod palette {
    pub const PRIMARY: u32 = 0x00E5FF;
    pub const SECONDARY: u32 = 0x00FFA3;
    pub const ACCENT: u32 = 0xFF6B9D;
    pub const WARNING: u32 = 0xFFB700;
    pub const DANGER: u32 = 0xFF3D71;
    pub const SUCCESS: u32 = 0x00FF88;
    pub const VIOLET: u32 = 0x9966FF;

    /// Colours used by the level-up and high-score showers
    pub const SHOWER: [u32; 3] = [PRIMARY, SECONDARY, WARNING];
}

/// Uniform integer in `[min, max]` (inclusive). Returns `min` when the range is empty.
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// Linear interpolation between `start` and `end`
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}
