//! Round state machine and variable-timestep frame update
//!
//! Operations that are not valid in the current phase are ignored and
//! report `false`/`None`; nothing here returns an error.

use glam::Vec2;
use rand::Rng;

use super::effects::Effect;
use super::puzzle::generate;
use super::schedule::Action;
use super::state::{GameEvent, RoundState, RoundStats, Session, SoundKind};
use super::validate::is_correct;
use crate::consts::*;
use crate::palette;

/// Tile idle pulse speed (radians/s)
const PULSE_SPEED: f32 = 3.0;
/// Scale recovery rate for bounced/shrunk tiles (per second)
const TILE_RELAX_RATE: f32 = 3.0;
const TILE_BOUNCE_SCALE: f32 = 1.15;
const TILE_WRONG_SCALE: f32 = 0.8;

const SCORE_POPUP_POS: Vec2 = Vec2::new(GAME_WIDTH / 2.0, 160.0);
const COMBO_FLASH_POS: Vec2 = Vec2::new(150.0, 120.0);

/// Player intents produced by the input adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    ToggleTile(usize),
    Submit,
    PlayAgain,
}

/// Result of a submission that was actually judged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct { points: u64, level_up: bool },
    Wrong,
}

/// Points a correct answer is worth right now (before the combo increments)
pub fn points_for(stats: &RoundStats) -> u64 {
    let speed = if stats.max_time > 0.0 {
        (SPEED_POINTS * (stats.time_left / stats.max_time))
            .floor()
            .max(0.0) as u64
    } else {
        0
    };
    BASE_POINTS + COMBO_POINTS * stats.combo as u64 + speed + LEVEL_POINTS * stats.level as u64
}

/// Level reached at `score`
pub fn level_for_score(score: u64) -> u32 {
    (score / POINTS_PER_LEVEL) as u32 + 1
}

/// Round length ceiling at `level`
pub fn max_time_for_level(level: u32) -> f32 {
    (65.0 - 2.0 * level as f32).max(MIN_MAX_TIME)
}

impl Session {
    /// Dispatch an input intent. Returns whether it changed anything.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Start => self.start(),
            Intent::ToggleTile(index) => self.toggle(index),
            Intent::Submit => self.submit().is_some(),
            Intent::PlayAgain => self.acknowledge(),
        }
    }

    /// Begin a fresh round (from Menu or GameOver)
    pub fn start(&mut self) -> bool {
        if self.phase == RoundState::Playing {
            return false;
        }

        self.stats = RoundStats::default();
        self.effects.clear();
        self.schedule.clear();
        self.awaiting_puzzle = false;
        self.phase = RoundState::Playing;

        self.play(SoundKind::Click, 1.0);
        self.emit(GameEvent::RoundStarted { seed: self.seed });
        self.new_puzzle();

        log::info!("Round started (seed {})", self.seed);
        true
    }

    /// Flip a tile's selection. Ignored until the tile has popped in.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.phase != RoundState::Playing || self.awaiting_puzzle {
            return false;
        }
        let Some(tile) = self.puzzle.as_mut().and_then(|p| p.tiles.get_mut(index)) else {
            return false;
        };
        if !tile.is_interactive() {
            return false;
        }

        tile.selected = !tile.selected;
        tile.scale = TILE_BOUNCE_SCALE;
        self.play(SoundKind::Click, 1.0);
        true
    }

    /// Judge the current selection. `None` when nothing was judged
    /// (wrong phase, empty selection, or the next puzzle is pending).
    pub fn submit(&mut self) -> Option<SubmitOutcome> {
        if self.phase != RoundState::Playing || self.awaiting_puzzle {
            return None;
        }
        let puzzle = self.puzzle.as_ref()?;
        let selected = puzzle.selected_values();
        if selected.is_empty() {
            return None;
        }

        if is_correct(&selected, &puzzle.constraint) {
            let positions: Vec<Vec2> = puzzle
                .tiles
                .iter()
                .filter(|t| t.selected)
                .map(|t| t.pos)
                .collect();
            Some(self.reward(&positions))
        } else {
            self.penalize();
            Some(SubmitOutcome::Wrong)
        }
    }

    fn reward(&mut self, positions: &[Vec2]) -> SubmitOutcome {
        let now = self.clock;
        let points = points_for(&self.stats);

        let stats = &mut self.stats;
        stats.score += points;
        stats.combo += 1;
        stats.total_correct += 1;
        stats.max_combo = stats.max_combo.max(stats.combo);
        stats.time_left = (stats.time_left + CORRECT_TIME_BONUS).min(stats.max_time);
        let combo = stats.combo;

        for &pos in positions {
            self.effects
                .spawn_burst(&mut self.rng, pos, palette::PRIMARY, 30);
            self.effects
                .spawn_burst(&mut self.rng, pos, palette::SECONDARY, 20);
            self.effects.push(Effect::shockwave(now, pos));
        }
        self.effects
            .push(Effect::score_popup(now, points, SCORE_POPUP_POS));
        if combo > 1 {
            self.effects
                .push(Effect::combo_flash(now, combo, COMBO_FLASH_POS));
        }
        self.play(SoundKind::Success, combo.min(5) as f32);

        let new_level = level_for_score(self.stats.score);
        let level_up = new_level > self.stats.level;
        if level_up {
            self.stats.level = new_level;
            self.stats.max_time = max_time_for_level(new_level);
            self.stats.time_left = self.stats.time_left.min(self.stats.max_time);
            self.level_up_effect();
        }

        self.schedule
            .push(now + REGENERATE_DELAY, Action::RegeneratePuzzle);
        self.awaiting_puzzle = true;

        log::debug!(
            "Correct: +{} (combo {}, score {})",
            points,
            combo,
            self.stats.score
        );
        SubmitOutcome::Correct { points, level_up }
    }

    fn penalize(&mut self) {
        let stats = &mut self.stats;
        stats.combo = 0;
        stats.total_wrong += 1;
        stats.time_left = (stats.time_left - WRONG_TIME_PENALTY).max(0.0);

        if let Some(puzzle) = self.puzzle.as_mut() {
            for tile in puzzle.tiles.iter_mut().filter(|t| t.selected) {
                self.effects
                    .spawn_burst(&mut self.rng, tile.pos, palette::DANGER, 20);
                tile.scale = TILE_WRONG_SCALE;
            }
            puzzle.clear_selection();
        }
        self.play(SoundKind::Error, 1.0);

        log::debug!("Wrong answer ({}s left)", self.stats.time_left);
    }

    fn level_up_effect(&mut self) {
        let level = self.stats.level;
        self.emit(GameEvent::LevelUp { level });
        self.play(SoundKind::LevelUp, 1.0);
        self.schedule_shower(LEVEL_UP_BURSTS, LEVEL_UP_SPACING);
        log::info!("Level up: {} (max time {}s)", level, self.stats.max_time);
    }

    /// Queue `bursts` small random-position bursts `spacing` seconds apart
    fn schedule_shower(&mut self, bursts: u32, spacing: f64) {
        if self.effects.reduced_motion {
            return;
        }
        for i in 0..bursts {
            let color = palette::SHOWER[crate::random_int(&mut self.rng, 0, 2) as usize];
            self.schedule.push(
                self.clock + i as f64 * spacing,
                Action::Burst {
                    color,
                    count: SHOWER_BURST_SIZE,
                },
            );
        }
    }

    /// Run the round timer down by `dt` seconds; ends the round at zero
    pub fn tick(&mut self, dt: f32) {
        if self.phase != RoundState::Playing {
            return;
        }
        self.stats.time_left -= dt.max(0.0);
        if self.stats.time_left <= 0.0 {
            self.finish_round();
        }
    }

    fn finish_round(&mut self) {
        self.stats.time_left = 0.0;
        self.phase = RoundState::GameOver;
        self.awaiting_puzzle = false;

        let score = self.stats.score;
        self.emit(GameEvent::RoundOver { score });
        if score > self.high_score {
            self.high_score = score;
            self.emit(GameEvent::NewHighScore { score });
            self.schedule_shower(CELEBRATION_BURSTS, CELEBRATION_SPACING);
            log::info!("Round over: {} (new high score)", score);
        } else {
            log::info!("Round over: {} (best {})", score, self.high_score);
        }
    }

    /// Leave the summary screen. Drops everything left over from the round.
    pub fn acknowledge(&mut self) -> bool {
        if self.phase != RoundState::GameOver {
            return false;
        }
        self.phase = RoundState::Menu;
        self.effects.clear();
        self.schedule.clear();
        self.puzzle = None;
        self.play(SoundKind::Click, 1.0);
        true
    }

    /// One display frame: timer, due actions, tile visuals, effects
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.clock += dt as f64;

        self.tick(dt);
        self.run_due_actions();
        self.relax_tiles(dt);

        let tiles = self.puzzle.as_mut().map(|p| &mut p.tiles[..]);
        self.effects.update(self.clock, dt, tiles);
    }

    fn run_due_actions(&mut self) {
        while let Some(action) = self.schedule.pop_due(self.clock) {
            match action {
                Action::RegeneratePuzzle => {
                    if self.phase == RoundState::Playing && self.awaiting_puzzle {
                        self.new_puzzle();
                    }
                }
                Action::Burst { color, count } => {
                    let pos = Vec2::new(
                        self.rng.random::<f32>() * GAME_WIDTH,
                        self.rng.random::<f32>() * GAME_HEIGHT,
                    );
                    self.effects.spawn_burst(&mut self.rng, pos, color, count);
                }
            }
        }
    }

    fn relax_tiles(&mut self, dt: f32) {
        let Some(puzzle) = self.puzzle.as_mut() else {
            return;
        };
        for tile in &mut puzzle.tiles {
            if tile.scale > 1.0 {
                tile.scale = (tile.scale - dt * TILE_RELAX_RATE).max(1.0);
            } else if tile.scale > 0.0 && tile.scale < 1.0 {
                tile.scale = (tile.scale + dt * TILE_RELAX_RATE).min(1.0);
            }
            tile.pulse_phase = (tile.pulse_phase + dt * PULSE_SPEED) % std::f32::consts::TAU;
        }
    }

    /// Swap in a new board and constraint in one step
    fn new_puzzle(&mut self) {
        let puzzle = generate(self.stats.level, &mut self.rng);
        log::debug!(
            "Puzzle for level {}: {:?} {:?}",
            self.stats.level,
            puzzle.constraint,
            puzzle.values()
        );

        self.effects.clear_tile_pops();
        for i in 0..puzzle.tiles.len() {
            self.effects.push(Effect::tile_pop(self.clock, i));
        }
        self.puzzle = Some(puzzle);
        self.awaiting_puzzle = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::EffectKind;
    use crate::sim::state::{Constraint, Puzzle, Tile};
    use proptest::prelude::*;

    /// Session in Playing with every tile popped in
    fn playing() -> Session {
        let mut session = Session::new(12345, 0);
        assert!(session.start());
        for _ in 0..10 {
            session.update(0.1);
        }
        session.drain_events();
        session
    }

    /// Replace the board with known values, all interactive
    fn install(session: &mut Session, constraint: Constraint, values: [u32; TILE_COUNT]) {
        let tiles = std::array::from_fn(|i| {
            let mut tile = Tile::new(values[i], Tile::slot_position(i), 0.0);
            tile.scale = 1.0;
            tile
        });
        session.effects.clear_tile_pops();
        session.puzzle = Some(Puzzle { constraint, tiles });
    }

    const SUM_BOARD: [u32; TILE_COUNT] = [5, 7, 3, 9, 11, 2, 4, 6, 8, 10, 12, 14];

    fn select(session: &mut Session, indices: &[usize]) {
        for &i in indices {
            assert!(session.toggle(i), "toggle {i}");
        }
    }

    #[test]
    fn test_start_round_trip() {
        let mut session = Session::new(1, 500);
        assert!(session.start());
        assert_eq!(session.phase, RoundState::Playing);
        assert_eq!(session.stats.score, 0);
        assert_eq!(session.stats.level, 1);
        assert_eq!(session.stats.time_left, START_TIME);
        assert_eq!(session.stats.max_time, START_TIME);
        let puzzle = session.puzzle.as_ref().expect("puzzle");
        assert_eq!(puzzle.tiles.len(), 12);
        assert_eq!(puzzle.selected_count(), 0);
        assert!(
            session
                .drain_events()
                .contains(&GameEvent::RoundStarted { seed: 1 })
        );
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut session = playing();
        session.stats.score = 99;
        assert!(!session.start());
        assert_eq!(session.stats.score, 99);
    }

    #[test]
    fn test_operations_ignored_in_menu() {
        let mut session = Session::new(1, 0);
        assert_eq!(session.submit(), None);
        assert!(!session.toggle(0));
        assert!(!session.acknowledge());
        session.tick(5.0);
        assert_eq!(session.stats.time_left, START_TIME);
        assert_eq!(session.phase, RoundState::Menu);
    }

    #[test]
    fn test_tiles_not_toggleable_before_pop_in() {
        let mut session = Session::new(3, 0);
        session.start();
        assert!(!session.toggle(0));
        session.update(0.1);
        session.update(0.1);
        session.update(0.1);
        session.update(0.1);
        session.update(0.05);
        // first tile (0.4 s pop) is ready, last (0.84 s) is not
        assert!(session.toggle(0));
        assert!(!session.toggle(11));
    }

    #[test]
    fn test_toggle_bounces_and_relaxes() {
        let mut session = playing();
        assert!(session.toggle(4));
        let tile = session.puzzle.as_ref().unwrap().tiles[4];
        assert!(tile.selected);
        assert!((tile.scale - 1.15).abs() < 1e-6);
        session.update(0.1);
        assert_eq!(session.puzzle.as_ref().unwrap().tiles[4].scale, 1.0);
        assert!(session.toggle(4));
        assert!(!session.puzzle.as_ref().unwrap().tiles[4].selected);
        assert!(!session.toggle(12));
    }

    #[test]
    fn test_scoring_example() {
        let mut session = playing();
        session.stats.time_left = 60.0;
        install(&mut session, Constraint::Sum(15), SUM_BOARD);
        select(&mut session, &[0, 1, 2]);

        let outcome = session.submit();
        assert_eq!(
            outcome,
            Some(SubmitOutcome::Correct {
                points: 240,
                level_up: false
            })
        );
        assert_eq!(session.stats.score, 240);
        assert_eq!(session.stats.combo, 1);
        assert_eq!(session.stats.max_combo, 1);
        assert_eq!(session.stats.total_correct, 1);
        assert_eq!(session.stats.time_left, 60.0);

        let events = session.drain_events();
        assert!(events.contains(&GameEvent::Sound {
            kind: SoundKind::Success,
            intensity: 1.0
        }));
        // 3 tiles x (30 + 20) particles, one shockwave each, one popup, no combo flash
        assert_eq!(session.effects.particles.len(), 150);
        let shockwaves = session
            .effects
            .effects
            .iter()
            .filter(|e| matches!(e.kind, EffectKind::Shockwave { .. }))
            .count();
        assert_eq!(shockwaves, 3);
        assert!(
            !session
                .effects
                .effects
                .iter()
                .any(|e| matches!(e.kind, EffectKind::ComboFlash { .. }))
        );
    }

    #[test]
    fn test_wrong_selection_rejected() {
        let mut session = playing();
        install(&mut session, Constraint::Sum(15), SUM_BOARD);
        select(&mut session, &[0, 3]);
        assert_eq!(session.submit(), Some(SubmitOutcome::Wrong));
    }

    #[test]
    fn test_combo_builds_across_puzzles() {
        let mut session = playing();
        session.stats.time_left = 30.0;
        install(&mut session, Constraint::Sum(15), SUM_BOARD);
        select(&mut session, &[0, 1, 2]);
        session.submit();

        // next puzzle arrives after the short delay
        assert!(session.is_awaiting_puzzle());
        session.update(0.1);
        session.update(0.1);
        assert!(session.is_awaiting_puzzle());
        session.update(0.1);
        assert!(!session.is_awaiting_puzzle());

        let time_before = session.stats.time_left;
        install(&mut session, Constraint::Sum(15), SUM_BOARD);
        select(&mut session, &[0, 1, 2]);
        let expected = 150 + 40 + (80.0 * time_before / 60.0).floor() as u64 + 10;
        assert_eq!(
            session.submit(),
            Some(SubmitOutcome::Correct {
                points: expected,
                level_up: false
            })
        );
        assert_eq!(session.stats.combo, 2);
        assert!(
            session
                .effects
                .effects
                .iter()
                .any(|e| matches!(e.kind, EffectKind::ComboFlash { combo: 2, .. }))
        );
    }

    #[test]
    fn test_correct_answer_adds_time() {
        let mut session = playing();
        session.stats.time_left = 30.0;
        install(&mut session, Constraint::Sum(15), SUM_BOARD);
        select(&mut session, &[0, 1, 2]);

        // 150 base + 40 speed (half the clock) + 10 level
        assert_eq!(
            session.submit(),
            Some(SubmitOutcome::Correct {
                points: 200,
                level_up: false
            })
        );
        assert_eq!(session.stats.time_left, 36.0);
        assert_eq!(session.stats.max_time, START_TIME);
        assert_eq!(session.stats.level, 1);
    }

    #[test]
    fn test_time_bonus_capped_at_max_time() {
        let mut session = playing();
        session.stats.time_left = 57.5;
        install(&mut session, Constraint::Sum(15), SUM_BOARD);
        select(&mut session, &[0, 1, 2]);
        session.submit();
        assert_eq!(session.stats.time_left, session.stats.max_time);
    }

    #[test]
    fn test_input_locked_while_next_puzzle_pending() {
        let mut session = playing();
        install(&mut session, Constraint::Sum(15), SUM_BOARD);
        select(&mut session, &[0, 1, 2]);
        session.submit();
        assert_eq!(session.submit(), None);
        assert!(!session.toggle(5));
        assert_eq!(session.stats.total_correct, 1);
    }

    #[test]
    fn test_wrong_submission_penalties() {
        let mut session = playing();
        session.stats.combo = 4;
        session.stats.time_left = 30.0;
        install(&mut session, Constraint::Sum(15), SUM_BOARD);
        select(&mut session, &[0, 3]);
        session.drain_events();

        assert_eq!(session.submit(), Some(SubmitOutcome::Wrong));
        assert_eq!(session.stats.combo, 0);
        assert_eq!(session.stats.total_wrong, 1);
        assert_eq!(session.stats.time_left, 25.0);
        let puzzle = session.puzzle.as_ref().unwrap();
        assert_eq!(puzzle.selected_count(), 0);
        assert_eq!(puzzle.tiles[0].scale, 0.8);
        assert_eq!(puzzle.tiles[3].scale, 0.8);
        assert_eq!(puzzle.tiles[1].scale, 1.0);
        assert_eq!(session.effects.particles.len(), 40);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Sound {
                kind: SoundKind::Error,
                intensity: 1.0
            }]
        );
        // same board stays up
        assert!(!session.is_awaiting_puzzle());
    }

    #[test]
    fn test_wrong_submission_time_floors_at_zero() {
        let mut session = playing();
        session.stats.time_left = 2.0;
        install(&mut session, Constraint::Sum(15), SUM_BOARD);
        select(&mut session, &[3]);
        session.submit();
        assert_eq!(session.stats.time_left, 0.0);
        assert_eq!(session.phase, RoundState::Playing);
        session.update(0.016);
        assert_eq!(session.phase, RoundState::GameOver);
    }

    #[test]
    fn test_empty_submit_ignored() {
        let mut session = playing();
        let before = session.stats.clone();
        assert_eq!(session.submit(), None);
        assert_eq!(session.stats, before);
    }

    #[test]
    fn test_level_up() {
        let mut session = playing();
        session.stats.score = 790;
        session.stats.time_left = 60.0;
        install(&mut session, Constraint::Sum(15), SUM_BOARD);
        select(&mut session, &[0, 1, 2]);

        assert_eq!(
            session.submit(),
            Some(SubmitOutcome::Correct {
                points: 240,
                level_up: true
            })
        );
        assert_eq!(session.stats.level, 2);
        assert_eq!(session.stats.max_time, 61.0);
        assert!(
            session
                .drain_events()
                .contains(&GameEvent::LevelUp { level: 2 })
        );
        // 80 shower bursts plus the pending puzzle
        assert_eq!(session.pending_actions(), 81);
    }

    #[test]
    fn test_level_up_clamps_time_to_new_ceiling() {
        let mut session = playing();
        session.stats.score = 1590;
        session.stats.level = 2;
        session.stats.max_time = 61.0;
        session.stats.time_left = 61.0;
        install(&mut session, Constraint::Sum(15), SUM_BOARD);
        select(&mut session, &[0, 1, 2]);

        session.submit();
        assert_eq!(session.stats.level, 3);
        assert_eq!(session.stats.max_time, 59.0);
        assert_eq!(session.stats.time_left, 59.0);
    }

    #[test]
    fn test_max_time_floor() {
        assert_eq!(max_time_for_level(2), 61.0);
        assert_eq!(max_time_for_level(10), 45.0);
        assert_eq!(max_time_for_level(30), 45.0);
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(799), 1);
        assert_eq!(level_for_score(800), 2);
    }

    #[test]
    fn test_timer_runs_out() {
        let mut session = playing();
        session.stats.score = 1000;
        session.high_score = 500;
        session.tick(100.0);

        assert_eq!(session.phase, RoundState::GameOver);
        assert_eq!(session.stats.time_left, 0.0);
        assert_eq!(session.high_score, 1000);
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::RoundOver { score: 1000 }));
        assert!(events.contains(&GameEvent::NewHighScore { score: 1000 }));
        assert_eq!(session.pending_actions(), 100);

        // the shower plays out over ~2 seconds in the GameOver screen
        for _ in 0..25 {
            session.update(0.1);
        }
        assert_eq!(session.pending_actions(), 0);
        assert!(!session.effects.particles.is_empty());
    }

    #[test]
    fn test_reduced_motion_skips_celebration() {
        let mut session = playing();
        session.effects.reduced_motion = true;
        session.stats.score = 1000;
        session.high_score = 500;
        session.tick(100.0);

        assert_eq!(session.phase, RoundState::GameOver);
        assert_eq!(session.high_score, 1000);
        assert!(
            session
                .drain_events()
                .contains(&GameEvent::NewHighScore { score: 1000 })
        );
        assert_eq!(session.pending_actions(), 0);
    }

    #[test]
    fn test_no_high_score_when_not_beaten() {
        let mut session = playing();
        session.stats.score = 300;
        session.high_score = 300;
        session.tick(61.0);
        let events = session.drain_events();
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
        assert_eq!(session.pending_actions(), 0);
        assert_eq!(session.high_score, 300);
    }

    #[test]
    fn test_frame_dt_clamped() {
        let mut session = playing();
        let before = session.stats.time_left;
        session.update(5.0);
        assert!((before - session.stats.time_left - MAX_FRAME_DT).abs() < 1e-5);
        session.update(f32::NAN);
        session.update(-1.0);
        assert!((before - session.stats.time_left - MAX_FRAME_DT).abs() < 1e-5);
    }

    #[test]
    fn test_regeneration_dropped_after_round_ends() {
        let mut session = playing();
        session.high_score = u64::MAX;
        install(&mut session, Constraint::Sum(15), SUM_BOARD);
        select(&mut session, &[0, 1, 2]);
        session.submit();

        // run the clock out before the next puzzle is due
        session.stats.time_left = 0.05;
        session.update(0.1);
        assert_eq!(session.phase, RoundState::GameOver);
        for _ in 0..5 {
            session.update(0.1);
        }
        let puzzle = session.puzzle.as_ref().unwrap();
        assert_eq!(puzzle.constraint, Constraint::Sum(15));
        assert_eq!(puzzle.values(), SUM_BOARD);
        assert_eq!(session.pending_actions(), 0);
    }

    #[test]
    fn test_acknowledge_discards_round_leftovers() {
        let mut session = playing();
        session.stats.score = 10_000;
        session.tick(100.0);
        session.update(0.05);
        assert!(session.pending_actions() > 0);

        assert!(session.apply(Intent::PlayAgain));
        assert_eq!(session.phase, RoundState::Menu);
        assert_eq!(session.pending_actions(), 0);
        assert!(session.effects.is_empty());
        assert!(session.puzzle.is_none());

        assert!(session.apply(Intent::Start));
        assert_eq!(session.stats, RoundStats::default());
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut session = playing();
        session.tick(100.0);
        assert!(session.start());
        assert_eq!(session.phase, RoundState::Playing);
        assert_eq!(session.pending_actions(), 0);
    }

    #[test]
    fn test_same_seed_same_round() {
        let mut a = Session::new(777, 0);
        let mut b = Session::new(777, 0);
        for s in [&mut a, &mut b] {
            s.start();
            for _ in 0..30 {
                s.update(1.0 / 60.0);
            }
        }
        assert_eq!(a.puzzle, b.puzzle);
        assert_eq!(a.stats, b.stats);
    }

    proptest! {
        #[test]
        fn prop_timer_monotonic_and_bounded(dts in prop::collection::vec(0.0f32..0.5, 1..200)) {
            let mut session = Session::new(9, 0);
            session.start();
            let mut prev = session.stats.time_left;
            for dt in dts {
                session.update(dt);
                let t = session.stats.time_left;
                prop_assert!(t <= prev);
                prop_assert!(t >= 0.0 && t <= session.stats.max_time);
                prev = t;
            }
        }
    }
}
