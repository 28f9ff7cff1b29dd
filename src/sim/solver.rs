//! Exhaustive solver and a demo autoplayer
//!
//! A 12-tile board has only 4095 non-empty subsets, so brute force is fine.

use std::collections::VecDeque;

use super::state::{Constraint, RoundState, Session};
use super::tick::Intent;
use super::validate::is_correct;

/// Indices of some selection satisfying `constraint`, if one exists.
/// Smaller masks are tried first.
pub fn solve(values: &[u32], constraint: &Constraint) -> Option<Vec<usize>> {
    let n = values.len().min(16);
    let mut picked = Vec::with_capacity(n);
    for mask in 1u32..(1 << n) {
        picked.clear();
        picked.extend((0..n).filter(|i| mask & (1 << i) != 0).map(|i| values[i]));
        if is_correct(&picked, constraint) {
            return Some((0..n).filter(|i| mask & (1 << i) != 0).collect());
        }
    }
    None
}

/// Plays a session by itself, one intent per `think_time` seconds
#[derive(Debug, Clone)]
pub struct Autoplayer {
    pub think_time: f32,
    /// Start another round after game over
    pub replay: bool,
    cooldown: f32,
    plan: VecDeque<usize>,
}

impl Default for Autoplayer {
    fn default() -> Self {
        Self::new(0.35)
    }
}

impl Autoplayer {
    pub fn new(think_time: f32) -> Self {
        Self {
            think_time,
            replay: false,
            cooldown: 0.0,
            plan: VecDeque::new(),
        }
    }

    /// Decide what to do this frame
    pub fn next_intent(&mut self, session: &Session, dt: f32) -> Option<Intent> {
        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return None;
        }

        let intent = match session.phase {
            RoundState::Menu => Some(Intent::Start),
            RoundState::GameOver => self.replay.then_some(Intent::PlayAgain),
            RoundState::Playing => self.play(session),
        };
        if intent.is_some() {
            self.cooldown = self.think_time;
        }
        intent
    }

    fn play(&mut self, session: &Session) -> Option<Intent> {
        if session.is_awaiting_puzzle() {
            self.plan.clear();
            return None;
        }
        let puzzle = session.puzzle.as_ref()?;
        if !puzzle.tiles.iter().all(|t| t.is_interactive()) {
            return None;
        }

        if let Some(index) = self.plan.pop_front() {
            return Some(Intent::ToggleTile(index));
        }
        if puzzle.selected_count() > 0 {
            return Some(Intent::Submit);
        }

        // Unsolvable boards are left alone; the clock decides
        let solution = solve(&puzzle.values(), &puzzle.constraint)?;
        log::debug!("Autoplay plan: {:?}", solution);
        self.plan.extend(solution);
        self.plan.pop_front().map(Intent::ToggleTile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::puzzle::generate_kind;
    use crate::sim::state::{ConstraintKind, Puzzle, Tile};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_solve_sum() {
        let values = [5, 7, 3, 9, 1, 1, 1, 1, 1, 1, 1, 1];
        let c = Constraint::Sum(15);
        let picked = solve(&values, &c).expect("solvable");
        let chosen: Vec<u32> = picked.iter().map(|&i| values[i]).collect();
        assert!(is_correct(&chosen, &c));
    }

    #[test]
    fn test_solve_unsolvable() {
        let values = [2; 12];
        assert_eq!(solve(&values, &Constraint::OddCount(3)), None);
        assert_eq!(solve(&values, &Constraint::ConsecutiveRun(4)), None);
    }

    #[test]
    fn test_sum_boards_usually_solvable() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let solved = (0..200)
            .filter(|_| {
                let p = generate_kind(ConstraintKind::Sum, 5, &mut rng);
                solve(&p.values(), &p.constraint).is_some()
            })
            .count();
        assert!(solved > 180, "only {solved}/200 sum boards solvable");
    }

    #[test]
    fn test_autoplayer_scores() {
        let mut session = Session::new(31337, 0);
        session.start();
        let values = [5, 7, 3, 2, 2, 2, 2, 2, 2, 2, 2, 2];
        let tiles = std::array::from_fn(|i| {
            let mut tile = Tile::new(values[i], Tile::slot_position(i), 0.0);
            tile.scale = 1.0;
            tile
        });
        session.effects.clear_tile_pops();
        session.puzzle = Some(Puzzle {
            constraint: Constraint::Sum(15),
            tiles,
        });

        let mut bot = Autoplayer::new(0.05);
        let dt = 1.0 / 60.0;
        for _ in 0..(60 * 2) {
            if let Some(intent) = bot.next_intent(&session, dt) {
                session.apply(intent);
            }
            session.update(dt);
        }
        assert_eq!(session.phase, RoundState::Playing);
        assert!(session.stats.total_correct > 0);
        assert_eq!(session.stats.total_wrong, 0);
    }

    #[test]
    fn test_autoplayer_waits_without_replay() {
        let mut session = Session::new(1, 0);
        session.start();
        session.tick(100.0);
        let mut bot = Autoplayer::new(0.0);
        assert_eq!(bot.next_intent(&session, 0.1), None);
        bot.replay = true;
        assert_eq!(bot.next_intent(&session, 0.1), Some(Intent::PlayAgain));
    }
}
