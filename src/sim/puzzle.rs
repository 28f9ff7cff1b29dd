//! Puzzle generation
//!
//! Picks a constraint for the level and fills the 4x3 board. Targets and
//! value ranges scale with difficulty so that a solution usually exists;
//! solvability is not verified (Product and ConsecutiveRun boards can be dead).

use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use rand::Rng;

use super::state::{Constraint, ConstraintKind, Puzzle, Tile};
use crate::consts::*;
use crate::random_int;

/// Targets available to Product puzzles, easiest first
pub const PRODUCT_LADDER: [u32; 10] = [12, 18, 20, 24, 30, 36, 40, 48, 60, 72];

/// Run length required by ConsecutiveRun puzzles
pub const RUN_LENGTH: u32 = 4;

/// Difficulty used for parameter scaling
#[inline]
pub fn difficulty(level: u32) -> u32 {
    level.clamp(1, MAX_DIFFICULTY)
}

/// Constraint kinds that may be drawn at this difficulty
pub fn eligible_kinds(difficulty: u32) -> Vec<ConstraintKind> {
    let mut kinds = vec![
        ConstraintKind::Sum,
        ConstraintKind::EvenCount,
        ConstraintKind::OddCount,
        ConstraintKind::GreaterThanCount,
    ];
    if difficulty > 2 {
        kinds.push(ConstraintKind::Product);
    }
    if difficulty > 5 {
        kinds.push(ConstraintKind::ConsecutiveRun);
    }
    kinds
}

/// Upper bound shared by the counting kinds
#[inline]
fn max_value(difficulty: u32) -> u32 {
    (12 + 2 * difficulty).min(35)
}

/// Range tile values are drawn from for `kind` at `difficulty`
pub fn value_range(kind: ConstraintKind, difficulty: u32) -> RangeInclusive<u32> {
    let d = difficulty;
    match kind {
        ConstraintKind::Sum => 2..=max_value(d),
        ConstraintKind::Product => 2..=10,
        ConstraintKind::EvenCount | ConstraintKind::OddCount => 1..=max_value(d),
        ConstraintKind::GreaterThanCount => 1..=max_value(d) + 8,
        ConstraintKind::ConsecutiveRun => 1..=20,
    }
}

/// Range the target is drawn from for `kind` at `difficulty`.
/// Product targets are ladder rungs, so this is the rung index range.
fn target_range(kind: ConstraintKind, difficulty: u32) -> RangeInclusive<u32> {
    let d = difficulty;
    match kind {
        ConstraintKind::Sum => (20 + 2 * d)..=(40 + 3 * d),
        ConstraintKind::Product => {
            let top = (d as usize - 1).min(PRODUCT_LADDER.len() - 1) as u32;
            0..=top
        }
        ConstraintKind::EvenCount | ConstraintKind::OddCount => {
            let n = 3 + d / 4;
            n..=n
        }
        ConstraintKind::GreaterThanCount => {
            let t = 12 + 2 * d;
            t..=t
        }
        ConstraintKind::ConsecutiveRun => RUN_LENGTH..=RUN_LENGTH,
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, range: &RangeInclusive<u32>) -> u32 {
    random_int(rng, *range.start() as i32, *range.end() as i32) as u32
}

/// Draw a target for `kind` at `difficulty`
pub fn draw_target<R: Rng + ?Sized>(rng: &mut R, kind: ConstraintKind, difficulty: u32) -> u32 {
    let drawn = draw(rng, &target_range(kind, difficulty));
    match kind {
        ConstraintKind::Product => PRODUCT_LADDER[drawn as usize],
        _ => drawn,
    }
}

/// Generate a fresh puzzle for `level`
pub fn generate<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Puzzle {
    let d = difficulty(level);
    let kinds = eligible_kinds(d);
    let kind = kinds[random_int(rng, 0, kinds.len() as i32 - 1) as usize];
    generate_kind(kind, d, rng)
}

/// Generate a puzzle of a fixed kind at `difficulty`
pub fn generate_kind<R: Rng + ?Sized>(
    kind: ConstraintKind,
    difficulty: u32,
    rng: &mut R,
) -> Puzzle {
    let d = difficulty.clamp(1, MAX_DIFFICULTY);
    let constraint: Constraint = kind.with_target(draw_target(rng, kind, d));
    let values = value_range(kind, d);

    let tiles = std::array::from_fn(|i| {
        let value = draw(rng, &values);
        let phase = rng.random::<f32>() * TAU;
        Tile::new(value, Tile::slot_position(i), phase)
    });

    Puzzle { constraint, tiles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_eligible_kinds_unlock() {
        assert_eq!(eligible_kinds(1).len(), 4);
        assert_eq!(eligible_kinds(2).len(), 4);
        assert!(eligible_kinds(3).contains(&ConstraintKind::Product));
        assert!(!eligible_kinds(5).contains(&ConstraintKind::ConsecutiveRun));
        assert!(eligible_kinds(6).contains(&ConstraintKind::ConsecutiveRun));
        assert_eq!(eligible_kinds(15).len(), 6);
    }

    #[test]
    fn test_difficulty_capped() {
        assert_eq!(difficulty(1), 1);
        assert_eq!(difficulty(15), 15);
        assert_eq!(difficulty(40), 15);
    }

    #[test]
    fn test_fixed_targets() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(draw_target(&mut rng, ConstraintKind::EvenCount, 1), 3);
        assert_eq!(draw_target(&mut rng, ConstraintKind::OddCount, 8), 5);
        assert_eq!(
            draw_target(&mut rng, ConstraintKind::GreaterThanCount, 4),
            20
        );
        assert_eq!(draw_target(&mut rng, ConstraintKind::ConsecutiveRun, 9), 4);
    }

    #[test]
    fn test_product_ladder_level_one_is_lowest_rung() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            assert_eq!(draw_target(&mut rng, ConstraintKind::Product, 1), 12);
        }
    }

    #[test]
    fn test_generate_same_seed_same_puzzle() {
        let a = generate(4, &mut Pcg32::seed_from_u64(99));
        let b = generate(4, &mut Pcg32::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_layout_and_rest_state() {
        let puzzle = generate(1, &mut Pcg32::seed_from_u64(5));
        for (i, tile) in puzzle.tiles.iter().enumerate() {
            assert_eq!(tile.pos, Tile::slot_position(i));
            assert!(!tile.selected);
            assert_eq!(tile.scale, 0.0);
            assert!((0.0..TAU).contains(&tile.pulse_phase));
        }
    }

    #[test]
    fn test_low_levels_never_draw_locked_kinds() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..300 {
            let kind = generate(2, &mut rng).constraint.kind();
            assert!(kind != ConstraintKind::Product && kind != ConstraintKind::ConsecutiveRun);
        }
    }

    proptest! {
        #[test]
        fn prop_values_within_range(seed in any::<u64>(), level in 1u32..=15, kind_idx in 0usize..6) {
            let kind = ConstraintKind::ALL[kind_idx];
            let mut rng = Pcg32::seed_from_u64(seed);
            let puzzle = generate_kind(kind, level, &mut rng);
            let range = value_range(kind, level);
            prop_assert_eq!(puzzle.tiles.len(), TILE_COUNT);
            prop_assert_eq!(puzzle.constraint.kind(), kind);
            for tile in &puzzle.tiles {
                prop_assert!(range.contains(&tile.value));
            }
        }

        #[test]
        fn prop_sum_target_within_range(seed in any::<u64>(), level in 1u32..=15) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let target = draw_target(&mut rng, ConstraintKind::Sum, level);
            prop_assert!(target >= 20 + 2 * level && target <= 40 + 3 * level);
        }

        #[test]
        fn prop_generate_any_level_gives_full_board(seed in any::<u64>(), level in 1u32..=40) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let puzzle = generate(level, &mut rng);
            let d = difficulty(level);
            prop_assert!(eligible_kinds(d).contains(&puzzle.constraint.kind()));
            let range = value_range(puzzle.constraint.kind(), d);
            prop_assert!(puzzle.tiles.iter().all(|t| range.contains(&t.value)));
        }
    }
}
