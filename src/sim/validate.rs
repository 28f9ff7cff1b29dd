//! Selection validation
//!
//! Pure: the answer depends only on the selected values and the constraint.

use super::state::Constraint;

/// Minimum selection size for GreaterThanCount
pub const MIN_GREATER_COUNT: usize = 3;

/// Does `selected` satisfy `constraint`? Empty selections never do.
pub fn is_correct(selected: &[u32], constraint: &Constraint) -> bool {
    if selected.is_empty() {
        return false;
    }

    match *constraint {
        Constraint::Sum(target) => selected.iter().map(|&v| v as u64).sum::<u64>() == target as u64,
        Constraint::Product(target) => {
            selected
                .iter()
                .fold(1u64, |acc, &v| acc.saturating_mul(v as u64))
                == target as u64
        }
        Constraint::EvenCount(count) => {
            selected.len() == count as usize && selected.iter().all(|v| v % 2 == 0)
        }
        Constraint::OddCount(count) => {
            selected.len() == count as usize && selected.iter().all(|v| v % 2 == 1)
        }
        Constraint::GreaterThanCount(threshold) => {
            selected.len() >= MIN_GREATER_COUNT && selected.iter().all(|&v| v > threshold)
        }
        Constraint::ConsecutiveRun(length) => {
            if selected.len() != length as usize {
                return false;
            }
            let mut sorted = selected.to_vec();
            sorted.sort_unstable();
            sorted.windows(2).all(|w| w[1] == w[0] + 1)
        }
    }
}
