//! Easing curves
//!
//! Pure functions of a progress fraction `t` in [0, 1]. Shared by every effect kind.

use std::f32::consts::PI;

/// Easing curve selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    CubicOut,
    ElasticOut,
}

impl Easing {
    /// Apply the curve to a progress fraction (clamped to [0, 1])
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::CubicOut => cubic_out(t),
            Easing::ElasticOut => elastic_out(t),
        }
    }
}

#[inline]
pub fn cubic_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Overshoots past 1 before settling; exact at both ends
#[inline]
pub fn elastic_out(t: f32) -> f32 {
    const C4: f32 = (2.0 * PI) / 3.0;
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
    }
}
