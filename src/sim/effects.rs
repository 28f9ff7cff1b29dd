//! Transient visual effects and particles
//!
//! Effects are keyed by their own start time and animate as a pure function
//! of elapsed time, so they look the same at any frame rate. Particles
//! integrate ballistic motion scaled to a nominal 60 steps per second.
//! Nothing in here feeds back into scoring.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::ease::Easing;
use super::state::Tile;
use crate::consts::BASE_STEPS_PER_SEC;
use crate::{lerp, random_int};

/// Score popup rise speed (px/s)
const POPUP_RISE_SPEED: f32 = 90.0;
/// Shockwave ring growth (px/s)
const SHOCKWAVE_GROWTH: f32 = 900.0;

/// Per-step velocity retention
pub const PARTICLE_DRAG: f32 = 0.98;
/// Per-step downward acceleration
pub const PARTICLE_GRAVITY: f32 = 0.2;
/// Life lost per second
pub const PARTICLE_FADE_RATE: f32 = 1.2;

/// Default particle budget (see `Settings::max_particles`)
pub const DEFAULT_MAX_PARTICLES: usize = 1200;

/// Kind-specific payload and current animated values
#[derive(Debug, Clone, PartialEq)]
pub enum EffectKind {
    /// Floating "+N" above the grid
    ScorePopup {
        text: String,
        origin: Vec2,
        pos: Vec2,
        opacity: f32,
        scale: f32,
    },
    /// "COMBO xN!" flash
    ComboFlash {
        combo: u32,
        pos: Vec2,
        opacity: f32,
        scale: f32,
    },
    /// Expanding ring from a solved tile
    Shockwave {
        center: Vec2,
        radius: f32,
        opacity: f32,
    },
    /// Elastic pop-in of a freshly generated tile
    TilePop { tile: usize, scale: f32 },
}

/// A time-bounded visual event
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    /// Session clock at creation (seconds)
    pub start: f64,
    /// Lifetime (seconds)
    pub duration: f32,
}

impl Effect {
    pub fn score_popup(now: f64, points: u64, origin: Vec2) -> Self {
        Self {
            kind: EffectKind::ScorePopup {
                text: format!("+{points}"),
                origin,
                pos: origin,
                opacity: 1.0,
                scale: 1.0,
            },
            start: now,
            duration: 1.2,
        }
    }

    pub fn combo_flash(now: f64, combo: u32, pos: Vec2) -> Self {
        Self {
            kind: EffectKind::ComboFlash {
                combo,
                pos,
                opacity: 1.0,
                scale: 1.0,
            },
            start: now,
            duration: 0.6,
        }
    }

    pub fn shockwave(now: f64, center: Vec2) -> Self {
        Self {
            kind: EffectKind::Shockwave {
                center,
                radius: 0.0,
                opacity: 1.0,
            },
            start: now,
            duration: 0.6,
        }
    }

    /// Later tiles pop in slightly slower for a cascading reveal
    pub fn tile_pop(now: f64, tile: usize) -> Self {
        Self {
            kind: EffectKind::TilePop { tile, scale: 0.0 },
            start: now,
            duration: 0.4 + 0.04 * tile as f32,
        }
    }

    /// Elapsed fraction of the lifetime, clamped to [0, 1]
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (((now - self.start) as f32) / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Recompute animated values for time `now`. Tile pops write their
    /// scale through to the board. Returns false once finished.
    pub fn advance(&mut self, now: f64, tiles: Option<&mut [Tile]>) -> bool {
        let p = self.progress(now);
        let elapsed = ((now - self.start) as f32).clamp(0.0, self.duration.max(0.0));

        match &mut self.kind {
            EffectKind::ScorePopup {
                origin,
                pos,
                opacity,
                scale,
                ..
            } => {
                *pos = *origin - Vec2::Y * POPUP_RISE_SPEED * elapsed;
                *opacity = 1.0 - p;
                *scale = 1.0 + Easing::CubicOut.apply(p) * 0.5;
            }
            EffectKind::ComboFlash { opacity, scale, .. } => {
                *scale = 1.0 + (p * std::f32::consts::PI).sin() * 0.5;
                *opacity = 1.0 - p;
            }
            EffectKind::Shockwave {
                radius, opacity, ..
            } => {
                *radius = SHOCKWAVE_GROWTH * elapsed;
                *opacity = 1.0 - p;
            }
            EffectKind::TilePop { tile, scale } => {
                *scale = lerp(0.0, 1.0, Easing::ElasticOut.apply(p));
                if let Some(t) = tiles.and_then(|tiles| tiles.get_mut(*tile)) {
                    t.scale = *scale;
                }
            }
        }

        p < 1.0
    }
}

/// A single spark from a burst
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per nominal step
    pub vel: Vec2,
    pub color: u32,
    pub size: f32,
    /// 1 at birth, removed at <= 0
    pub life: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub gravity: f32,
}

impl Particle {
    /// Integrate one frame of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let steps = dt * BASE_STEPS_PER_SEC;
        self.pos += self.vel * steps;
        self.vel.y += self.gravity * steps;
        self.rotation += self.rotation_speed * steps;
        self.life -= dt * PARTICLE_FADE_RATE;
        self.vel *= PARTICLE_DRAG.powf(steps);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// All live effects and particles of a session
#[derive(Debug, Clone)]
pub struct EffectSystem {
    pub effects: Vec<Effect>,
    pub particles: Vec<Particle>,
    /// Particles beyond this are not spawned
    pub max_particles: usize,
    /// Skip shockwaves and staggered showers
    pub reduced_motion: bool,
}

impl Default for EffectSystem {
    fn default() -> Self {
        Self {
            effects: Vec::new(),
            particles: Vec::new(),
            max_particles: DEFAULT_MAX_PARTICLES,
            reduced_motion: false,
        }
    }
}

impl EffectSystem {
    pub fn push(&mut self, effect: Effect) {
        if self.reduced_motion && matches!(effect.kind, EffectKind::Shockwave { .. }) {
            return;
        }
        self.effects.push(effect);
    }

    /// Spawn `count` particles radiating from `pos`. Returns how many fit the budget.
    pub fn spawn_burst<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        pos: Vec2,
        color: u32,
        count: u32,
    ) -> usize {
        let room = self.max_particles.saturating_sub(self.particles.len());
        let count = (count as usize).min(room);
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32 + rng.random::<f32>() * 0.5;
            let speed = random_int(rng, 3, 8) as f32;
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                size: random_int(rng, 4, 10) as f32,
                life: 1.0,
                rotation: rng.random::<f32>() * TAU,
                rotation_speed: (rng.random::<f32>() - 0.5) * 0.3,
                gravity: PARTICLE_GRAVITY,
            });
        }
        count
    }

    /// Advance every effect to `now` and every particle by `dt`; prune the finished
    pub fn update(&mut self, now: f64, dt: f32, mut tiles: Option<&mut [Tile]>) {
        self.effects
            .retain_mut(|effect| effect.advance(now, tiles.as_deref_mut()));

        for particle in &mut self.particles {
            particle.update(dt);
        }
        self.particles.retain(Particle::is_alive);
    }

    /// Drop pop-ins that belong to a board being replaced
    pub fn clear_tile_pops(&mut self) {
        self.effects
            .retain(|e| !matches!(e.kind, EffectKind::TilePop { .. }));
    }

    pub fn clear(&mut self) {
        self.effects.clear();
        self.particles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.particles.is_empty()
    }
}
