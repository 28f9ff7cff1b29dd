//! Render adapter contract
//!
//! Renderers get read-only views of the session once per frame. What they
//! draw on (canvas, terminal, GPU) is their business.

pub mod text;

pub use text::TextRenderer;

use crate::sim::{Constraint, Effect, Particle, RoundState, RoundStats, Session, Tile};

/// A drawing surface for the three screens
pub trait Renderer {
    fn draw_menu(&mut self, stats: &RoundStats, high_score: u64);

    fn draw_playing(
        &mut self,
        stats: &RoundStats,
        tiles: &[Tile],
        constraint: &Constraint,
        effects: &[Effect],
        particles: &[Particle],
    );

    fn draw_game_over(&mut self, stats: &RoundStats, high_score: u64);
}

/// Draw the screen for the session's current phase
pub fn render<R: Renderer + ?Sized>(session: &Session, renderer: &mut R) {
    match session.phase {
        RoundState::Menu => renderer.draw_menu(&session.stats, session.high_score),
        RoundState::Playing => {
            if let Some(puzzle) = &session.puzzle {
                renderer.draw_playing(
                    &session.stats,
                    &puzzle.tiles,
                    &puzzle.constraint,
                    &session.effects.effects,
                    &session.effects.particles,
                );
            }
        }
        RoundState::GameOver => renderer.draw_game_over(&session.stats, session.high_score),
    }
}
