//! Plain-text HUD renderer
//!
//! Used by the headless native build for logging and by tests to check what a
//! real renderer would be handed.

use super::Renderer;
use crate::consts::GRID_COLS;
use crate::sim::{Constraint, Effect, EffectKind, Particle, RoundStats, Tile};

/// Cells in the HUD timer bar
const TIMER_BAR_WIDTH: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    /// Lines of the last drawn frame
    pub lines: Vec<String>,
    /// Accent colour of the instruction line (second line) while playing
    pub accent: Option<u32>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last frame as one string
    pub fn frame(&self) -> String {
        self.lines.join("\n")
    }
}

fn timer_bar(stats: &RoundStats) -> String {
    let filled = (stats.time_fraction() * TIMER_BAR_WIDTH as f32).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(TIMER_BAR_WIDTH - filled)
    )
}

impl Renderer for TextRenderer {
    fn draw_menu(&mut self, _stats: &RoundStats, high_score: u64) {
        self.accent = None;
        self.lines = vec![
            "NEUROGRID".to_string(),
            format!("HIGH SCORE {high_score}"),
            "[ START GAME ]".to_string(),
        ];
    }

    fn draw_playing(
        &mut self,
        stats: &RoundStats,
        tiles: &[Tile],
        constraint: &Constraint,
        effects: &[Effect],
        particles: &[Particle],
    ) {
        self.lines.clear();

        let mut hud = format!(
            "SCORE {} | LEVEL {} | TIME {:.1}/{:.0} {}",
            stats.score,
            stats.level,
            stats.time_left,
            stats.max_time,
            timer_bar(stats)
        );
        if stats.combo > 0 {
            hud.push_str(&format!(" | COMBO x{}", stats.combo));
        }
        self.lines.push(hud);
        self.lines.push(constraint.describe());
        self.accent = Some(constraint.accent_color());

        for row in tiles.chunks(GRID_COLS) {
            let cells: Vec<String> = row
                .iter()
                .map(|t| {
                    if t.selected {
                        format!("[{:>2}]", t.value)
                    } else {
                        format!(" {:>2} ", t.value)
                    }
                })
                .collect();
            self.lines.push(cells.join(" "));
        }

        for effect in effects {
            match &effect.kind {
                EffectKind::ScorePopup { text, .. } => self.lines.push(text.clone()),
                EffectKind::ComboFlash { combo, .. } => self.lines.push(format!("COMBO x{combo}!")),
                EffectKind::Shockwave { .. } | EffectKind::TilePop { .. } => {}
            }
        }
        if !particles.is_empty() {
            self.lines.push(format!("({} particles)", particles.len()));
        }
    }

    fn draw_game_over(&mut self, stats: &RoundStats, high_score: u64) {
        self.accent = None;
        self.lines = vec![
            "GAME OVER".to_string(),
            format!("FINAL SCORE {}", stats.score),
            format!("High Score: {high_score}"),
            format!("Best Combo: x{}", stats.max_combo),
            format!(
                "Correct: {} | Wrong: {}",
                stats.total_correct, stats.total_wrong
            ),
            format!("Accuracy: {}%", stats.accuracy()),
            "[ PLAY AGAIN ]".to_string(),
        ];
    }
}
