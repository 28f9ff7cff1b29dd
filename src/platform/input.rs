//! Pointer hit testing
//!
//! The session publishes which regions are live for its phase; the host maps
//! a logical pointer position through them to get an [`Intent`].

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Intent, RoundState, Session};

/// Axis-aligned rectangle in playfield units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Edges are inclusive
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Clickable buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    Submit,
    PlayAgain,
}

impl Button {
    pub fn rect(self) -> Rect {
        match self {
            Button::Start => Rect::new(GAME_WIDTH / 2.0 - 150.0, 340.0, 300.0, 85.0),
            Button::Submit => Rect::new(GAME_WIDTH / 2.0 - 120.0, 555.0, 240.0, 70.0),
            Button::PlayAgain => Rect::new(GAME_WIDTH / 2.0 - 150.0, 490.0, 300.0, 80.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Button::Start => "START GAME",
            Button::Submit => "SUBMIT",
            Button::PlayAgain => "PLAY AGAIN",
        }
    }

    fn intent(self) -> Intent {
        match self {
            Button::Start => Intent::Start,
            Button::Submit => Intent::Submit,
            Button::PlayAgain => Intent::PlayAgain,
        }
    }
}

/// Interactive regions for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitRegions {
    pub buttons: Vec<Button>,
    /// Tile centres, indexed like the board
    pub tiles: Vec<Vec2>,
    pub tile_radius: f32,
}

impl HitRegions {
    /// Regions live in the session's current phase
    pub fn for_session(session: &Session) -> Self {
        match session.phase {
            RoundState::Menu => Self {
                buttons: vec![Button::Start],
                ..Default::default()
            },
            RoundState::Playing => Self {
                buttons: vec![Button::Submit],
                tiles: session
                    .puzzle
                    .as_ref()
                    .map(|p| p.tiles.iter().map(|t| t.pos).collect())
                    .unwrap_or_default(),
                tile_radius: TILE_RADIUS,
            },
            RoundState::GameOver => Self {
                buttons: vec![Button::PlayAgain],
                ..Default::default()
            },
        }
    }

    /// Button under the pointer (for hover styling)
    pub fn button_at(&self, pos: Vec2) -> Option<Button> {
        self.buttons
            .iter()
            .copied()
            .find(|b| b.rect().contains(pos))
    }

    /// Intent for a press at `pos`. Tiles win over buttons.
    pub fn hit_test(&self, pos: Vec2) -> Option<Intent> {
        let tile = self
            .tiles
            .iter()
            .position(|&centre| centre.distance(pos) < self.tile_radius);
        if let Some(index) = tile {
            return Some(Intent::ToggleTile(index));
        }
        self.button_at(pos).map(Button::intent)
    }
}
