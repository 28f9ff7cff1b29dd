//! Browser host bindings
//!
//! The page owns the canvas and the animation loop; it forwards timestamps
//! and pointer presses here and draws from the text HUD or its own reads.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::App;
use crate::audio::WebAudio;
use crate::highscores::LocalStorageStore;
use crate::renderer::TextRenderer;
use crate::settings::{QualityPreset, Settings};
use crate::sim::RoundState;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("NeuroGrid starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    app: App<WebAudio, LocalStorageStore>,
    hud: TextRenderer,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let app = App::new(seed, WebAudio::new(), LocalStorageStore, Settings::load());
        Self {
            app,
            hud: TextRenderer::new(),
        }
    }

    /// requestAnimationFrame callback
    pub fn frame(&mut self, now_ms: f64) {
        self.app.frame(now_ms);
    }

    /// Press in playfield coordinates; returns whether it did anything
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        // Browsers only allow audio after a user gesture
        self.app.audio().resume();
        self.app.pointer_down(Vec2::new(x, y))
    }

    pub fn hover_label(&self, x: f32, y: f32) -> Option<String> {
        self.app
            .hover(Vec2::new(x, y))
            .map(|b| b.label().to_string())
    }

    /// Page hidden
    pub fn suspend(&mut self) {
        self.app.suspend();
    }

    pub fn phase(&self) -> String {
        match self.app.session.phase {
            RoundState::Menu => "menu",
            RoundState::Playing => "playing",
            RoundState::GameOver => "game_over",
        }
        .to_string()
    }

    pub fn hud(&mut self) -> String {
        self.app.render(&mut self.hud);
        self.hud.frame()
    }

    /// Switch quality preset by name; unknown names are ignored
    pub fn set_quality(&mut self, name: &str) -> bool {
        let Some(quality) = QualityPreset::parse(name) else {
            log::warn!("Unknown quality preset: {}", name);
            return false;
        };
        let settings = Settings {
            quality,
            ..self.app.settings.clone()
        };
        settings.save();
        self.app.set_settings(settings);
        true
    }

    pub fn quality(&self) -> String {
        self.app.settings.quality.as_str().to_string()
    }

    pub fn set_settings_json(&mut self, json: &str) {
        let settings = Settings::from_json(json);
        settings.save();
        self.app.set_settings(settings);
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
