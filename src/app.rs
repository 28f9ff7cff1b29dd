//! Host-side wiring
//!
//! `App` owns a session plus its collaborators (audio, high-score storage,
//! frame clock) and turns the session's events into side effects.

use glam::Vec2;

use crate::audio::AudioSink;
use crate::highscores::HighScoreStore;
use crate::platform::{Button, FrameClock, HitRegions};
use crate::renderer::{Renderer, render};
use crate::settings::Settings;
use crate::sim::{GameEvent, Intent, Session};

pub struct App<A: AudioSink, S: HighScoreStore> {
    pub session: Session,
    pub settings: Settings,
    audio: A,
    store: S,
    clock: FrameClock,
}

impl<A: AudioSink, S: HighScoreStore> App<A, S> {
    /// Reads the stored high score once and sits at the menu
    pub fn new(seed: u64, mut audio: A, store: S, settings: Settings) -> Self {
        let high_score = store.load();
        let mut session = Session::new(seed, high_score);
        settings.apply_to(&mut session);
        audio.apply_settings(&settings);
        log::info!("NeuroGrid ready (seed {}, high score {})", seed, high_score);

        Self {
            session,
            settings,
            audio,
            store,
            clock: FrameClock::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn set_settings(&mut self, settings: Settings) {
        settings.apply_to(&mut self.session);
        self.audio.apply_settings(&settings);
        self.settings = settings;
    }

    /// Pointer press at a logical playfield position
    pub fn pointer_down(&mut self, pos: Vec2) -> bool {
        let Some(intent) = HitRegions::for_session(&self.session).hit_test(pos) else {
            return false;
        };
        self.intent(intent)
    }

    /// Button under the pointer, for hover styling
    pub fn hover(&self, pos: Vec2) -> Option<Button> {
        HitRegions::for_session(&self.session).button_at(pos)
    }

    pub fn intent(&mut self, intent: Intent) -> bool {
        let applied = self.session.apply(intent);
        self.dispatch_events();
        applied
    }

    /// Animation-frame callback with the host timestamp in milliseconds
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.tick(now_ms);
        self.step(dt);
    }

    /// Advance by an explicit delta (seconds)
    pub fn step(&mut self, dt: f32) {
        self.session.update(dt);
        self.dispatch_events();
    }

    /// Host went to the background; the next frame restarts timing
    pub fn suspend(&mut self) {
        self.clock.reset();
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        render(&self.session, renderer);
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::Sound { kind, intensity } => self.audio.play(kind, intensity),
                GameEvent::NewHighScore { score } => self.store.save(score),
                GameEvent::RoundStarted { .. }
                | GameEvent::LevelUp { .. }
                | GameEvent::RoundOver { .. } => {}
            }
        }
    }
}
