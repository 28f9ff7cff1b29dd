//! NeuroGrid entry point
//!
//! The browser build starts from `platform::web`. Natively there is no window;
//! the binary plays one round headlessly with the autoplayer and logs it.
//!
//! Usage: `neurogrid [seed] [low|medium|high]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use neurogrid::audio::NullAudio;
    use neurogrid::highscores::FileStore;
    use neurogrid::renderer::TextRenderer;
    use neurogrid::sim::{Autoplayer, RoundState};
    use neurogrid::{App, QualityPreset, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("NeuroGrid (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let store = FileStore::new(std::env::temp_dir().join("neurogrid_high_score.json"));
    let mut settings = Settings::load();
    let quality = std::env::args()
        .nth(2)
        .and_then(|s| QualityPreset::parse(&s));
    if let Some(quality) = quality {
        settings.quality = quality;
    }
    log::info!("Quality preset: {}", settings.quality.as_str());
    let mut app = App::new(seed, NullAudio, store, settings);
    let mut bot = Autoplayer::default();
    let mut hud = TextRenderer::new();

    const DT: f32 = 1.0 / 60.0;
    // a perfect player can outpace the clock; stop after ten simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    let mut frame: u64 = 0;
    loop {
        if let Some(intent) = bot.next_intent(&app.session, DT) {
            app.intent(intent);
        }
        app.step(DT);
        frame += 1;

        if app.session.phase == RoundState::GameOver {
            break;
        }
        if frame >= MAX_FRAMES {
            log::info!("Stopping autoplay at level {}", app.session.stats.level);
            break;
        }
        // once every simulated 5 seconds
        if frame % 300 == 0 {
            app.render(&mut hud);
            log::info!("\n{}", hud.frame());
        }
    }

    app.render(&mut hud);
    log::info!("\n{}", hud.frame());
    log::info!(
        "Round finished after {:.1}s (high score file: {})",
        app.session.clock,
        app.store().path().display()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
