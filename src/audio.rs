//! Audio output
//!
//! Sounds are fire-and-forget: a sink that cannot play simply stays quiet.
//! On wasm32 the cues are synthesized with Web Audio oscillators, no files needed.

use crate::settings::Settings;
use crate::sim::SoundKind;

/// Something that can play sound cues
pub trait AudioSink {
    /// Play `kind`. Failures are swallowed.
    fn play(&self, kind: SoundKind, intensity: f32);

    /// Pick up volume/mute changes
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Sink that plays nothing (native builds, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&self, _kind: SoundKind, _intensity: f32) {}
}

/// Combined master/effects volume, 0 when muted
pub fn effective_volume(settings: &Settings) -> f32 {
    if settings.muted {
        0.0
    } else {
        (settings.master_volume * settings.sfx_volume).clamp(0.0, 1.0)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, effective_volume};
    use crate::settings::Settings;
    use crate::sim::SoundKind;

    /// Web Audio backed sink
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: effective_volume(&Settings::default()),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Oscillator routed through a gain node to the speakers
        fn create_osc(&self, ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(OscillatorType::Sine);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Stepped tone: `steps` are (offset seconds, frequency)
        fn play_steps(&self, ctx: &AudioContext, steps: &[(f64, f32)], peak: f32, length: f64) {
            let Some(&(_, first)) = steps.first() else {
                return;
            };
            let Some((osc, gain)) = self.create_osc(ctx, first) else {
                return;
            };
            let t = ctx.current_time();

            for &(offset, freq) in steps {
                osc.frequency().set_value_at_time(freq, t + offset).ok();
            }
            gain.gain().set_value_at_time(peak * self.volume, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + length).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&self, kind: SoundKind, intensity: f32) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match kind {
                SoundKind::Success => {
                    let base = 440.0 + intensity * 40.0;
                    self.play_steps(
                        ctx,
                        &[(0.0, base), (0.07, base * 1.25), (0.14, base * 1.5)],
                        0.15,
                        0.35,
                    );
                }
                SoundKind::Error => {
                    self.play_steps(ctx, &[(0.0, 200.0), (0.15, 100.0)], 0.2, 0.3);
                }
                SoundKind::Click => {
                    self.play_steps(ctx, &[(0.0, 500.0)], 0.1, 0.1);
                }
                SoundKind::LevelUp => {
                    self.play_steps(
                        ctx,
                        &[(0.0, 350.0), (0.1, 500.0), (0.2, 700.0), (0.3, 900.0)],
                        0.18,
                        0.5,
                    );
                }
            }
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.volume = effective_volume(settings);
        }
    }
}
